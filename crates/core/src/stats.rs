//! Aggregate statistics over a classified batch

use serde::{Deserialize, Serialize};

use crate::lead::{LeadStatus, ProcessedLead};

/// Counts per status over a batch of processed leads.
///
/// Always derived from the leads; built as a fold so the order in which
/// leads are visited does not matter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisStats {
    pub total: usize,
    pub valid_count: usize,
    pub invalid_count: usize,
    pub special_count: usize,
    pub recoverable_count: usize,
    pub unknown_count: usize,
}

impl AnalysisStats {
    pub fn from_leads<'a, I>(leads: I) -> Self
    where
        I: IntoIterator<Item = &'a ProcessedLead>,
    {
        leads
            .into_iter()
            .fold(Self::default(), |acc, lead| acc.merge(&Self::of_lead(lead)))
    }

    /// Stats for a single lead
    pub fn of_lead(lead: &ProcessedLead) -> Self {
        let mut stats = Self {
            total: 1,
            valid_count: usize::from(lead.is_valid_format),
            ..Self::default()
        };
        match lead.status {
            LeadStatus::Contactability => stats.recoverable_count = 1,
            LeadStatus::Invalid => stats.invalid_count = 1,
            LeadStatus::Special => stats.special_count = 1,
            LeadStatus::Unknown => stats.unknown_count = 1,
        }
        stats
    }

    /// Combine two partial results. Associative and commutative.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            total: self.total + other.total,
            valid_count: self.valid_count + other.valid_count,
            invalid_count: self.invalid_count + other.invalid_count,
            special_count: self.special_count + other.special_count,
            recoverable_count: self.recoverable_count + other.recoverable_count,
            unknown_count: self.unknown_count + other.unknown_count,
        }
    }

    pub fn count_for(&self, status: LeadStatus) -> usize {
        match status {
            LeadStatus::Contactability => self.recoverable_count,
            LeadStatus::Invalid => self.invalid_count,
            LeadStatus::Special => self.special_count,
            LeadStatus::Unknown => self.unknown_count,
        }
    }

    /// Percentage of the total, 0.0 for an empty batch
    pub fn share(&self, count: usize) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        count as f64 * 100.0 / self.total as f64
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
