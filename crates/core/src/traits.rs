//! Collaborator Traits
//!
//! Narrow boundaries between the classification engine and the outside
//! world. Implementations live in the llm and persistence crates; tests
//! provide hand-written mocks.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::{AnalysisStats, PhoneFormatSearchResult, ProcessedLead, RawLead, Result};

/// Supplies the raw records of one batch
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Load every record. Records without a usable phone must already be
    /// dropped. An error here is the only batch-fatal condition.
    async fn load(&self) -> Result<Vec<RawLead>>;

    /// Short description for logs (file name, table name)
    fn describe(&self) -> String;
}

/// External lookup of a country's current numbering plan
#[async_trait]
pub trait RuleLookup: Send + Sync {
    /// Returns `None` when the service answered without a usable candidate.
    /// The candidate pattern text is untrusted.
    async fn lookup(&self, country_name: &str) -> Result<Option<PhoneFormatSearchResult>>;

    fn name(&self) -> &str;
}

/// External generator of the executive narrative
#[async_trait]
pub trait NarrativeGenerator: Send + Sync {
    /// `sample` holds at most a bounded number of special/invalid leads
    async fn generate(
        &self,
        stats: &AnalysisStats,
        country_name: &str,
        sample: &[ProcessedLead],
    ) -> Result<String>;
}

/// Persists the multi-section audit report
#[async_trait]
pub trait ReportWriter: Send + Sync {
    /// Returns the location of the written report
    async fn write(
        &self,
        leads: &[ProcessedLead],
        stats: &AnalysisStats,
        narrative: &str,
        country_name: &str,
    ) -> Result<PathBuf>;
}
