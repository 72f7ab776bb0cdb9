//! Lead records before and after classification

use serde::{Deserialize, Serialize};

/// Audit outcome for a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadStatus {
    /// Valid format, no disqualifying signal. Recoverable.
    #[serde(rename = "CONTACTABILIDAD")]
    Contactability,
    /// Format fails or the operator/agent denies the line
    #[serde(rename = "INVÁLIDO")]
    Invalid,
    /// Valid format but the contacted party disclaims identity
    #[serde(rename = "ESPECIAL")]
    Special,
    /// Reserved; the decision procedure never produces it
    #[serde(rename = "DESCONOCIDO")]
    Unknown,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 4] = [
        LeadStatus::Contactability,
        LeadStatus::Invalid,
        LeadStatus::Special,
        LeadStatus::Unknown,
    ];

    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::Contactability => "CONTACTABILIDAD",
            LeadStatus::Invalid => "INVÁLIDO",
            LeadStatus::Special => "ESPECIAL",
            LeadStatus::Unknown => "DESCONOCIDO",
        }
    }

    /// Human-facing label used in summaries and charts
    pub fn display_label(&self) -> &'static str {
        match self {
            LeadStatus::Contactability => "Contactabilidad (Recuperable)",
            LeadStatus::Invalid => "Inválido (Descartar)",
            LeadStatus::Special => "Especial (Revisar)",
            LeadStatus::Unknown => "Desconocido",
        }
    }

    /// Hex color used when rendering the status
    pub fn color(&self) -> &'static str {
        match self {
            LeadStatus::Contactability => "#16a34a",
            LeadStatus::Invalid => "#dc2626",
            LeadStatus::Special => "#eab308",
            LeadStatus::Unknown => "#9ca3af",
        }
    }
}

impl std::fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One input record as read from a record source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawLead {
    pub id: String,
    pub phone: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl RawLead {
    pub fn new(id: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// A record is only worth classifying if its phone keeps at least one
    /// character after normalization
    pub fn has_usable_phone(&self) -> bool {
        !normalize_phone(&self.phone).is_empty()
    }
}

/// Status plus explanation produced by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub status: LeadStatus,
    pub reason: String,
}

/// A classified lead. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedLead {
    pub id: String,
    pub original_phone: String,
    pub clean_phone: String,
    pub notes: String,
    pub attempts: u32,
    pub status: LeadStatus,
    pub reason: String,
    pub is_valid_format: bool,
}

impl ProcessedLead {
    pub fn new(raw: &RawLead, clean_phone: String, classification: Classification) -> Self {
        Self {
            id: raw.id.clone(),
            original_phone: raw.phone.clone(),
            clean_phone,
            notes: raw.notes.clone(),
            attempts: raw.attempts,
            is_valid_format: classification.status != LeadStatus::Invalid,
            status: classification.status,
            reason: classification.reason,
        }
    }

    /// Whether the lead belongs in the narrative's problem sample
    pub fn is_problematic(&self) -> bool {
        matches!(self.status, LeadStatus::Special | LeadStatus::Invalid)
    }
}

/// Strip a phone string down to ASCII digits and an optional leading `+`.
///
/// A `+` survives only if nothing has been kept before it, so the output
/// never contains `+` past position 0 and normalizing twice is a no-op.
pub fn normalize_phone(phone: &str) -> String {
    let mut clean = String::with_capacity(phone.len());
    for c in phone.chars() {
        if c.is_ascii_digit() || (c == '+' && clean.is_empty()) {
            clean.push(c);
        }
    }
    clean
}
