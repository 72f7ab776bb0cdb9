//! Lead Audit Core
//!
//! Data model, error type and collaborator traits shared by every crate in
//! the workspace. Nothing in here performs I/O; the traits describe the
//! narrow boundaries to record sources, the dynamic rule lookup, the
//! narrative generator and the report writer.

pub mod error;
pub mod lead;
pub mod rule;
pub mod stats;
pub mod traits;

pub use error::{Error, Result};
pub use lead::{normalize_phone, Classification, LeadStatus, ProcessedLead, RawLead};
pub use rule::{CountryRule, PhoneFormatSearchResult, SourceCitation};
pub use stats::AnalysisStats;
pub use traits::{NarrativeGenerator, RecordSource, ReportWriter, RuleLookup};
