//! File-backed collaborators for the lead audit
//!
//! - `JsonTableSource`: lead records from a JSON table export
//! - `JsonReportWriter`: the six-section audit report as a dated JSON file

pub mod records;
pub mod report;

pub use records::{ColumnMap, JsonTableSource};
pub use report::{
    AuditReport, ContactabilityRow, Findings, InvalidRow, JsonReportWriter, RecontactList,
    RecontactRow, SpecialRow, SummaryRow,
};
