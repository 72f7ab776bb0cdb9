//! Lead Audit Rules
//!
//! The classification engine:
//! - `registry`: static per-country numbering-plan catalog
//! - `classifier`: ordered decision procedure over one record
//! - `resolver`: validated override of a static rule by a live lookup
//! - `batch`: one resolve per batch, one classification per record, stats
//! - `narrative`: executive narrative with a fallback on failure

pub mod batch;
pub mod classifier;
pub mod narrative;
pub mod registry;
pub mod resolver;

pub use batch::{BatchOutcome, BatchProcessor};
pub use classifier::{ClassifierPolicy, LeadClassifier};
pub use narrative::Narrator;
pub use registry::CountryRuleRegistry;
pub use resolver::{DynamicRuleResolver, ResolvedRule, ResolverConfig};
