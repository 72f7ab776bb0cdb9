//! Lead Audit Configuration
//!
//! Constants, keyword vocabularies and layered runtime settings.

pub mod constants;
pub mod keywords;
pub mod settings;

pub use keywords::KeywordTables;
pub use settings::{
    load_settings, ClassifierSettings, ConfigError, LoggingSettings, LookupSettings,
    NarrativeSettings, ReportSettings, Settings,
};
