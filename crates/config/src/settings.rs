//! Layered runtime settings
//!
//! Sources, lowest priority first:
//! 1. Built-in defaults (see `constants`)
//! 2. Optional settings file (toml, yaml or json, picked by extension)
//! 3. `LEAD_AUDIT__SECTION__KEY` environment variables

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::constants::{classification, endpoints, lookup, narrative, report, timeouts};
use crate::keywords::KeywordTables;

/// Environment variable prefix
pub const ENV_PREFIX: &str = "LEAD_AUDIT";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

/// Top-level settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub lookup: LookupSettings,
    pub classifier: ClassifierSettings,
    pub narrative: NarrativeSettings,
    pub report: ReportSettings,
    pub logging: LoggingSettings,
}

/// Dynamic rule lookup service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupSettings {
    /// When false the static rule is always used
    pub enabled: bool,
    pub endpoint: String,
    pub model: String,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
    pub timeout_ms: u64,
    pub temperature: f32,
    pub max_sources: usize,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: endpoints::GEMINI_DEFAULT.to_string(),
            model: endpoints::GEMINI_MODEL.to_string(),
            api_key_env: endpoints::API_KEY_ENV.to_string(),
            timeout_ms: timeouts::LOOKUP_MS,
            temperature: lookup::TEMPERATURE,
            max_sources: lookup::MAX_SOURCES,
        }
    }
}

impl LookupSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// API key from the configured environment variable, if set and non-empty
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

/// Decision procedure heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub fatigue_threshold: u32,
    pub keywords: KeywordTables,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            fatigue_threshold: classification::FATIGUE_ATTEMPTS_THRESHOLD,
            keywords: KeywordTables::v1(),
        }
    }
}

/// Executive narrative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeSettings {
    pub enabled: bool,
    pub model: String,
    pub sample_limit: usize,
    pub timeout_ms: u64,
    pub fallback_text: String,
}

impl Default for NarrativeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            model: endpoints::GEMINI_MODEL.to_string(),
            sample_limit: narrative::SAMPLE_LIMIT,
            timeout_ms: timeouts::NARRATIVE_MS,
            fallback_text: narrative::FALLBACK_TEXT.to_string(),
        }
    }
}

impl NarrativeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Report output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    pub output_dir: String,
    pub file_prefix: String,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            output_dir: report::OUTPUT_DIR.to_string(),
            file_prefix: report::FILE_PREFIX.to_string(),
        }
    }
}

/// Log output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive, overridden by `RUST_LOG`
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl Settings {
    /// Reject values that would make the engine misbehave
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.classifier.fatigue_threshold == 0 {
            return Err(ConfigError::Invalid(
                "classifier.fatigue_threshold must be at least 1".to_string(),
            ));
        }
        if self.lookup.timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "lookup.timeout_ms must be positive".to_string(),
            ));
        }
        if self.lookup.max_sources > lookup::MAX_SOURCES {
            return Err(ConfigError::Invalid(format!(
                "lookup.max_sources must not exceed {}",
                lookup::MAX_SOURCES
            )));
        }
        if self.narrative.sample_limit == 0 || self.narrative.sample_limit > narrative::SAMPLE_LIMIT
        {
            return Err(ConfigError::Invalid(format!(
                "narrative.sample_limit must be between 1 and {}",
                narrative::SAMPLE_LIMIT
            )));
        }
        Ok(())
    }
}

/// Load settings from defaults, an optional file and the environment
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    if let Some(path) = path {
        tracing::debug!(path = %path.display(), "Loading settings file");
        builder = builder.add_source(File::from(path).required(true));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let mut settings: Settings = builder.build()?.try_deserialize()?;
    settings.classifier.keywords = settings.classifier.keywords.normalized();
    settings.validate()?;

    Ok(settings)
}
