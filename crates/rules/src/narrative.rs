//! Executive narrative with fallback
//!
//! Narrative generation runs after classification and never affects it.
//! Any failure, timeout or empty answer is replaced by a fallback text.

use lead_audit_config::{constants::narrative, NarrativeSettings};
use lead_audit_core::NarrativeGenerator;
use std::sync::Arc;
use std::time::Duration;

use crate::batch::BatchOutcome;

pub struct Narrator {
    generator: Option<Arc<dyn NarrativeGenerator>>,
    sample_limit: usize,
    timeout: Duration,
    fallback_text: String,
}

impl Narrator {
    pub fn new(generator: Arc<dyn NarrativeGenerator>, settings: &NarrativeSettings) -> Self {
        Self {
            generator: Some(generator),
            sample_limit: settings.sample_limit.min(narrative::SAMPLE_LIMIT),
            timeout: settings.timeout(),
            fallback_text: settings.fallback_text.clone(),
        }
    }

    /// Narrator that always returns the fallback text
    pub fn disabled(settings: &NarrativeSettings) -> Self {
        Self {
            generator: None,
            sample_limit: settings.sample_limit,
            timeout: settings.timeout(),
            fallback_text: settings.fallback_text.clone(),
        }
    }

    /// Narrative for a classified batch. Never fails.
    pub async fn narrate(&self, outcome: &BatchOutcome, country_name: &str) -> String {
        let Some(generator) = &self.generator else {
            return self.fallback_text.clone();
        };

        let sample = outcome.problematic_sample(self.sample_limit);
        let call = generator.generate(&outcome.stats, country_name, &sample);

        match tokio::time::timeout(self.timeout, call).await {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::warn!(country = %country_name, "Narrative generator returned no text");
                narrative::EMPTY_TEXT.to_string()
            }
            Ok(Err(e)) => {
                tracing::warn!(country = %country_name, error = %e, "Narrative generation failed");
                self.fallback_text.clone()
            }
            Err(_) => {
                tracing::warn!(
                    country = %country_name,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Narrative generation timed out"
                );
                self.fallback_text.clone()
            }
        }
    }
}
