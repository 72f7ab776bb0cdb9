//! Gemini REST client
//!
//! Implements both `RuleLookup` (grounded search, temperature 0.1) and
//! `NarrativeGenerator` (plain generation) over `models/{model}:generateContent`.
//! Successful lookups are cached per country for the life of the client.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;

use lead_audit_config::Settings;
use lead_audit_core::{
    AnalysisStats, Error, NarrativeGenerator, PhoneFormatSearchResult, ProcessedLead, Result,
    RuleLookup,
};

use crate::parse::parse_lookup_response;
use crate::prompts::{lookup_prompt, narrative_prompt};
use crate::wire::{GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Client configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub endpoint: String,
    pub lookup_model: String,
    pub narrative_model: String,
    /// Name of the variable the key was read from, for error messages
    pub api_key_env: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub max_sources: usize,
    pub sample_limit: usize,
    /// Upper bound for any single HTTP request
    pub request_timeout: Duration,
}

impl GeminiConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            endpoint: settings.lookup.endpoint.trim_end_matches('/').to_string(),
            lookup_model: settings.lookup.model.clone(),
            narrative_model: settings.narrative.model.clone(),
            api_key_env: settings.lookup.api_key_env.clone(),
            api_key: settings.lookup.api_key(),
            temperature: settings.lookup.temperature,
            max_sources: settings.lookup.max_sources,
            sample_limit: settings.narrative.sample_limit,
            request_timeout: settings
                .lookup
                .timeout()
                .max(settings.narrative.timeout()),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, model)
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    cache: RwLock<HashMap<String, PhoneFormatSearchResult>>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| Error::Http(e.to_string()))?;

        if config.api_key.is_none() {
            tracing::warn!(
                env = %config.api_key_env,
                "No API key configured, remote calls will fail and fall back"
            );
        }

        Ok(Self {
            http,
            config,
            cache: RwLock::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    fn api_key(&self) -> Result<&str> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| {
                Error::MissingCredentials(format!("{} is not set", self.config.api_key_env))
            })
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let key = self.api_key()?;
        let url = self.config.generate_url(model);

        tracing::debug!(model = %model, "Sending generateContent request");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(request)
            .send()
            .await
            .map_err(|e| Error::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Http(format!(
                "{} returned {}: {}",
                model,
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| Error::Http(e.to_string()))
    }
}

#[async_trait]
impl RuleLookup for GeminiClient {
    async fn lookup(&self, country_name: &str) -> Result<Option<PhoneFormatSearchResult>> {
        let key = country_name.trim().to_lowercase();
        let cached = self.cache.read().get(&key).cloned();
        if let Some(cached) = cached {
            tracing::trace!(country = %country_name, "Lookup cache hit");
            return Ok(Some(cached));
        }

        let request = GenerateContentRequest::user_text(lookup_prompt(country_name))
            .with_search()
            .with_temperature(self.config.temperature);

        let response = self
            .generate_content(&self.config.lookup_model, &request)
            .await
            .map_err(|e| match e {
                Error::Http(msg) => Error::Lookup(msg),
                other => other,
            })?;

        let result = parse_lookup_response(
            &response.text(),
            response.grounding_chunks(),
            country_name,
            self.config.max_sources,
        );

        match &result {
            Some(found) => {
                tracing::debug!(
                    country = %country_name,
                    sources = found.sources.len(),
                    "Lookup returned a candidate pattern"
                );
                self.cache.write().insert(key, found.clone());
            }
            None => tracing::debug!(country = %country_name, "Lookup answer had no pattern block"),
        }

        Ok(result)
    }

    fn name(&self) -> &str {
        "gemini-search"
    }
}

#[async_trait]
impl NarrativeGenerator for GeminiClient {
    async fn generate(
        &self,
        stats: &AnalysisStats,
        country_name: &str,
        sample: &[ProcessedLead],
    ) -> Result<String> {
        let prompt = narrative_prompt(stats, country_name, sample, self.config.sample_limit);
        let request = GenerateContentRequest::user_text(prompt);

        let response = self
            .generate_content(&self.config.narrative_model, &request)
            .await
            .map_err(|e| match e {
                Error::Http(msg) => Error::Narrative(msg),
                other => other,
            })?;

        Ok(response.text())
    }
}
