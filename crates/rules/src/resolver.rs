//! Dynamic Rule Resolver
//!
//! Tries to replace a static country pattern with one discovered by an
//! external lookup. The candidate is untrusted text: it is compiled before
//! adoption, and every failure path (service error, timeout, no candidate,
//! malformed pattern) ends with the static rule. `resolve` never fails.

use lead_audit_config::{constants, LookupSettings};
use lead_audit_core::{CountryRule, PhoneFormatSearchResult, RuleLookup};
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;

/// Effective rule for one batch plus the lookup metadata that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedRule {
    pub rule: CountryRule,
    /// Present only when a live candidate was adopted
    pub search_metadata: Option<PhoneFormatSearchResult>,
}

impl ResolvedRule {
    fn fallback(rule: &CountryRule) -> Self {
        Self {
            rule: rule.clone(),
            search_metadata: None,
        }
    }

    /// Whether the rule came from the live lookup
    pub fn is_dynamic(&self) -> bool {
        self.search_metadata.is_some()
    }
}

/// Resolver configuration
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Upper bound on the lookup call
    pub timeout: Duration,
    /// Source citations kept from a lookup
    pub max_sources: usize,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_millis(constants::timeouts::LOOKUP_MS),
            max_sources: constants::lookup::MAX_SOURCES,
        }
    }
}

impl From<&LookupSettings> for ResolverConfig {
    fn from(settings: &LookupSettings) -> Self {
        Self {
            timeout: settings.timeout(),
            max_sources: settings.max_sources,
        }
    }
}

/// Resolves the effective rule for a batch
pub struct DynamicRuleResolver {
    lookup: Option<Arc<dyn RuleLookup>>,
    config: ResolverConfig,
}

impl DynamicRuleResolver {
    pub fn new(lookup: Arc<dyn RuleLookup>, config: ResolverConfig) -> Self {
        Self {
            lookup: Some(lookup),
            config,
        }
    }

    /// Resolver that always keeps the static rule
    pub fn disabled() -> Self {
        Self {
            lookup: None,
            config: ResolverConfig::default(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.lookup.is_some()
    }

    /// Effective rule for `static_rule`'s country
    pub async fn resolve(&self, static_rule: &CountryRule) -> ResolvedRule {
        let Some(lookup) = &self.lookup else {
            return ResolvedRule::fallback(static_rule);
        };

        let country = static_rule.name();
        let result =
            match tokio::time::timeout(self.config.timeout, lookup.lookup(country)).await {
                Ok(Ok(Some(result))) => result,
                Ok(Ok(None)) => {
                    tracing::warn!(
                        country = %country,
                        lookup = lookup.name(),
                        "Lookup returned no candidate, using static rule"
                    );
                    return ResolvedRule::fallback(static_rule);
                }
                Ok(Err(e)) => {
                    tracing::warn!(
                        country = %country,
                        lookup = lookup.name(),
                        error = %e,
                        "Lookup failed, using static rule"
                    );
                    return ResolvedRule::fallback(static_rule);
                }
                Err(_) => {
                    tracing::warn!(
                        country = %country,
                        lookup = lookup.name(),
                        timeout_ms = self.config.timeout.as_millis() as u64,
                        "Lookup timed out, using static rule"
                    );
                    return ResolvedRule::fallback(static_rule);
                }
            };

        self.adopt(static_rule, result)
    }

    /// Validate-before-adopt gate for a lookup candidate
    fn adopt(&self, static_rule: &CountryRule, mut result: PhoneFormatSearchResult) -> ResolvedRule {
        let candidate = result.regex_string.trim().to_string();
        if candidate.is_empty() {
            tracing::warn!(
                country = %static_rule.name(),
                "Empty candidate pattern, using static rule"
            );
            return ResolvedRule::fallback(static_rule);
        }

        let pattern = match Regex::new(&candidate) {
            Ok(pattern) => pattern,
            Err(e) => {
                tracing::warn!(
                    country = %static_rule.name(),
                    candidate = %candidate,
                    error = %e,
                    "Lookup returned an invalid pattern, using static rule"
                );
                return ResolvedRule::fallback(static_rule);
            }
        };

        let example = format!(
            "{} {}",
            static_rule.example(),
            constants::lookup::VERIFIED_EXAMPLE_SUFFIX
        );
        result.sources.truncate(self.config.max_sources);

        tracing::info!(
            country = %static_rule.name(),
            pattern = %candidate,
            sources = result.sources.len(),
            "Adopted verified pattern"
        );
        result.regex_string = candidate;

        ResolvedRule {
            rule: static_rule.with_pattern(pattern, example),
            search_metadata: Some(result),
        }
    }
}
