//! Batch Processor
//!
//! One batch = one country selection + one record set. The rule is resolved
//! once (the only await point), then every record is classified with that
//! single effective rule and the stats are folded from the results.

use lead_audit_core::{
    AnalysisStats, CountryRule, PhoneFormatSearchResult, ProcessedLead, RawLead, RecordSource,
    Result,
};

use crate::classifier::LeadClassifier;
use crate::resolver::{DynamicRuleResolver, ResolvedRule};

/// Everything produced by one batch run
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub leads: Vec<ProcessedLead>,
    pub stats: AnalysisStats,
    pub search_metadata: Option<PhoneFormatSearchResult>,
    /// Rule every lead of the batch was classified with
    pub effective_rule: CountryRule,
}

impl BatchOutcome {
    /// Up to `limit` special/invalid leads, in input order
    pub fn problematic_sample(&self, limit: usize) -> Vec<ProcessedLead> {
        self.leads
            .iter()
            .filter(|lead| lead.is_problematic())
            .take(limit)
            .cloned()
            .collect()
    }
}

/// Resolves, classifies and aggregates a batch
pub struct BatchProcessor {
    resolver: DynamicRuleResolver,
    classifier: LeadClassifier,
}

impl BatchProcessor {
    pub fn new(resolver: DynamicRuleResolver, classifier: LeadClassifier) -> Self {
        Self {
            resolver,
            classifier,
        }
    }

    pub fn classifier(&self) -> &LeadClassifier {
        &self.classifier
    }

    /// Process an in-memory record set for one country
    pub async fn run(&self, records: &[RawLead], country: &CountryRule) -> BatchOutcome {
        let ResolvedRule {
            rule,
            search_metadata,
        } = self.resolver.resolve(country).await;

        let outcome = self.classify_all(records, rule, search_metadata);

        tracing::info!(
            country = %country.name(),
            dynamic_rule = outcome.search_metadata.is_some(),
            total = outcome.stats.total,
            recoverable = outcome.stats.recoverable_count,
            invalid = outcome.stats.invalid_count,
            special = outcome.stats.special_count,
            "Batch classified"
        );

        outcome
    }

    /// Load records from a source, then process them. A source failure is
    /// the only way this returns an error, and nothing partial is produced.
    pub async fn run_from_source(
        &self,
        source: &dyn RecordSource,
        country: &CountryRule,
    ) -> Result<BatchOutcome> {
        let records = source.load().await.map_err(|e| {
            tracing::error!(source = %source.describe(), error = %e, "Failed to load records");
            e
        })?;

        tracing::debug!(
            source = %source.describe(),
            records = records.len(),
            "Records loaded"
        );

        Ok(self.run(&records, country).await)
    }

    fn classify_all(
        &self,
        records: &[RawLead],
        rule: CountryRule,
        search_metadata: Option<PhoneFormatSearchResult>,
    ) -> BatchOutcome {
        let leads: Vec<ProcessedLead> = records
            .iter()
            .filter(|raw| {
                let usable = raw.has_usable_phone();
                if !usable {
                    tracing::debug!(id = %raw.id, "Skipping record without a usable phone");
                }
                usable
            })
            .map(|raw| self.classifier.process(raw, &rule))
            .collect();

        let stats = AnalysisStats::from_leads(&leads);

        BatchOutcome {
            leads,
            stats,
            search_metadata,
            effective_rule: rule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CountryRuleRegistry;
    use lead_audit_core::LeadStatus;

    fn records() -> Vec<RawLead> {
        vec![
            RawLead::new("1", "3123456789"),
            RawLead::new("2", "123"),
            RawLead::new("3", "312 345 6789").with_notes("buzón de voz"),
            RawLead::new("4", "3123456789").with_notes("no existe el número"),
            RawLead::new("5", "3123456789").with_notes("persona equivocada"),
            RawLead::new("6", "--"),
        ]
    }

    #[tokio::test]
    async fn test_run_static_batch() {
        let processor =
            BatchProcessor::new(DynamicRuleResolver::disabled(), LeadClassifier::default());
        let colombia = CountryRuleRegistry::new().lookup("Colombia").unwrap();

        let outcome = processor.run(&records(), &colombia).await;

        assert_eq!(outcome.leads.len(), 5);
        assert_eq!(outcome.stats.total, 5);
        assert_eq!(outcome.stats.recoverable_count, 2);
        assert_eq!(outcome.stats.invalid_count, 2);
        assert_eq!(outcome.stats.special_count, 1);
        assert_eq!(outcome.stats.valid_count, 3);
        assert!(outcome.search_metadata.is_none());
        assert_eq!(outcome.effective_rule, colombia);
    }

    #[tokio::test]
    async fn test_problematic_sample() {
        let processor =
            BatchProcessor::new(DynamicRuleResolver::disabled(), LeadClassifier::default());
        let colombia = CountryRuleRegistry::new().lookup("CO").unwrap();
        let outcome = processor.run(&records(), &colombia).await;

        let sample = outcome.problematic_sample(20);
        let ids: Vec<&str> = sample.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "4", "5"]);
        assert!(sample
            .iter()
            .all(|l| matches!(l.status, LeadStatus::Invalid | LeadStatus::Special)));

        assert_eq!(outcome.problematic_sample(1).len(), 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let processor =
            BatchProcessor::new(DynamicRuleResolver::disabled(), LeadClassifier::default());
        let chile = CountryRuleRegistry::new().lookup("CL").unwrap();
        let outcome = processor.run(&[], &chile).await;
        assert!(outcome.leads.is_empty());
        assert!(outcome.stats.is_empty());
    }
}
