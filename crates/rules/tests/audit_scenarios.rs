//! End-to-end audit scenarios
//!
//! Drive the registry, resolver, classifier and batch processor together
//! with stub collaborators in place of the external services.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use lead_audit_core::{
    AnalysisStats, CountryRule, Error, LeadStatus, PhoneFormatSearchResult, RawLead,
    RecordSource, Result, RuleLookup, SourceCitation,
};
use lead_audit_rules::{
    classifier::{REASON_BAD_FORMAT, REASON_OPERATOR_DENIAL, REASON_RECOVERABLE, REASON_WRONG_PARTY},
    BatchProcessor, CountryRuleRegistry, DynamicRuleResolver, LeadClassifier, ResolverConfig,
};

/// Lookup that always answers with the same candidate and counts calls
struct FixedLookup {
    candidate: Option<&'static str>,
    calls: AtomicUsize,
}

impl FixedLookup {
    fn new(candidate: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            candidate,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl RuleLookup for FixedLookup {
    async fn lookup(&self, country_name: &str) -> Result<Option<PhoneFormatSearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.candidate.map(|pattern| PhoneFormatSearchResult {
            regex_string: pattern.to_string(),
            explanation: format!("Formato validado vía web para {}", country_name),
            sources: vec![SourceCitation {
                title: "Plan de numeración".to_string(),
                uri: "https://example.org/plan".to_string(),
            }],
        }))
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

struct BrokenSource;

#[async_trait]
impl RecordSource for BrokenSource {
    async fn load(&self) -> Result<Vec<RawLead>> {
        Err(Error::RecordSource("sheet is empty".into()))
    }

    fn describe(&self) -> String {
        "broken".to_string()
    }
}

struct VecSource(Vec<RawLead>);

#[async_trait]
impl RecordSource for VecSource {
    async fn load(&self) -> Result<Vec<RawLead>> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        format!("{} in-memory records", self.0.len())
    }
}

fn colombia() -> CountryRule {
    CountryRuleRegistry::new().lookup("Colombia").unwrap()
}

fn processor_with(lookup: Arc<dyn RuleLookup>) -> BatchProcessor {
    BatchProcessor::new(
        DynamicRuleResolver::new(
            lookup,
            ResolverConfig {
                timeout: Duration::from_millis(200),
                max_sources: 3,
            },
        ),
        LeadClassifier::default(),
    )
}

#[test]
fn scenario_valid_phone_without_notes_is_recoverable() {
    let result = LeadClassifier::default().classify("3123456789", 0, "", &colombia());
    assert_eq!(result.status, LeadStatus::Contactability);
    assert!(result.reason.ends_with(REASON_RECOVERABLE));
}

#[test]
fn scenario_short_phone_is_invalid_for_every_country() {
    let classifier = LeadClassifier::default();
    for rule in CountryRuleRegistry::new().list() {
        let result = classifier.classify("123", 0, "persona equivocada", rule);
        assert_eq!(result.status, LeadStatus::Invalid);
        assert_eq!(result.reason, REASON_BAD_FORMAT);
    }
}

#[test]
fn scenario_voicemail_is_recoverable() {
    let result = LeadClassifier::default().classify("3123456789", 0, "buzón de voz", &colombia());
    assert_eq!(result.status, LeadStatus::Contactability);
    assert!(result.reason.contains("Buzón"));
}

#[test]
fn scenario_operator_denial_is_invalid() {
    let result =
        LeadClassifier::default().classify("3123456789", 0, "no existe el número", &colombia());
    assert_eq!(result.status, LeadStatus::Invalid);
    assert_eq!(result.reason, REASON_OPERATOR_DENIAL);
}

#[test]
fn scenario_wrong_party_is_special() {
    let result =
        LeadClassifier::default().classify("3123456789", 0, "persona equivocada", &colombia());
    assert_eq!(result.status, LeadStatus::Special);
    assert_eq!(result.reason, REASON_WRONG_PARTY);
}

#[tokio::test]
async fn scenario_malformed_candidate_falls_back_to_static_rule() {
    let lookup = FixedLookup::new(Some("("));
    let processor = processor_with(lookup.clone());
    let static_rule = colombia();

    let outcome = processor
        .run(&[RawLead::new("1", "3123456789")], &static_rule)
        .await;

    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    assert!(outcome.search_metadata.is_none());
    assert_eq!(outcome.effective_rule.pattern_str(), static_rule.pattern_str());
    assert_eq!(outcome.leads[0].status, LeadStatus::Contactability);
    assert!(outcome.leads[0].reason.ends_with(REASON_RECOVERABLE));
}

#[tokio::test]
async fn lookup_runs_once_per_batch() {
    let lookup = FixedLookup::new(None);
    let processor = processor_with(lookup.clone());
    let records: Vec<RawLead> = (0..50)
        .map(|i| RawLead::new(i.to_string(), "3123456789"))
        .collect();

    let outcome = processor.run(&records, &colombia()).await;

    assert_eq!(lookup.calls.load(Ordering::SeqCst), 1);
    assert_eq!(outcome.stats.total, 50);
}

#[tokio::test]
async fn verified_rule_applies_to_whole_batch() {
    // Stricter than the static rule: mobile numbers only
    let lookup = FixedLookup::new(Some(r"^(?:\+?57)?3\d{9}$"));
    let processor = processor_with(lookup);
    let records = vec![
        RawLead::new("mobile", "3123456789"),
        RawLead::new("fixed", "6012345678"),
    ];

    let outcome = processor.run(&records, &colombia()).await;

    let metadata = outcome.search_metadata.as_ref().unwrap();
    assert_eq!(metadata.sources.len(), 1);
    assert_eq!(outcome.effective_rule.code(), "CO");
    assert_eq!(outcome.leads[0].status, LeadStatus::Contactability);
    assert_eq!(outcome.leads[1].status, LeadStatus::Invalid);

    // The registry entry is untouched
    assert_eq!(colombia().pattern_str(), r"^(?:(?:\+|00)?57)?([36]\d{9})$");
}

#[tokio::test]
async fn stats_total_matches_status_counts() {
    let processor = BatchProcessor::new(DynamicRuleResolver::disabled(), LeadClassifier::default());
    let records = vec![
        RawLead::new("1", "3123456789").with_attempts(6),
        RawLead::new("2", "31234"),
        RawLead::new("3", "6012345678").with_notes("No vive ahí"),
        RawLead::new("4", "6012345678").with_notes("Suspendido"),
        RawLead::new("5", "+57 312 345 6789").with_notes("cuelga"),
    ];

    let outcome = processor.run(&records, &colombia()).await;
    let stats: AnalysisStats = outcome.stats;
    let sum: usize = LeadStatus::ALL.iter().map(|s| stats.count_for(*s)).sum();

    assert_eq!(stats.total, 5);
    assert_eq!(sum, stats.total);
    assert_eq!(stats.unknown_count, 0);
    assert_eq!(stats, AnalysisStats::from_leads(outcome.leads.iter().rev()));
    assert!(outcome.leads[0].reason.contains("tras 6 intentos"));
}

#[tokio::test]
async fn source_failure_aborts_batch() {
    let processor = BatchProcessor::new(DynamicRuleResolver::disabled(), LeadClassifier::default());
    let result = processor.run_from_source(&BrokenSource, &colombia()).await;
    assert!(matches!(result, Err(Error::RecordSource(_))));
}

#[tokio::test]
async fn source_records_are_processed() {
    let processor = BatchProcessor::new(DynamicRuleResolver::disabled(), LeadClassifier::default());
    let source = VecSource(vec![
        RawLead::new("a", "912345678"),
        RawLead::new("b", "12345"),
    ]);
    let chile = CountryRuleRegistry::new().lookup("Chile").unwrap();

    let outcome = processor.run_from_source(&source, &chile).await.unwrap();
    assert_eq!(outcome.stats.recoverable_count, 1);
    assert_eq!(outcome.stats.invalid_count, 1);
}
