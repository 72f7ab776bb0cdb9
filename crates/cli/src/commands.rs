use anyhow::Context;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;

use lead_audit_config::Settings;
use lead_audit_core::{
    AnalysisStats, Classification, CountryRule, Error, PhoneFormatSearchResult, ReportWriter,
};
use lead_audit_llm::{GeminiClient, GeminiConfig};
use lead_audit_persistence::{JsonReportWriter, JsonTableSource};
use lead_audit_rules::{
    BatchProcessor, ClassifierPolicy, CountryRuleRegistry, DynamicRuleResolver, LeadClassifier,
    Narrator, ResolverConfig,
};

#[derive(Serialize)]
struct JsonOut<T: Serialize> {
    ok: bool,
    data: T,
}

fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonOut { ok: true, data })?
    );
    Ok(())
}

fn find_country(name: &str) -> anyhow::Result<CountryRule> {
    let registry = CountryRuleRegistry::new();
    registry.lookup(name).ok_or_else(|| {
        let known: Vec<&str> = registry.list().iter().map(|r| r.code()).collect();
        anyhow::anyhow!(
            "{}. Supported codes: {}",
            Error::UnknownCountry(name.to_string()),
            known.join(", ")
        )
    })
}

pub fn countries(json: bool) -> anyhow::Result<()> {
    let rules = CountryRuleRegistry::new().list();
    if json {
        return print_json(rules);
    }
    for rule in rules {
        println!(
            "{}\t{}\t{}\t{}",
            rule.code(),
            rule.name(),
            rule.pattern_str(),
            rule.example()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct ClassifyOut<'a> {
    country: &'a str,
    clean_phone: String,
    #[serde(flatten)]
    classification: Classification,
}

pub fn classify(
    settings: &Settings,
    json: bool,
    country: &str,
    phone: &str,
    notes: &str,
    attempts: u32,
) -> anyhow::Result<()> {
    let rule = find_country(country)?;
    let classifier = LeadClassifier::new(ClassifierPolicy::from(&settings.classifier));
    let classification = classifier.classify(phone, attempts, notes, &rule);

    let out = ClassifyOut {
        country: rule.name(),
        clean_phone: lead_audit_core::normalize_phone(phone),
        classification,
    };

    if json {
        return print_json(out);
    }
    println!(
        "{}\t{}\t{}",
        out.clean_phone,
        out.classification.status.display_label(),
        out.classification.reason
    );
    Ok(())
}

#[derive(Serialize)]
struct AuditOut {
    country: String,
    effective_pattern: String,
    dynamic_rule: bool,
    search_metadata: Option<PhoneFormatSearchResult>,
    stats: AnalysisStats,
    report: PathBuf,
}

pub struct AuditArgs {
    pub country: String,
    pub input: PathBuf,
    pub no_lookup: bool,
    pub no_narrative: bool,
    pub output_dir: Option<PathBuf>,
}

pub async fn audit(mut settings: Settings, json: bool, args: AuditArgs) -> anyhow::Result<()> {
    if args.no_lookup {
        settings.lookup.enabled = false;
    }
    if args.no_narrative {
        settings.narrative.enabled = false;
    }
    if let Some(dir) = &args.output_dir {
        settings.report.output_dir = dir.display().to_string();
    }

    let country = find_country(&args.country)?;

    let client = if settings.lookup.enabled || settings.narrative.enabled {
        Some(Arc::new(GeminiClient::new(GeminiConfig::from_settings(
            &settings,
        ))?))
    } else {
        None
    };

    let resolver = match &client {
        Some(client) if settings.lookup.enabled => DynamicRuleResolver::new(
            client.clone(),
            ResolverConfig::from(&settings.lookup),
        ),
        _ => DynamicRuleResolver::disabled(),
    };
    let narrator = match &client {
        Some(client) if settings.narrative.enabled => {
            Narrator::new(client.clone(), &settings.narrative)
        }
        _ => Narrator::disabled(&settings.narrative),
    };

    let processor = BatchProcessor::new(
        resolver,
        LeadClassifier::new(ClassifierPolicy::from(&settings.classifier)),
    );
    let source = JsonTableSource::new(&args.input);

    let outcome = processor
        .run_from_source(&source, &country)
        .await
        .with_context(|| format!("failed to load {}", args.input.display()))?;

    let narrative = narrator.narrate(&outcome, country.name()).await;

    let writer = JsonReportWriter::from_settings(&settings.report);
    let report = writer
        .write(&outcome.leads, &outcome.stats, &narrative, country.name())
        .await
        .context("failed to write the audit report")?;

    let out = AuditOut {
        country: country.name().to_string(),
        effective_pattern: outcome.effective_rule.pattern_str().to_string(),
        dynamic_rule: outcome.search_metadata.is_some(),
        search_metadata: outcome.search_metadata.clone(),
        stats: outcome.stats,
        report,
    };

    if json {
        return print_json(out);
    }

    let stats = &out.stats;
    println!("País:          {}", out.country);
    println!(
        "Regla:         {}{}",
        out.effective_pattern,
        if out.dynamic_rule {
            " (validada vía búsqueda web)"
        } else {
            ""
        }
    );
    println!("Total:         {}", stats.total);
    println!(
        "Recuperables:  {} ({:.1}%)",
        stats.recoverable_count,
        stats.share(stats.recoverable_count)
    );
    println!(
        "Inválidos:     {} ({:.1}%)",
        stats.invalid_count,
        stats.share(stats.invalid_count)
    );
    println!(
        "Especiales:    {} ({:.1}%)",
        stats.special_count,
        stats.share(stats.special_count)
    );
    if let Some(meta) = &out.search_metadata {
        for source in &meta.sources {
            println!("Fuente:        {} <{}>", source.title, source.uri);
        }
    }
    println!("Reporte:       {}", out.report.display());
    Ok(())
}
