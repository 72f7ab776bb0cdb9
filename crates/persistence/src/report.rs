//! Audit report writer
//!
//! Six sections, in order: executive summary, contactability, invalid,
//! special, findings, recontact list. Row fields keep the Spanish column
//! headings the call-center teams read.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use lead_audit_config::ReportSettings;
use lead_audit_core::{AnalysisStats, Error, LeadStatus, ProcessedLead, ReportWriter, Result};

const FINDINGS_TITLE: &str = "ANÁLISIS CUALITATIVO - HALLAZGOS CLAVE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    #[serde(rename = "MÉTRICA")]
    pub metric: String,
    #[serde(rename = "CANTIDAD")]
    pub count: usize,
    #[serde(rename = "PORCENTAJE")]
    pub percentage: String,
    #[serde(rename = "ACCIÓN SUGERIDA")]
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactabilityRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Validación")]
    pub validation: String,
    #[serde(rename = "Razón")]
    pub reason: String,
    #[serde(rename = "Cantidad de toques")]
    pub attempts: u32,
    #[serde(rename = "Observaciones del agente")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvalidRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Validación")]
    pub validation: String,
    #[serde(rename = "Razón del error")]
    pub reason: String,
    #[serde(rename = "Observaciones del agente")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Tipo de problema")]
    pub problem: String,
    #[serde(rename = "Descripción del problema")]
    pub description: String,
    #[serde(rename = "Observaciones del agente")]
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Findings {
    pub title: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecontactRow {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "Teléfono")]
    pub phone: String,
    #[serde(rename = "Observaciones del agente")]
    pub notes: String,
    #[serde(rename = "Estado")]
    pub state: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecontactList {
    pub total_recoverable: usize,
    pub leads: Vec<RecontactRow>,
}

/// Full report document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub country: String,
    pub generated_on: NaiveDate,
    pub executive_summary: Vec<SummaryRow>,
    pub contactability: Vec<ContactabilityRow>,
    pub invalid: Vec<InvalidRow>,
    pub special: Vec<SpecialRow>,
    pub findings: Findings,
    pub recontact: RecontactList,
}

impl AuditReport {
    pub fn build(
        leads: &[ProcessedLead],
        stats: &AnalysisStats,
        narrative: &str,
        country_name: &str,
        generated_on: NaiveDate,
    ) -> Self {
        let of = |status: LeadStatus| leads.iter().filter(move |l| l.status == status);

        Self {
            country: country_name.to_string(),
            generated_on,
            executive_summary: summary(stats),
            contactability: of(LeadStatus::Contactability)
                .map(|l| ContactabilityRow {
                    id: l.id.clone(),
                    phone: l.original_phone.clone(),
                    validation: "✓ VÁLIDO".to_string(),
                    reason: l.reason.clone(),
                    attempts: l.attempts,
                    notes: l.notes.clone(),
                })
                .collect(),
            invalid: of(LeadStatus::Invalid)
                .map(|l| InvalidRow {
                    id: l.id.clone(),
                    phone: l.original_phone.clone(),
                    validation: "✗ INVÁLIDO".to_string(),
                    reason: l.reason.clone(),
                    notes: l.notes.clone(),
                })
                .collect(),
            special: of(LeadStatus::Special)
                .map(|l| SpecialRow {
                    id: l.id.clone(),
                    phone: l.original_phone.clone(),
                    problem: "Registro Erróneo / Equivocado".to_string(),
                    description: l.reason.clone(),
                    notes: l.notes.clone(),
                })
                .collect(),
            findings: Findings {
                title: FINDINGS_TITLE.to_string(),
                lines: narrative.split('\n').map(str::to_string).collect(),
            },
            recontact: RecontactList {
                total_recoverable: stats.recoverable_count,
                leads: of(LeadStatus::Contactability)
                    .map(|l| RecontactRow {
                        id: l.id.clone(),
                        phone: l.original_phone.clone(),
                        notes: l.notes.clone(),
                        state: "RECUPERABLE".to_string(),
                    })
                    .collect(),
            },
        }
    }
}

fn summary(stats: &AnalysisStats) -> Vec<SummaryRow> {
    let row = |metric: &str, count: usize, action: &str| SummaryRow {
        metric: metric.to_string(),
        count,
        percentage: format!("{:.2}%", stats.share(count)),
        action: action.to_string(),
    };

    vec![
        SummaryRow {
            metric: "TOTAL REGISTROS ANALIZADOS".to_string(),
            count: stats.total,
            percentage: "100%".to_string(),
            action: "-".to_string(),
        },
        row(
            "NÚMEROS CON FORMATO VÁLIDO (Contactabilidad)",
            stats.recoverable_count,
            "Recontactar vía SMS/WhatsApp/Llamada",
        ),
        row(
            "NÚMEROS CON FORMATO INVÁLIDO (Descartar)",
            stats.invalid_count,
            "Depurar de Base de Datos",
        ),
        row(
            "CASOS ESPECIALES (Problemáticos/Equivocados)",
            stats.special_count,
            "Revisión Manual / Confirmar Datos",
        ),
    ]
}

/// Writes `{prefix}_{country}_{YYYY-MM-DD}.json` under an output directory
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    output_dir: PathBuf,
    file_prefix: String,
}

impl JsonReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>, file_prefix: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            file_prefix: file_prefix.into(),
        }
    }

    pub fn from_settings(settings: &ReportSettings) -> Self {
        Self::new(&settings.output_dir, &settings.file_prefix)
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn file_name(&self, country_name: &str, date: NaiveDate) -> String {
        let country: String = country_name
            .trim()
            .chars()
            .map(|c| {
                if c.is_whitespace() || matches!(c, '/' | '\\' | ':') {
                    '_'
                } else {
                    c
                }
            })
            .collect();
        format!(
            "{}_{}_{}.json",
            self.file_prefix,
            country,
            date.format("%Y-%m-%d")
        )
    }

    /// Write an already built report
    pub async fn write_dated(&self, report: &AuditReport) -> Result<PathBuf> {
        let path = self
            .output_dir
            .join(self.file_name(&report.country, report.generated_on));

        tokio::fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| Error::Report(format!("{}: {}", self.output_dir.display(), e)))?;

        let body = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&path, body)
            .await
            .map_err(|e| Error::Report(format!("{}: {}", path.display(), e)))?;

        tracing::info!(
            path = %path.display(),
            country = %report.country,
            total = report.executive_summary.first().map(|r| r.count).unwrap_or(0),
            "Audit report written"
        );

        Ok(path)
    }
}

#[async_trait]
impl ReportWriter for JsonReportWriter {
    async fn write(
        &self,
        leads: &[ProcessedLead],
        stats: &AnalysisStats,
        narrative: &str,
        country_name: &str,
    ) -> Result<PathBuf> {
        let report = AuditReport::build(
            leads,
            stats,
            narrative,
            country_name,
            Utc::now().date_naive(),
        );
        self.write_dated(&report).await
    }
}
