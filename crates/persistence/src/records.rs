//! JSON table record source
//!
//! Accepts the two shapes spreadsheet exports usually take:
//! - an array of arrays whose first row holds the headers
//! - an array of objects keyed by header
//!
//! Columns are located by header keywords, falling back to fixed positions
//! (`ID, Teléfono, Fecha, Observaciones, Cantidad de toques`).

use async_trait::async_trait;
use serde_json::Value;
use std::path::{Path, PathBuf};

use lead_audit_core::{Error, RawLead, RecordSource, Result};

const FALLBACK_ID: usize = 0;
const FALLBACK_PHONE: usize = 1;
const FALLBACK_NOTES: usize = 3;
const FALLBACK_ATTEMPTS: usize = 4;

/// Column positions inferred from a header row
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub id: Option<usize>,
    pub phone: Option<usize>,
    pub date: Option<usize>,
    pub notes: Option<usize>,
    pub attempts: Option<usize>,
}

impl ColumnMap {
    /// First header matching each column's keywords, case-insensitive
    pub fn infer<S: AsRef<str>>(headers: &[S]) -> Self {
        let headers: Vec<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();
        let find = |keys: &[&str]| {
            headers
                .iter()
                .position(|h| keys.iter().any(|k| h.contains(k)))
        };

        Self {
            id: find(&["id"]),
            phone: find(&["tel", "cel"]),
            date: find(&["fecha"]),
            notes: find(&["obs", "comentario"]),
            attempts: find(&["toque", "intento", "cantidad"]),
        }
    }

    fn to_lead(self, row: &[Value]) -> RawLead {
        let text = |idx: usize| row.get(idx).map(cell_text).unwrap_or_default();

        let mut lead = RawLead::new(
            text(self.id.unwrap_or(FALLBACK_ID)),
            text(self.phone.unwrap_or(FALLBACK_PHONE)),
        )
        .with_notes(text(self.notes.unwrap_or(FALLBACK_NOTES)))
        .with_attempts(
            row.get(self.attempts.unwrap_or(FALLBACK_ATTEMPTS))
                .map(cell_attempts)
                .unwrap_or(0),
        );

        if let Some(date) = self.date.map(text).filter(|d| !d.is_empty()) {
            lead = lead.with_date(date);
        }
        lead
    }
}

/// Lead records from a JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonTableSource {
    path: PathBuf,
}

impl JsonTableSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Parse a JSON table already in memory
    pub fn parse(text: &str) -> Result<Vec<RawLead>> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Array(rows) = value else {
            return Err(Error::RecordSource(
                "expected a JSON array of rows".to_string(),
            ));
        };

        let (headers, body) = match rows.first() {
            None => return Err(Error::RecordSource("table has no rows".to_string())),
            Some(Value::Array(header_row)) => {
                let headers: Vec<String> = header_row.iter().map(cell_text).collect();
                let body: Vec<Vec<Value>> = rows[1..]
                    .iter()
                    .filter_map(|row| row.as_array().cloned())
                    .collect();
                (headers, body)
            }
            Some(Value::Object(_)) => {
                let objects: Vec<_> = rows.iter().filter_map(Value::as_object).collect();
                // Union of keys over every row, in first-seen order.
                let mut headers: Vec<String> = Vec::new();
                for key in objects.iter().flat_map(|obj| obj.keys()) {
                    if !headers.contains(key) {
                        headers.push(key.clone());
                    }
                }
                let body: Vec<Vec<Value>> = objects
                    .iter()
                    .map(|obj| {
                        headers
                            .iter()
                            .map(|h| obj.get(h).cloned().unwrap_or(Value::Null))
                            .collect()
                    })
                    .collect();
                (headers, body)
            }
            Some(other) => {
                return Err(Error::RecordSource(format!(
                    "unsupported row type: {}",
                    kind(other)
                )))
            }
        };

        if body.is_empty() {
            return Err(Error::RecordSource("table has no data rows".to_string()));
        }

        let columns = ColumnMap::infer(&headers);
        tracing::debug!(?columns, rows = body.len(), "Column layout inferred");

        let total = body.len();
        let leads: Vec<RawLead> = body
            .iter()
            .map(|row| columns.to_lead(row))
            .filter(RawLead::has_usable_phone)
            .collect();

        if leads.len() < total {
            tracing::debug!(
                dropped = total - leads.len(),
                "Dropped rows without a usable phone"
            );
        }

        Ok(leads)
    }
}

#[async_trait]
impl RecordSource for JsonTableSource {
    async fn load(&self) -> Result<Vec<RawLead>> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            Error::RecordSource(format!("{}: {}", self.path.display(), e))
        })?;
        Self::parse(&text)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Cell as text; whole numbers lose any `.0`
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Attempt counter; anything non-numeric or negative counts as zero
fn cell_attempts(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() && n > 0.0 => n.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_infer_columns() {
        let columns = ColumnMap::infer(&[
            "ID",
            "Teléfono",
            "Fecha",
            "Observaciones",
            "Cantidad de toques",
        ]);
        assert_eq!(
            columns,
            ColumnMap {
                id: Some(0),
                phone: Some(1),
                date: Some(2),
                notes: Some(3),
                attempts: Some(4),
            }
        );
    }

    #[test]
    fn test_infer_alternate_headers() {
        let columns = ColumnMap::infer(&["Celular", "Comentario del agente", "Intentos", "Lead ID"]);
        assert_eq!(columns.phone, Some(0));
        assert_eq!(columns.notes, Some(1));
        assert_eq!(columns.attempts, Some(2));
        assert_eq!(columns.id, Some(3));
        assert_eq!(columns.date, None);
    }

    #[test]
    fn test_array_rows_with_headers() {
        let text = json!([
            ["ID", "Teléfono", "Fecha", "Observaciones", "Cantidad de toques"],
            [101, 3123456789u64, "2024-05-01", "buzón de voz", 3],
            ["102", "+57 312 345 6789", null, null, "6"],
            [103, "", "2024-05-02", "sin número", 1]
        ])
        .to_string();

        let leads = JsonTableSource::parse(&text).unwrap();
        assert_eq!(leads.len(), 2);

        assert_eq!(leads[0].id, "101");
        assert_eq!(leads[0].phone, "3123456789");
        assert_eq!(leads[0].notes, "buzón de voz");
        assert_eq!(leads[0].attempts, 3);
        assert_eq!(leads[0].date.as_deref(), Some("2024-05-01"));

        assert_eq!(leads[1].phone, "+57 312 345 6789");
        assert_eq!(leads[1].notes, "");
        assert_eq!(leads[1].attempts, 6);
        assert_eq!(leads[1].date, None);
    }

    #[test]
    fn test_positional_fallback() {
        let text = json!([
            ["a", "b", "c", "d", "e"],
            ["7", "3123456789", "x", "persona equivocada", "2"]
        ])
        .to_string();

        let leads = JsonTableSource::parse(&text).unwrap();
        assert_eq!(leads[0].id, "7");
        assert_eq!(leads[0].phone, "3123456789");
        assert_eq!(leads[0].notes, "persona equivocada");
        assert_eq!(leads[0].attempts, 2);
    }

    #[test]
    fn test_object_rows() {
        let text = json!([
            {"ID": 1, "Teléfono": "3123456789", "Observaciones": "cuelga", "Intentos": 2},
            {"ID": 2, "Teléfono": "123"}
        ])
        .to_string();

        let leads = JsonTableSource::parse(&text).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].notes, "cuelga");
        assert_eq!(leads[0].attempts, 2);
        assert_eq!(leads[1].phone, "123");
        assert_eq!(leads[1].attempts, 0);
    }

    #[test]
    fn test_object_rows_with_sparse_first_row() {
        let text = json!([
            {"ID": 1, "Teléfono": "3123456789"},
            {"ID": 2, "Teléfono": "3123456789", "Observaciones": "no existe el número", "Intentos": 7}
        ])
        .to_string();

        let leads = JsonTableSource::parse(&text).unwrap();
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].notes, "");
        assert_eq!(leads[0].attempts, 0);
        assert_eq!(leads[1].id, "2");
        assert_eq!(leads[1].notes, "no existe el número");
        assert_eq!(leads[1].attempts, 7);
    }

    #[test]
    fn test_header_only_table_is_rejected() {
        assert!(matches!(
            JsonTableSource::parse(r#"[["ID", "Teléfono"]]"#),
            Err(Error::RecordSource(_))
        ));
    }

    #[test]
    fn test_rows_without_phones_are_not_an_error() {
        let text = json!([["ID", "Teléfono"], [1, ""], [2, null]]).to_string();
        assert!(JsonTableSource::parse(&text).unwrap().is_empty());
    }

    #[test]
    fn test_non_numeric_attempts() {
        assert_eq!(cell_attempts(&json!("muchos")), 0);
        assert_eq!(cell_attempts(&json!(-2)), 0);
        assert_eq!(cell_attempts(&json!(null)), 0);
        assert_eq!(cell_attempts(&json!("4")), 4);
        assert_eq!(cell_attempts(&json!(5.0)), 5);
    }

    #[test]
    fn test_number_cells_are_stringified() {
        assert_eq!(cell_text(&json!(3123456789u64)), "3123456789");
        assert_eq!(cell_text(&json!(3123456789.0)), "3123456789");
        assert_eq!(cell_text(&json!(null)), "");
    }

    #[test]
    fn test_rejects_bad_shapes() {
        assert!(matches!(
            JsonTableSource::parse("{}"),
            Err(Error::RecordSource(_))
        ));
        assert!(matches!(
            JsonTableSource::parse("[]"),
            Err(Error::RecordSource(_))
        ));
        assert!(matches!(
            JsonTableSource::parse("[1, 2]"),
            Err(Error::RecordSource(_))
        ));
        assert!(matches!(JsonTableSource::parse("not json"), Err(Error::Json(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!([["ID", "Teléfono"], [1, "912345678"]])
        )
        .unwrap();

        let source = JsonTableSource::new(file.path());
        let leads = source.load().await.unwrap();
        assert_eq!(leads.len(), 1);
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let source = JsonTableSource::new("/nonexistent/leads.json");
        assert!(matches!(source.load().await, Err(Error::RecordSource(_))));
    }
}
