//! Agent-note keyword vocabularies
//!
//! The classifier receives a `KeywordTables` value explicitly. Matching is a
//! plain substring test over lowercased notes, so every keyword is stored
//! lowercased.

use serde::{Deserialize, Serialize};

/// Version tag of the built-in vocabulary
pub const DEFAULT_VERSION: &str = "v1";

/// "Line does not exist / out of service / not a subscriber"
pub const OPERATOR_DENIAL_V1: &[&str] = &[
    "no existe",
    "fuera de servicio",
    "no es abonado",
    "número no válido",
    "numero no valido",
    "incompleto",
    "errado",
    "no corresponde",
    "imposible conectar",
    "linea muerta",
    "no en servicio",
    "no habilitado",
    "suspendido",
];

/// "Voicemail / busy / no answer"
pub const VOICEMAIL_BUSY_V1: &[&str] = &[
    "buzón",
    "buzon",
    "ocupado",
    "no contesta",
    "sin respuesta",
    "contestadora",
    "llamada perdida",
    "no atiende",
    "timbra",
    "cuelga",
    "apagar",
    "apagado",
];

/// "Wrong person / doesn't live there / not the company / never asked"
pub const WRONG_PARTY_V1: &[&str] = &[
    "equivocado",
    "no conoce",
    "no es la persona",
    "no vive ahí",
    "no vive ahi",
    "no trabaja",
    "baja",
    "ya no pertenece",
    "error registro",
    "no es la empresa",
    "no titular",
    "desconoce",
    "no solicitó",
    "no solicito",
    "equivocada",
];

/// Versioned keyword vocabulary consumed by the classifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordTables {
    pub version: String,
    pub operator_denial: Vec<String>,
    pub wrong_party: Vec<String>,
    pub voicemail_busy: Vec<String>,
}

impl Default for KeywordTables {
    fn default() -> Self {
        Self::v1()
    }
}

impl KeywordTables {
    /// Built-in vocabulary
    pub fn v1() -> Self {
        Self {
            version: DEFAULT_VERSION.to_string(),
            operator_denial: to_owned(OPERATOR_DENIAL_V1),
            wrong_party: to_owned(WRONG_PARTY_V1),
            voicemail_busy: to_owned(VOICEMAIL_BUSY_V1),
        }
    }

    /// Custom vocabulary. Keywords are lowercased and blanks dropped.
    pub fn new(
        version: impl Into<String>,
        operator_denial: Vec<String>,
        wrong_party: Vec<String>,
        voicemail_busy: Vec<String>,
    ) -> Self {
        Self {
            version: version.into(),
            operator_denial,
            wrong_party,
            voicemail_busy,
        }
        .normalized()
    }

    /// Lowercase every keyword and drop empty ones. An empty keyword would
    /// match every note.
    pub fn normalized(mut self) -> Self {
        for list in [
            &mut self.operator_denial,
            &mut self.wrong_party,
            &mut self.voicemail_busy,
        ] {
            *list = list
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();
        }
        self
    }

    pub fn mentions_operator_denial(&self, notes_lower: &str) -> bool {
        contains_any(notes_lower, &self.operator_denial)
    }

    pub fn mentions_wrong_party(&self, notes_lower: &str) -> bool {
        contains_any(notes_lower, &self.wrong_party)
    }

    pub fn mentions_voicemail_busy(&self, notes_lower: &str) -> bool {
        contains_any(notes_lower, &self.voicemail_busy)
    }
}

fn to_owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}
