//! Lead Classifier
//!
//! Ordered decision procedure over one record. First match wins:
//! 1. Format check against the country rule → `Invalid`
//! 2. Operator denial in the notes → `Invalid`
//! 3. Wrong-party signal in the notes → `Special`
//! 4. Otherwise `Contactability`, with a reason picked from the notes and
//!    the attempt count
//!
//! The classifier is pure and total. It holds no mutable state, so one
//! instance can be shared across threads.

use lead_audit_config::{constants::classification, ClassifierSettings, KeywordTables};
use lead_audit_core::{
    normalize_phone, Classification, CountryRule, LeadStatus, ProcessedLead, RawLead,
};

pub const REASON_BAD_FORMAT: &str =
    "Formato de teléfono incorrecto (cantidad de dígitos o prefijo inválido)";
pub const REASON_OPERATOR_DENIAL: &str =
    "Operadora/Agente indica explícitamente que el número no existe o está fuera de servicio";
pub const REASON_WRONG_PARTY: &str =
    "RCPE: Teléfono con formato correcto pero usuario indica EQUIVOCADO o NO ES LA PERSONA.";
pub const REASON_VALID_PREFIX: &str = "Formato válido. ";
pub const REASON_VOICEMAIL: &str =
    "Reportado como Buzón/Ocupado (Problema de Contactabilidad). Sugerido: SMS/WhatsApp.";
pub const REASON_RECOVERABLE: &str =
    "Sin evidencia de error de línea ni rechazo explícito. Potencialmente recuperable.";

/// Tunable inputs of the decision procedure
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifierPolicy {
    pub keywords: KeywordTables,
    /// Attempts at or above this count are reported as contact fatigue
    pub fatigue_threshold: u32,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            keywords: KeywordTables::v1(),
            fatigue_threshold: classification::FATIGUE_ATTEMPTS_THRESHOLD,
        }
    }
}

impl From<&ClassifierSettings> for ClassifierPolicy {
    fn from(settings: &ClassifierSettings) -> Self {
        Self {
            keywords: settings.keywords.clone().normalized(),
            fatigue_threshold: settings.fatigue_threshold,
        }
    }
}

/// Applies the decision procedure with one policy
#[derive(Debug, Clone, Default)]
pub struct LeadClassifier {
    policy: ClassifierPolicy,
}

impl LeadClassifier {
    pub fn new(policy: ClassifierPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &ClassifierPolicy {
        &self.policy
    }

    /// Classify one phone/notes pair against a rule
    pub fn classify(
        &self,
        phone: &str,
        attempts: u32,
        notes: &str,
        rule: &CountryRule,
    ) -> Classification {
        let clean_phone = normalize_phone(phone);
        self.classify_clean(&clean_phone, attempts, notes, rule)
    }

    /// Classify a full record, normalizing its phone once
    pub fn process(&self, raw: &RawLead, rule: &CountryRule) -> ProcessedLead {
        let clean_phone = normalize_phone(&raw.phone);
        let classification = self.classify_clean(&clean_phone, raw.attempts, &raw.notes, rule);
        ProcessedLead::new(raw, clean_phone, classification)
    }

    fn classify_clean(
        &self,
        clean_phone: &str,
        attempts: u32,
        notes: &str,
        rule: &CountryRule,
    ) -> Classification {
        if !rule.matches(clean_phone) {
            return Classification {
                status: LeadStatus::Invalid,
                reason: REASON_BAD_FORMAT.to_string(),
            };
        }

        let notes_lower = notes.to_lowercase();
        let keywords = &self.policy.keywords;

        if keywords.mentions_operator_denial(&notes_lower) {
            return Classification {
                status: LeadStatus::Invalid,
                reason: REASON_OPERATOR_DENIAL.to_string(),
            };
        }

        if keywords.mentions_wrong_party(&notes_lower) {
            return Classification {
                status: LeadStatus::Special,
                reason: REASON_WRONG_PARTY.to_string(),
            };
        }

        let detail = if keywords.mentions_voicemail_busy(&notes_lower) {
            REASON_VOICEMAIL.to_string()
        } else if attempts >= self.policy.fatigue_threshold {
            format!(
                "Sin contacto tras {} intentos (Fatiga de contacto). Sugerido: Cambio de canal.",
                attempts
            )
        } else {
            REASON_RECOVERABLE.to_string()
        };

        Classification {
            status: LeadStatus::Contactability,
            reason: format!("{}{}", REASON_VALID_PREFIX, detail),
        }
    }
}
