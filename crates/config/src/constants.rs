//! Centralized constants for the lead audit engine
//!
//! Single source of truth for tuned heuristics, service defaults and
//! fallback texts. Settings default to these values and can override the
//! heuristics without touching the decision procedure.

/// Classification heuristics
pub mod classification {
    /// Attempts at or above which a recoverable lead is flagged as contact
    /// fatigue
    pub const FATIGUE_ATTEMPTS_THRESHOLD: u32 = 5;
}

/// Dynamic rule lookup
pub mod lookup {
    /// Maximum number of source citations kept from a lookup
    pub const MAX_SOURCES: usize = 3;

    /// Suffix appended to a rule example once the pattern was verified online
    pub const VERIFIED_EXAMPLE_SUFFIX: &str = "(validado vía búsqueda web)";

    /// Sampling temperature for the lookup request
    pub const TEMPERATURE: f32 = 0.1;
}

/// Narrative generation
pub mod narrative {
    /// Maximum problematic leads sent to the narrative generator
    pub const SAMPLE_LIMIT: usize = 20;

    /// Substituted when the service fails
    pub const FALLBACK_TEXT: &str = "Error al generar el reporte con IA. Por favor revise los datos manualmente en las otras secciones.";

    /// Substituted when the service answers with no text
    pub const EMPTY_TEXT: &str = "No se pudo generar el reporte narrativo.";
}

/// Service endpoints (defaults)
pub mod endpoints {
    /// Generative Language REST API
    pub const GEMINI_DEFAULT: &str = "https://generativelanguage.googleapis.com/v1beta";

    /// Model used for both lookup and narrative
    pub const GEMINI_MODEL: &str = "gemini-2.5-flash";

    /// Environment variable holding the API key
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
}

/// Timeouts (in milliseconds)
pub mod timeouts {
    /// Dynamic rule lookup, including the web search round-trip
    pub const LOOKUP_MS: u64 = 30_000;

    /// Narrative generation
    pub const NARRATIVE_MS: u64 = 60_000;
}

/// Report output
pub mod report {
    /// Default output directory
    pub const OUTPUT_DIR: &str = "reports";

    /// File name prefix
    pub const FILE_PREFIX: &str = "lead_audit";
}
