//! Lookup response parsing
//!
//! The lookup prompt asks for two marked blocks:
//!
//! ```text
//! REGEX_START
//! ^(\+?57)?3\d{9}$
//! REGEX_END
//!
//! EXPLANATION_START
//! En Colombia son 10 dígitos iniciando por 3.
//! EXPLANATION_END
//! ```
//!
//! Nothing here compiles the pattern; that gate belongs to the resolver.

use lead_audit_core::{PhoneFormatSearchResult, SourceCitation};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::wire::GroundingChunk;

static PATTERN_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)REGEX_START\s*(.*?)\s*REGEX_END").unwrap());

static EXPLANATION_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)EXPLANATION_START\s*(.*?)\s*EXPLANATION_END").unwrap());

static JS_LITERAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)^/(.+)/([gimsuy]*)$").unwrap());

/// Candidate pattern text, if the block is present and non-empty
pub fn extract_pattern(text: &str) -> Option<String> {
    let raw = PATTERN_BLOCK.captures(text)?.get(1)?.as_str();
    let pattern = strip_delimiters(raw);
    (!pattern.is_empty()).then_some(pattern)
}

/// Explanation text, if the block is present and non-empty
pub fn extract_explanation(text: &str) -> Option<String> {
    let explanation = EXPLANATION_BLOCK.captures(text)?.get(1)?.as_str().trim();
    (!explanation.is_empty()).then(|| explanation.to_string())
}

/// Build a search result from the response text and its grounding chunks
pub fn parse_lookup_response(
    text: &str,
    chunks: &[GroundingChunk],
    country_name: &str,
    max_sources: usize,
) -> Option<PhoneFormatSearchResult> {
    let regex_string = extract_pattern(text)?;
    let explanation = extract_explanation(text)
        .unwrap_or_else(|| format!("Formato validado vía web para {}", country_name));

    Some(PhoneFormatSearchResult {
        regex_string,
        explanation,
        sources: citations(chunks, max_sources),
    })
}

/// Web chunks carrying both a title and a uri, first `max` of them
fn citations(chunks: &[GroundingChunk], max: usize) -> Vec<SourceCitation> {
    chunks
        .iter()
        .filter_map(|chunk| {
            let web = chunk.web.as_ref()?;
            match (web.title.as_deref(), web.uri.as_deref()) {
                (Some(title), Some(uri)) if !title.is_empty() && !uri.is_empty() => {
                    Some(SourceCitation {
                        title: title.to_string(),
                        uri: uri.to_string(),
                    })
                }
                _ => None,
            }
        })
        .take(max)
        .collect()
}

/// Drop code fences and JavaScript `/.../flags` delimiters around a pattern.
/// The `i`, `m` and `s` flags become an inline group; `g`, `u` and `y` have
/// no meaning for a single match and are dropped.
fn strip_delimiters(raw: &str) -> String {
    let pattern = raw.trim().trim_matches('`').trim();
    let Some(caps) = JS_LITERAL.captures(pattern) else {
        return pattern.to_string();
    };
    let body = caps[1].trim();
    let flags: String = caps[2].chars().filter(|c| matches!(c, 'i' | 'm' | 's')).collect();
    if flags.is_empty() {
        body.to_string()
    } else {
        format!("(?{}){}", flags, body)
    }
}
