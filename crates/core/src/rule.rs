//! Country numbering-plan rules
//!
//! A `CountryRule` always carries a compiled pattern. There is no way to
//! build one from raw text without going through `Regex::new`, so a rule
//! that exists is a rule that can classify.

use regex::Regex;
use serde::{Deserialize, Serialize, Serializer};

/// Per-country phone format rule
#[derive(Debug, Clone)]
pub struct CountryRule {
    name: String,
    code: String,
    pattern: Regex,
    example: String,
}

impl CountryRule {
    /// Build a rule from an already compiled pattern
    pub fn new(
        name: impl Into<String>,
        code: impl Into<String>,
        pattern: Regex,
        example: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            pattern,
            example: example.into(),
        }
    }

    /// Build a rule from pattern text, failing if it does not compile
    pub fn parse(
        name: impl Into<String>,
        code: impl Into<String>,
        pattern: &str,
        example: impl Into<String>,
    ) -> crate::Result<Self> {
        let compiled = Regex::new(pattern)?;
        Ok(Self::new(name, code, compiled, example))
    }

    /// Copy of this rule with a different pattern and example
    pub fn with_pattern(&self, pattern: Regex, example: impl Into<String>) -> Self {
        Self {
            name: self.name.clone(),
            code: self.code.clone(),
            pattern,
            example: example.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    /// Source text of the compiled pattern
    pub fn pattern_str(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn example(&self) -> &str {
        &self.example
    }

    /// Test an already normalized phone string against the rule
    pub fn matches(&self, clean_phone: &str) -> bool {
        self.pattern.is_match(clean_phone)
    }
}

impl PartialEq for CountryRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.code == other.code
            && self.pattern.as_str() == other.pattern.as_str()
            && self.example == other.example
    }
}

impl Eq for CountryRule {}

impl Serialize for CountryRule {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;

        let mut state = serializer.serialize_struct("CountryRule", 4)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("code", &self.code)?;
        state.serialize_field("pattern", self.pattern.as_str())?;
        state.serialize_field("example", &self.example)?;
        state.end()
    }
}

/// A web source cited by the dynamic lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCitation {
    pub title: String,
    pub uri: String,
}

/// Result of a dynamic numbering-plan lookup
///
/// `regex_string` is untrusted text and has not been compiled yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneFormatSearchResult {
    pub regex_string: String,
    pub explanation: String,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_uncompilable_pattern() {
        assert!(CountryRule::parse("Colombia", "CO", "(", "3123456789").is_err());
    }

    #[test]
    fn test_with_pattern_keeps_identity() {
        let rule = CountryRule::parse("Colombia", "CO", r"^3\d{9}$", "3123456789").unwrap();
        let other = rule.with_pattern(Regex::new(r"^\d+$").unwrap(), "any");

        assert_eq!(other.name(), "Colombia");
        assert_eq!(other.code(), "CO");
        assert_eq!(other.pattern_str(), r"^\d+$");
        assert_ne!(rule, other);
    }

    #[test]
    fn test_serializes_pattern_as_text() {
        let rule = CountryRule::parse("Chile", "CL", r"^\d{9}$", "912345678").unwrap();
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(json["pattern"], r"^\d{9}$");
        assert_eq!(json["code"], "CL");
    }
}
