//! Static country rule catalog
//!
//! Every pattern accepts an optional `+` or `00` international prefix and
//! the calling code, then requires the exact count of significant digits
//! with the country's leading-digit constraints. Patterns run against the
//! normalized phone (digits plus optional leading `+`).

use lead_audit_core::CountryRule;
use once_cell::sync::Lazy;
use regex::Regex;

/// (name, code, pattern, example)
const CATALOG: &[(&str, &str, &str, &str)] = &[
    // 10 digits; mobile starts with 3, fixed with 60
    (
        "Colombia",
        "CO",
        r"^(?:(?:\+|00)?57)?([36]\d{9})$",
        "3123456789 (Móvil) / 6012345678 (Fijo)",
    ),
    // Mobile 09 + 8 digits, fixed 0[2-7] + 7 digits; trunk 0 dropped after +593
    (
        "Ecuador",
        "EC",
        r"^(?:(?:\+|00)?593)?(?:0?9\d{8}|0?[2-7]\d{7})$",
        "0991234567",
    ),
    // 10 digits, mobile and fixed alike
    (
        "México",
        "MX",
        r"^(?:(?:\+|00)?52)?(\d{10})$",
        "5512345678",
    ),
    // 8 digits; mobile 3/8/9, fixed 2
    (
        "Honduras",
        "HN",
        r"^(?:(?:\+|00)?504)?([2389]\d{7})$",
        "91234567",
    ),
    // 8 digits; mobile 3-5, fixed 2/6/7
    (
        "Guatemala",
        "GT",
        r"^(?:(?:\+|00)?502)?([2-7]\d{7})$",
        "51234567",
    ),
    // 10 significant digits (area + subscriber, no 15); +54 9 and trunk 0 optional
    (
        "Argentina",
        "AR",
        r"^(?:(?:(?:\+|00)?54)?(?:9)?(?:0)?)?([1-9]\d{9})$",
        "11 1234 5678 (Sin 15, 10 dígitos total)",
    ),
    // 9 digits since 2016
    (
        "Chile",
        "CL",
        r"^(?:(?:\+|00)?56)?(\d{9})$",
        "912345678",
    ),
    // Mobile 09 + 8 digits, fixed 0[2-8] + 7 digits
    (
        "Paraguay",
        "PY",
        r"^(?:(?:\+|00)?595)?(0?9\d{8}|0?[2-8]\d{7})$",
        "0981234567",
    ),
    // Mobile 09 + 7 digits, fixed 8 digits starting 2 or 4
    (
        "Uruguay",
        "UY",
        r"^(?:(?:\+|00)?598)?(0?9\d{7}|[24]\d{7})$",
        "099123456",
    ),
    // DDD + 9 + 8 digits for mobile, DDD + 8 digits (2-5) for fixed
    (
        "Brasil",
        "BR",
        r"^(?:(?:\+|00)?55)?([1-9]{2})(?:9[1-9]\d{7}|[2-5]\d{7})$",
        "11 91234 5678",
    ),
    // Mobile 9 + 8 digits, Lima fixed (0)1 + 7 digits
    (
        "Perú",
        "PE",
        r"^(?:(?:\+|00)?51)?(9\d{8}|0?1\d{7})$",
        "912345678",
    ),
    // 9 digits; mobile 6/7, fixed 8/9
    (
        "España",
        "ES",
        r"^(?:(?:\+|00)?34)?([6789]\d{8})$",
        "612345678",
    ),
    // 9 digits; mobile 9, fixed 2
    (
        "Portugal",
        "PT",
        r"^(?:(?:\+|00)?351)?([29]\d{8})$",
        "912345678",
    ),
    // Mobile ranges 015/016/017 + 7-9 digits
    (
        "Alemania",
        "DE",
        r"^(?:(?:\+|00)?49)?(0?1[567]\d{7,9})$",
        "01701234567",
    ),
];

static BUILTIN_RULES: Lazy<Vec<CountryRule>> = Lazy::new(|| {
    CATALOG
        .iter()
        .map(|(name, code, pattern, example)| {
            let regex = Regex::new(pattern).unwrap_or_else(|e| {
                panic!("built-in pattern for {} does not compile: {}", name, e)
            });
            CountryRule::new(*name, *code, regex, *example)
        })
        .collect()
});

/// Read-only catalog of country rules
#[derive(Debug, Clone, Copy, Default)]
pub struct CountryRuleRegistry;

impl CountryRuleRegistry {
    pub fn new() -> Self {
        Self
    }

    /// All rules in catalog order
    pub fn list(&self) -> &'static [CountryRule] {
        BUILTIN_RULES.as_slice()
    }

    /// Find a rule by display name or code, ignoring case
    pub fn lookup(&self, name: &str) -> Option<CountryRule> {
        let wanted = name.trim().to_lowercase();
        if wanted.is_empty() {
            return None;
        }
        self.list()
            .iter()
            .find(|rule| rule.name().to_lowercase() == wanted || rule.code().to_lowercase() == wanted)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.list().len()
    }

    pub fn is_empty(&self) -> bool {
        self.list().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str) -> CountryRule {
        CountryRuleRegistry::new().lookup(name).unwrap()
    }

    #[test]
    fn test_every_builtin_pattern_compiles() {
        for (name, _, pattern, _) in CATALOG {
            assert!(Regex::new(pattern).is_ok(), "{} pattern does not compile", name);
        }
    }

    #[test]
    fn test_catalog_complete() {
        let registry = CountryRuleRegistry::new();
        assert_eq!(registry.len(), CATALOG.len());
        assert_eq!(registry.len(), 14);
        assert_eq!(registry.list()[0].name(), "Colombia");
        assert_eq!(registry.list()[13].code(), "DE");
    }

    #[test]
    fn test_lookup_by_name_or_code() {
        let registry = CountryRuleRegistry::new();
        assert_eq!(registry.lookup("colombia").unwrap().code(), "CO");
        assert_eq!(registry.lookup("es").unwrap().name(), "España");
        assert_eq!(registry.lookup(" México ").unwrap().code(), "MX");
        assert!(registry.lookup("Atlantis").is_none());
        assert!(registry.lookup("").is_none());
    }

    #[test]
    fn test_colombia() {
        let co = rule("CO");
        assert!(co.matches("3123456789"));
        assert!(co.matches("6012345678"));
        assert!(co.matches("+573123456789"));
        assert!(co.matches("00573123456789"));
        assert!(!co.matches("123"));
        assert!(!co.matches("2123456789"));
        assert!(!co.matches("312345678"));
    }

    #[test]
    fn test_ecuador() {
        let ec = rule("EC");
        assert!(ec.matches("0991234567"));
        assert!(ec.matches("+593991234567"));
        assert!(ec.matches("022345678"));
        assert!(!ec.matches("0812345678"));
    }

    #[test]
    fn test_mexico_ten_digits() {
        let mx = rule("MX");
        assert!(mx.matches("5512345678"));
        assert!(mx.matches("+525512345678"));
        assert!(!mx.matches("551234567"));
    }

    #[test]
    fn test_central_america() {
        assert!(rule("HN").matches("91234567"));
        assert!(!rule("HN").matches("41234567"));
        assert!(rule("GT").matches("51234567"));
        assert!(!rule("GT").matches("81234567"));
    }

    #[test]
    fn test_argentina_mobile_prefix() {
        let ar = rule("AR");
        assert!(ar.matches("1112345678"));
        assert!(ar.matches("+5491112345678"));
        assert!(!ar.matches("0112345678"));
    }

    #[test]
    fn test_southern_cone() {
        assert!(rule("CL").matches("912345678"));
        assert!(rule("CL").matches("+56912345678"));
        assert!(rule("PY").matches("0981234567"));
        assert!(rule("UY").matches("099123456"));
        assert!(rule("UY").matches("24123456"));
        assert!(!rule("UY").matches("34123456"));
    }

    #[test]
    fn test_brazil() {
        let br = rule("BR");
        assert!(br.matches("11912345678"));
        assert!(br.matches("1132345678"));
        assert!(br.matches("+5511912345678"));
        assert!(!br.matches("11812345678"));
    }

    #[test]
    fn test_peru() {
        assert!(rule("PE").matches("912345678"));
        assert!(rule("PE").matches("012345678"));
        assert!(!rule("PE").matches("812345678"));
    }

    #[test]
    fn test_iberia() {
        assert!(rule("ES").matches("612345678"));
        assert!(rule("ES").matches("0034912345678"));
        assert!(!rule("ES").matches("512345678"));
        assert!(rule("PT").matches("912345678"));
        assert!(!rule("PT").matches("812345678"));
    }

    #[test]
    fn test_germany_mobile_ranges() {
        let de = rule("DE");
        assert!(de.matches("01701234567"));
        assert!(de.matches("+491701234567"));
        assert!(!de.matches("01801234567"));
    }
}
