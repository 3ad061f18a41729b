//! Country code normalization
//!
//! The payments platform only accepts ISO 3166-1 alpha-2 codes. Buyers and
//! upstream links sometimes carry common aliases instead.

/// Non-ISO aliases and the ISO code they stand for
const COUNTRY_ALIASES: &[(&str, &str)] = &[("UK", "GB"), ("EL", "GR")];

/// Display names for the countries the storefront ships to most
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("AU", "Australia"),
    ("CA", "Canada"),
    ("DE", "Germany"),
    ("ES", "Spain"),
    ("FR", "France"),
    ("GB", "United Kingdom"),
    ("GR", "Greece"),
    ("IE", "Ireland"),
    ("IT", "Italy"),
    ("NL", "Netherlands"),
    ("US", "United States"),
];

/// Normalize a country code to its ISO form.
///
/// Trims and upper-cases the input, then resolves aliases. Blank input
/// yields `None`.
pub fn normalize_country(input: &str) -> Option<String> {
    let code = input.trim().to_uppercase();
    if code.is_empty() {
        return None;
    }

    let iso = COUNTRY_ALIASES
        .iter()
        .find(|(alias, _)| *alias == code)
        .map_or(code.as_str(), |&(_, iso)| iso);

    Some(iso.to_string())
}

/// Human-readable name for a country code, falling back to the code itself
pub fn country_display_name(input: &str) -> String {
    let Some(code) = normalize_country(input) else {
        return String::new();
    };

    COUNTRY_NAMES
        .iter()
        .find(|(iso, _)| *iso == code)
        .map_or_else(|| code.clone(), |&(_, name)| name.to_string())
}
