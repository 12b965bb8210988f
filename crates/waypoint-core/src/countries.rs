//! Country classification reference table.
//!
//! Visa and budget rules only need a handful of facts about a country: EU
//! membership, Schengen membership, whether it counts as European for travel
//! distance, and whether a destination city is expensive. The lists below are
//! a simplified static snapshot; callers that need current policy can supply
//! their own [`CountryClassifier`].

/// Read-only classification of countries and destinations.
pub trait CountryClassifier: Send + Sync {
    /// Whether the ISO 3166-1 alpha-2 code is an EU member state.
    fn is_eu_member(&self, code: &str) -> bool;

    /// Whether the code belongs to the Schengen area.
    fn is_schengen(&self, code: &str) -> bool;

    /// Whether travel to or from the code counts as European (short haul).
    fn is_european(&self, code: &str) -> bool;

    /// Whether the destination city has above-average accommodation costs.
    fn is_high_cost_city(&self, city: &str) -> bool;

    /// Resolves a country name or known code to an upper-case ISO code.
    fn resolve(&self, name_or_code: &str) -> Option<String>;
}

const EU_MEMBERS: &[&str] = &[
    "AT", "BE", "BG", "HR", "CY", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IE", "IT",
    "LV", "LT", "LU", "MT", "NL", "PL", "PT", "RO", "SK", "SI", "ES", "SE",
];

const SCHENGEN: &[&str] = &[
    "AT", "BE", "BG", "HR", "CZ", "DK", "EE", "FI", "FR", "DE", "GR", "HU", "IS", "IT", "LV",
    "LI", "LT", "LU", "MT", "NL", "NO", "PL", "PT", "RO", "SK", "SI", "ES", "SE", "CH",
];

/// Non-EU countries that still count as short-haul European travel.
const WIDER_EUROPE: &[&str] = &[
    "AL", "BA", "CH", "GB", "IS", "LI", "ME", "MK", "NO", "RS", "TR", "UA", "MD", "GE", "AM",
    "XK",
];

const HIGH_COST_CITIES: &[&str] = &[
    "london",
    "paris",
    "zurich",
    "geneva",
    "oslo",
    "copenhagen",
    "stockholm",
    "reykjavik",
    "dublin",
    "amsterdam",
    "brussels",
    "luxembourg",
    "vienna",
    "helsinki",
];

/// Country names (lower case) and their ISO codes.
const COUNTRY_NAMES: &[(&str, &str)] = &[
    ("austria", "AT"),
    ("belgium", "BE"),
    ("bulgaria", "BG"),
    ("croatia", "HR"),
    ("cyprus", "CY"),
    ("czech republic", "CZ"),
    ("czechia", "CZ"),
    ("denmark", "DK"),
    ("estonia", "EE"),
    ("finland", "FI"),
    ("france", "FR"),
    ("germany", "DE"),
    ("greece", "GR"),
    ("hungary", "HU"),
    ("ireland", "IE"),
    ("italy", "IT"),
    ("latvia", "LV"),
    ("lithuania", "LT"),
    ("luxembourg", "LU"),
    ("malta", "MT"),
    ("netherlands", "NL"),
    ("poland", "PL"),
    ("portugal", "PT"),
    ("romania", "RO"),
    ("slovakia", "SK"),
    ("slovenia", "SI"),
    ("spain", "ES"),
    ("sweden", "SE"),
    ("iceland", "IS"),
    ("liechtenstein", "LI"),
    ("norway", "NO"),
    ("switzerland", "CH"),
    ("united kingdom", "GB"),
    ("great britain", "GB"),
    ("turkey", "TR"),
    ("türkiye", "TR"),
    ("albania", "AL"),
    ("serbia", "RS"),
    ("montenegro", "ME"),
    ("north macedonia", "MK"),
    ("bosnia and herzegovina", "BA"),
    ("ukraine", "UA"),
    ("moldova", "MD"),
    ("georgia", "GE"),
    ("armenia", "AM"),
    ("morocco", "MA"),
    ("tunisia", "TN"),
    ("egypt", "EG"),
    ("jordan", "JO"),
    ("lebanon", "LB"),
    ("israel", "IL"),
    ("brazil", "BR"),
    ("india", "IN"),
    ("united states", "US"),
];

/// Static classification table bundled with the crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticCountries;

impl CountryClassifier for StaticCountries {
    fn is_eu_member(&self, code: &str) -> bool {
        contains_code(EU_MEMBERS, code)
    }

    fn is_schengen(&self, code: &str) -> bool {
        contains_code(SCHENGEN, code)
    }

    fn is_european(&self, code: &str) -> bool {
        self.is_eu_member(code) || contains_code(WIDER_EUROPE, code)
    }

    fn is_high_cost_city(&self, city: &str) -> bool {
        let city = city.trim().to_lowercase();
        HIGH_COST_CITIES.iter().any(|c| city.contains(c))
    }

    fn resolve(&self, name_or_code: &str) -> Option<String> {
        let trimmed = name_or_code.trim();
        if trimmed.len() == 2 {
            let code = trimmed.to_ascii_uppercase();
            return is_known_code(&code).then_some(code);
        }
        let lower = trimmed.to_lowercase();
        COUNTRY_NAMES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, code)| (*code).to_string())
    }
}

fn is_known_code(code: &str) -> bool {
    contains_code(EU_MEMBERS, code)
        || contains_code(SCHENGEN, code)
        || contains_code(WIDER_EUROPE, code)
        || COUNTRY_NAMES.iter().any(|(_, c)| *c == code)
}

fn contains_code(list: &[&str], code: &str) -> bool {
    list.iter().any(|c| c.eq_ignore_ascii_case(code.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership_lookups() {
        let table = StaticCountries;
        assert!(table.is_eu_member("de"));
        assert!(!table.is_eu_member("MA"));
        assert!(table.is_schengen("NO"));
        assert!(!table.is_eu_member("NO"));
        assert!(table.is_european("TR"));
        assert!(!table.is_european("MA"));
    }

    #[test]
    fn test_resolve_names_and_codes() {
        let table = StaticCountries;
        assert_eq!(table.resolve("Germany").as_deref(), Some("DE"));
        assert_eq!(table.resolve(" es ").as_deref(), Some("ES"));
        assert_eq!(table.resolve("Czech Republic").as_deref(), Some("CZ"));
        assert_eq!(table.resolve("Atlantis"), None);
        assert_eq!(table.resolve("zz"), None);
    }

    #[test]
    fn test_high_cost_city_is_case_insensitive() {
        assert!(StaticCountries.is_high_cost_city("Amsterdam"));
        assert!(!StaticCountries.is_high_cost_city("Valencia"));
    }
}
