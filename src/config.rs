//! Named configuration tables and run settings.
//!
//! Every keyword list the classifiers and extractors depend on lives here as
//! an injectable table: locale keywords for recency, region keywords for the
//! geographic filter, marker words for field segmentation, currency symbols,
//! and the tool dictionary for tag partitioning. Components take references
//! to these tables instead of hardcoding them, so tests can swap them out.

use std::ops::Range;

// ============================================================================
// LOCALE TABLES (recency)
// ============================================================================

/// Bilingual keyword tables consumed by the recency classifier.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    /// Tokens that mean "posted moments ago" regardless of any date math.
    pub instant_fresh: &'static [&'static str],
    pub today: &'static [&'static str],
    pub yesterday: &'static [&'static str],
    /// Month abbreviations, index 0 = January. Each month lists all accepted
    /// spellings (English first, then Spanish).
    pub months: &'static [&'static [&'static str]],
}

pub const DEFAULT_LOCALE: LocaleTable = LocaleTable {
    instant_fresh: &["just now", "just", "new", "nuevo", "nueva"],
    today: &["today", "hoy"],
    yesterday: &["yesterday", "ayer"],
    months: &[
        &["jan", "ene", "enero", "january"],
        &["feb", "febrero", "february"],
        &["mar", "marzo", "march"],
        &["apr", "abr", "abril", "april"],
        &["may", "mayo"],
        &["jun", "junio", "june"],
        &["jul", "julio", "july"],
        &["aug", "ago", "agosto", "august"],
        &["sep", "sept", "septiembre", "september"],
        &["oct", "octubre", "october"],
        &["nov", "noviembre", "november"],
        &["dec", "dic", "diciembre", "december"],
    ],
};

// ============================================================================
// REGION TABLE (geographic filter)
// ============================================================================

/// Region keywords: countries, regional aliases, and major-city aliases.
/// Matching is case-insensitive substring; city aliases exist because many
/// postings name a city ("Buenos Aires") without naming the country.
pub const LATAM_KEYWORDS: &[&str] = &[
    "Latin America",
    "LATAM",
    "Remote - Latin America",
    "Argentina",
    "Bolivia",
    "Brazil",
    "Brasil",
    "Chile",
    "Colombia",
    "Costa Rica",
    "Cuba",
    "Dominican Republic",
    "Ecuador",
    "El Salvador",
    "Guatemala",
    "Honduras",
    "Mexico",
    "México",
    "Nicaragua",
    "Panama",
    "Paraguay",
    "Peru",
    "Perú",
    "Puerto Rico",
    "Uruguay",
    "Venezuela",
    // City aliases
    "Buenos Aires",
    "Mexico City",
    "CDMX",
    "Bogotá",
    "Bogota",
    "São Paulo",
    "Sao Paulo",
    "Santiago",
    "Lima",
    "Montevideo",
    "Medellín",
    "Medellin",
    "Guadalajara",
    "Monterrey",
];

// ============================================================================
// SALARY / CURRENCY TABLES
// ============================================================================

/// Currency symbols that disqualify a posting outright.
pub const DISALLOWED_CURRENCY_SYMBOLS: &[&str] = &["₹", "€", "£"];

/// Suffix markers for pay-period classification, lowercase.
pub const HOURLY_MARKERS: &[&str] = &["/hr", "/hour", "per hour", "por hora", "/hora", "hourly", "/h"];
pub const MONTHLY_MARKERS: &[&str] = &["/mo", "/mes", "/month", "per month", "mensual", "monthly"];
pub const YEARLY_MARKERS: &[&str] = &["/yr", "/year", "per year", "anual", "yearly", "/año", "annum"];

// ============================================================================
// FIELD SEGMENTATION TABLES
// ============================================================================

/// Labeled role lines override the page heading when present; some sites put
/// the company name in the heading and the role in a labeled line.
pub const ROLE_LINE_MARKERS: &[&str] = &["Role:", "Rol:", "Puesto:"];

/// Ordered marker words that open the qualifications section of a posting.
pub const QUALIFICATION_MARKERS: &[&str] = &[
    "Requirements",
    "Qualifications",
    "Skills",
    "What we look for",
    "Requisitos",
    "Habilidades",
];

/// Known tool/technology keywords for tag partitioning, lowercase.
pub const TOOL_KEYWORDS: &[&str] = &[
    "python", "react", "node", "aws", "docker", "sql", "java", "typescript",
    "javascript", "kubernetes", "terraform", "golang", "rust", "figma",
    "salesforce", "hubspot", "excel", "tableau",
];

/// When no tag matches the tool dictionary, promote this many raw tags into
/// the tools list so the field is never trivially empty.
pub const TOOL_PROMOTION_COUNT: usize = 3;

// ============================================================================
// SENTINELS & CAPS
// ============================================================================

pub const SENTINEL_SEE_DESCRIPTION: &str = "see description";
pub const SENTINEL_SEE_JOB_DESCRIPTION: &str = "see job description";
pub const SENTINEL_NOT_AVAILABLE: &str = "not available";
pub const SENTINEL_NOT_DISCLOSED: &str = "not disclosed";

pub const DESCRIPTION_SNIPPET_CAP: usize = 1000;
pub const QUALIFICATIONS_CAP: usize = 1500;
pub const COMPANY_DESCRIPTION_CAP: usize = 800;

/// Image alt text longer than this is a caption, not a company name.
pub const COMPANY_ALT_MAX_LEN: usize = 80;

// ============================================================================
// SITE PROFILES
// ============================================================================

/// Per-site discovery and extraction knobs. Patterns are tried in order;
/// the first selector yielding any candidate wins.
#[derive(Debug, Clone)]
pub struct SiteProfile {
    pub name: &'static str,
    pub origin: &'static str,
    pub listing_path: &'static str,
    /// Query parameter carrying the role keyword, if the site supports one.
    pub keyword_param: Option<&'static str>,
    /// Ordered candidate-link locator patterns (CSS selectors).
    pub card_patterns: &'static [&'static str],
    pub location_label: &'static str,
}

pub const WELLFOUND: SiteProfile = SiteProfile {
    name: "wellfound",
    origin: "https://wellfound.com",
    listing_path: "/jobs",
    keyword_param: Some("role"),
    card_patterns: &[
        "div[data-test='JobCard'] a[href]",
        "div[class^='styles_component__'] a[href]",
        "a[href*='/jobs/']",
    ],
    location_label: "Latin America (Remote)",
};

pub const WEREMOTO: SiteProfile = SiteProfile {
    name: "weremoto",
    origin: "https://www.weremoto.com",
    listing_path: "/remote-jobs",
    keyword_param: None,
    card_patterns: &["a[href*='/job-post/']"],
    location_label: "Latin America (Remote)",
};

pub fn site_profile(name: &str) -> Option<&'static SiteProfile> {
    match name.to_ascii_lowercase().as_str() {
        "wellfound" => Some(&WELLFOUND),
        "weremoto" => Some(&WEREMOTO),
        _ => None,
    }
}

// ============================================================================
// RUN SETTINGS
// ============================================================================

/// All knobs for one run. Filters are individually togglable; the `test`
/// invocation flag turns off only the recency filter.
#[derive(Debug, Clone)]
pub struct RunSettings {
    /// Role keyword, or "all".
    pub keyword: String,
    /// Maximum number of records to emit.
    pub limit: usize,
    pub check_recency: bool,
    pub check_region: bool,
    pub check_currency: bool,
    /// Randomized politeness delay between detail fetches, in ms.
    pub delay_ms: Range<u64>,
    /// Optional session credential forwarded to the content supplier.
    pub session_token: Option<String>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            keyword: "all".into(),
            limit: 5,
            check_recency: true,
            check_region: true,
            check_currency: true,
            delay_ms: 1000..3000,
            session_token: None,
        }
    }
}

impl RunSettings {
    /// Test-mode settings: recency filtering off, no politeness delay.
    pub fn test_mode(mut self) -> Self {
        self.check_recency = false;
        self.delay_ms = 0..1;
        self
    }

    pub fn wants_all_roles(&self) -> bool {
        self.keyword.is_empty() || self.keyword.eq_ignore_ascii_case("all")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_site_profile_lookup() {
        assert_eq!(site_profile("wellfound").unwrap().name, "wellfound");
        assert_eq!(site_profile("WeRemoto").unwrap().name, "weremoto");
        assert!(site_profile("linkedin").is_none());
    }

    #[test]
    fn test_test_mode_disables_only_recency() {
        let settings = RunSettings::default().test_mode();
        assert!(!settings.check_recency);
        assert!(settings.check_region);
        assert!(settings.check_currency);
    }

    #[test]
    fn test_wants_all_roles() {
        assert!(RunSettings::default().wants_all_roles());
        let named = RunSettings {
            keyword: "backend".into(),
            ..Default::default()
        };
        assert!(!named.wants_all_roles());
    }
}
