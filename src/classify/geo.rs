//! Geographic relevance filtering.

use crate::config::LATAM_KEYWORDS;

/// Case-insensitive substring match against a region keyword table. An
/// embedded keyword inside unrelated text still matches; that imprecision is
/// an accepted trade-off, kept deliberately.
pub struct GeoFilter {
    keywords: Vec<String>,
}

impl GeoFilter {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    pub fn latam() -> Self {
        Self::new(LATAM_KEYWORDS)
    }

    pub fn is_relevant(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }
        let lower = text.to_lowercase();
        self.keywords.iter().any(|kw| lower.contains(kw.as_str()))
    }
}
