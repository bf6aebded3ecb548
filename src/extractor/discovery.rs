//! Candidate discovery on listing pages.
//!
//! Listing markup drifts across sites and over time, so discovery runs an
//! ordered list of locator patterns and accepts the first one that yields
//! any candidates. That fallback chain is a design property of the
//! component, not a stopgap.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

use crate::domain::models::Candidate;

/// Climb this many ancestors at most when the matched anchor carries too
/// little text to filter on.
const SNIPPET_CLIMB_LIMIT: usize = 3;
const SNIPPET_MIN_LEN: usize = 40;

pub struct CandidateDiscovery;

impl CandidateDiscovery {
    /// Find job-post candidates on a listing page. Patterns are tried in
    /// order; the first yielding a nonzero set wins. Relative hrefs resolve
    /// against `origin`; duplicate URLs collapse to their first occurrence.
    pub fn discover(html: &str, origin: &Url, patterns: &[&str]) -> Vec<Candidate> {
        let document = Html::parse_document(html);

        for pattern in patterns {
            let Ok(selector) = Selector::parse(pattern) else {
                log::warn!("[DISCOVERY] Invalid locator pattern: {}", pattern);
                continue;
            };

            let candidates = Self::collect(&document, &selector, origin);
            if !candidates.is_empty() {
                log::debug!(
                    "[DISCOVERY] Pattern '{}' matched {} candidates",
                    pattern,
                    candidates.len()
                );
                return candidates;
            }
            log::debug!("[DISCOVERY] Pattern '{}' matched nothing, trying next", pattern);
        }

        log::warn!("[DISCOVERY] No pattern yielded candidates - blocked page or markup change?");
        Vec::new()
    }

    fn collect(document: &Html, selector: &Selector, origin: &Url) -> Vec<Candidate> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();

        for element in document.select(selector) {
            let Some(href) = element.value().attr("href") else {
                continue;
            };
            let href = href.trim();
            if href.is_empty()
                || href.starts_with('#')
                || href.starts_with("javascript:")
                || href.starts_with("mailto:")
            {
                continue;
            }

            let Ok(mut url) = origin.join(href) else {
                continue;
            };
            url.set_fragment(None);

            if !seen.insert(url.to_string()) {
                continue;
            }

            out.push(Candidate {
                raw_snippet_text: Self::snippet_for(element),
                discovery_index: out.len(),
                url,
            });
        }

        out
    }

    /// Text to run the pre-fetch filters on. Anchors inside card layouts
    /// often hold only the title, so climb toward the card container until
    /// there is enough text to judge.
    fn snippet_for(element: ElementRef) -> String {
        let mut current = element;
        for _ in 0..SNIPPET_CLIMB_LIMIT {
            let text = flatten(current);
            if text.len() >= SNIPPET_MIN_LEN {
                return text;
            }
            match current.parent().and_then(ElementRef::wrap) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        flatten(current)
    }
}

fn flatten(element: ElementRef) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://www.weremoto.com").unwrap()
    }

    #[test]
    fn test_first_matching_pattern_wins() {
        let html = r#"
            <body>
                <a href="/job-post/backend-dev">Backend Dev · Acme · today</a>
                <a href="/about">About us</a>
            </body>
        "#;
        let candidates = CandidateDiscovery::discover(
            html,
            &origin(),
            &["a[href*='/job-post/']", "a[href]"],
        );
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].url.as_str(),
            "https://www.weremoto.com/job-post/backend-dev"
        );
    }

    #[test]
    fn test_falls_through_to_next_pattern() {
        let html = r#"<body><a href="/jobs/123">Engineer · LATAM · 2h</a></body>"#;
        let candidates = CandidateDiscovery::discover(
            html,
            &origin(),
            &["a[href*='/job-post/']", "a[href*='/jobs/']"],
        );
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].url.path().starts_with("/jobs/"));
    }

    #[test]
    fn test_duplicates_collapse_to_first() {
        let html = r#"
            <body>
                <a href="/job-post/one">First card · lots of text here for the snippet</a>
                <a href="/job-post/one#apply">Dup with fragment</a>
                <a href="/job-post/two">Second card · lots of text here as well</a>
            </body>
        "#;
        let candidates =
            CandidateDiscovery::discover(html, &origin(), &["a[href*='/job-post/']"]);
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].discovery_index, 0);
        assert_eq!(candidates[1].discovery_index, 1);
        assert!(candidates[0].raw_snippet_text.contains("First card"));
    }

    #[test]
    fn test_snippet_climbs_to_card_container() {
        let html = r#"
            <div class="card">
                <a href="/job-post/one">Dev</a>
                <span>Acme Inc · Buenos Aires · nuevo · $25/hr</span>
            </div>
        "#;
        let candidates =
            CandidateDiscovery::discover(html, &origin(), &["a[href*='/job-post/']"]);
        assert_eq!(candidates.len(), 1);
        assert!(candidates[0].raw_snippet_text.contains("Buenos Aires"));
    }

    #[test]
    fn test_no_candidates_anywhere() {
        let html = "<body><p>Please verify you are human</p></body>";
        let candidates =
            CandidateDiscovery::discover(html, &origin(), &["a[href*='/job-post/']"]);
        assert!(candidates.is_empty());
    }
}
