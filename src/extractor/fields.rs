//! Structured field extraction from a job detail page.
//!
//! Every field has its own fallback chain and its own sentinel; one field
//! failing never poisons the others. Extraction helpers return `Option` and
//! the sentinel substitution happens in one place, `assemble`.

use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;
use url::Url;

use crate::config::{
    COMPANY_ALT_MAX_LEN, COMPANY_DESCRIPTION_CAP, DESCRIPTION_SNIPPET_CAP, QUALIFICATIONS_CAP,
    QUALIFICATION_MARKERS, ROLE_LINE_MARKERS, SENTINEL_NOT_AVAILABLE, SENTINEL_SEE_DESCRIPTION,
    SENTINEL_SEE_JOB_DESCRIPTION,
};
use crate::domain::models::{ApplicationType, HoursCategory};

/// Ordered description containers; body-text prefix is the last resort.
const DESCRIPTION_SELECTORS: &[&str] = &[
    "div[data-test='JobDescription']",
    "div[class*='description']",
    "section[class*='description']",
    "article",
];

/// Ordered tag/badge containers.
const TAG_SELECTORS: &[&str] = &["div[class*='Tag']", "span[class*='tag']", "li[class*='badge']"];

fn heading_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("h1, h2").unwrap())
}

fn company_link_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("a[href*='/company/']").unwrap())
}

fn image_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("img[alt]").unwrap())
}

fn body_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("body").unwrap())
}

fn apply_button_selector() -> &'static Selector {
    static SELECTOR: OnceLock<Selector> = OnceLock::new();
    SELECTOR.get_or_init(|| Selector::parse("button[data-test='ApplyButton']").unwrap())
}

/// All fields recoverable from one detail page, sentinels already applied.
#[derive(Debug, Clone)]
pub struct ExtractedFields {
    pub title: String,
    pub company_name: String,
    pub company_website: String,
    pub description_snippet: String,
    pub qualifications_text: String,
    pub company_description: String,
    pub tags: Vec<String>,
    pub application_type: ApplicationType,
    pub hours_category: HoursCategory,
}

pub struct FieldExtractor {
    /// The listing site's own name; image alt text equal to it is site
    /// chrome, not a company name.
    host_name: String,
}

impl FieldExtractor {
    pub fn new(host_name: &str) -> Self {
        Self {
            host_name: host_name.to_lowercase(),
        }
    }

    /// Extract every field from a detail page. `snippet` is the listing-card
    /// text, used as a last-resort source for title and company.
    pub fn extract(&self, html: &str, origin: &Url, snippet: &str) -> ExtractedFields {
        let document = Html::parse_document(html);
        let text = full_text(&document);
        let lower = text.to_lowercase();
        let snippet_lines: Vec<&str> =
            snippet.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

        let title = role_line(&text)
            .or_else(|| heading_text(&document))
            .or_else(|| snippet_lines.first().map(|l| l.to_string()));

        let company_name = self
            .company_from_profile_link(&document)
            .or_else(|| heading_adjacent_text(&document))
            .or_else(|| self.company_from_image_alt(&document))
            .or_else(|| snippet_lines.get(1).map(|l| l.to_string()));

        let company_website = company_website(&document, origin);
        let description = description_snippet(&document, &text);
        let qualifications = qualifications(&text);
        let company_description = company_name
            .as_deref()
            .and_then(|name| about_company(&text, name));
        let tags = tags(&document);

        let application_type = if apply_button_is_external(&document) {
            ApplicationType::External
        } else {
            ApplicationType::EasyApply
        };
        let hours_category = if lower.contains("part-time")
            || lower.contains("part time")
            || lower.contains("medio tiempo")
        {
            HoursCategory::PartTime
        } else {
            HoursCategory::Standard
        };

        // Sentinel substitution happens here, and only here.
        ExtractedFields {
            title: title.map(|t| clean(&t)).unwrap_or_else(|| "unknown".into()),
            company_name: company_name
                .map(|c| clean(&c))
                .unwrap_or_else(|| SENTINEL_SEE_DESCRIPTION.into()),
            company_website: company_website.unwrap_or_else(|| SENTINEL_NOT_AVAILABLE.into()),
            description_snippet: description
                .map(|d| clean(&d))
                .unwrap_or_else(|| SENTINEL_SEE_DESCRIPTION.into()),
            qualifications_text: qualifications
                .map(|q| clean(&q))
                .unwrap_or_else(|| SENTINEL_SEE_JOB_DESCRIPTION.into()),
            company_description: company_description
                .map(|c| clean(&c))
                .unwrap_or_else(|| SENTINEL_SEE_DESCRIPTION.into()),
            tags,
            application_type,
            hours_category,
        }
    }

    fn company_from_profile_link(&self, document: &Html) -> Option<String> {
        document
            .select(company_link_selector())
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|t| !t.is_empty())
    }

    /// Image alt text is a decent company-name source on logo-heavy pages,
    /// once the site's own branding and overlong captions are excluded.
    fn company_from_image_alt(&self, document: &Html) -> Option<String> {
        document
            .select(image_selector())
            .filter_map(|el| el.value().attr("alt"))
            .map(str::trim)
            .find(|alt| {
                !alt.is_empty()
                    && alt.len() <= COMPANY_ALT_MAX_LEN
                    && !alt.to_lowercase().contains(&self.host_name)
            })
            .map(|alt| alt.to_string())
    }
}

/// Flatten a document into text, preserving blank-line paragraph boundaries.
/// A whitespace-only node containing a newline marks a block gap; the
/// "About <company>" terminator depends on those gaps surviving.
pub fn full_text(document: &Html) -> String {
    let mut lines: Vec<String> = Vec::new();
    for chunk in document.root_element().text() {
        let trimmed = chunk.trim();
        if trimmed.is_empty() {
            if chunk.contains('\n') && matches!(lines.last(), Some(l) if !l.is_empty()) {
                lines.push(String::new());
            }
        } else {
            lines.push(trimmed.to_string());
        }
    }
    lines.join("\n")
}

/// A labeled "Role:"/"Rol:"/"Puesto:" line beats the page heading; some
/// sites put the company name in the heading and the role in the label.
fn role_line(text: &str) -> Option<String> {
    for line in text.lines() {
        let line = line.trim();
        for marker in ROLE_LINE_MARKERS {
            if let Some(rest) = line.strip_prefix(marker) {
                let rest = rest.trim();
                if !rest.is_empty() {
                    return Some(rest.to_string());
                }
            }
        }
    }
    None
}

fn heading_text(document: &Html) -> Option<String> {
    document
        .select(heading_selector())
        .map(|el| el.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
}

/// Text of the element right after the first heading, where card layouts
/// usually place the company name.
fn heading_adjacent_text(document: &Html) -> Option<String> {
    let heading = document.select(heading_selector()).next()?;
    let sibling = heading
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .next()?;
    let text = sibling.text().collect::<String>().trim().to_string();
    (!text.is_empty()).then_some(text)
}

fn company_website(document: &Html, origin: &Url) -> Option<String> {
    document
        .select(company_link_selector())
        .filter_map(|el| el.value().attr("href"))
        .filter_map(|href| origin.join(href).ok())
        .map(|u| u.to_string())
        .next()
}

fn description_snippet(document: &Html, text: &str) -> Option<String> {
    for pattern in DESCRIPTION_SELECTORS {
        let Ok(selector) = Selector::parse(pattern) else {
            continue;
        };
        if let Some(found) = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .find(|t| !t.is_empty())
        {
            return Some(truncate_chars(&found, DESCRIPTION_SNIPPET_CAP).to_string());
        }
    }

    // Last resort: a bounded prefix of the body text.
    let body = document
        .select(body_selector())
        .next()
        .map(|el| el.text().collect::<String>())
        .unwrap_or_else(|| text.to_string());
    let body = body.trim();
    (!body.is_empty()).then(|| truncate_chars(body, DESCRIPTION_SNIPPET_CAP).to_string())
}

/// Body text following the first qualifications marker, length-capped.
fn qualifications(text: &str) -> Option<String> {
    for marker in QUALIFICATION_MARKERS {
        if let Some(pos) = text.find(marker) {
            let after = text[pos + marker.len()..].trim();
            if !after.is_empty() {
                return Some(truncate_chars(after, QUALIFICATIONS_CAP).to_string());
            }
        }
    }
    None
}

/// Paragraph following "About <company>", terminated at the next blank line.
fn about_company(text: &str, company: &str) -> Option<String> {
    let marker = format!("About {}", company);
    let pos = text.find(&marker)?;
    let after = text[pos + marker.len()..].trim_start();
    let paragraph = after.split("\n\n").next().unwrap_or(after).trim();
    (!paragraph.is_empty()).then(|| truncate_chars(paragraph, COMPANY_DESCRIPTION_CAP).to_string())
}

fn tags(document: &Html) -> Vec<String> {
    for pattern in TAG_SELECTORS {
        let Ok(selector) = Selector::parse(pattern) else {
            continue;
        };
        let found: Vec<String> = document
            .select(&selector)
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        if !found.is_empty() {
            return found;
        }
    }
    Vec::new()
}

fn apply_button_is_external(document: &Html) -> bool {
    document
        .select(apply_button_selector())
        .next()
        .map(|el| el.text().collect::<String>().contains("External"))
        .unwrap_or(false)
}

/// Collapse all runs of whitespace, including newlines, into single spaces.
fn clean(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate at a char boundary, never mid-codepoint.
fn truncate_chars(s: &str, cap: usize) -> &str {
    match s.char_indices().nth(cap) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://wellfound.com").unwrap()
    }

    fn extractor() -> FieldExtractor {
        FieldExtractor::new("wellfound")
    }

    const DETAIL_PAGE: &str = r#"
        <html><body>
            <h1>Acme Inc</h1>
            <div class="headline">Acme Inc</div>
            <p>Role: Backend Engineer</p>
            <a href="/company/acme">Acme Inc</a>
            <div class="job-description">We build billing software for LATAM startups.</div>
            <p>Requirements</p>
            <p>5 years of Python. Postgres. Fluent English.</p>
            <p>About Acme Inc</p>
            <p>Acme is a 40-person fintech.</p>

            <p>Unrelated footer text.</p>
            <div class="Tag">Python</div>
            <div class="Tag">Fintech</div>
            <button data-test="ApplyButton">External Apply</button>
        </body></html>
    "#;

    #[test]
    fn test_role_line_overrides_heading() {
        let fields = extractor().extract(DETAIL_PAGE, &origin(), "");
        assert_eq!(fields.title, "Backend Engineer");
    }

    #[test]
    fn test_heading_used_when_no_role_line() {
        let html = "<html><body><h1>Data Analyst</h1></body></html>";
        let fields = extractor().extract(html, &origin(), "");
        assert_eq!(fields.title, "Data Analyst");
    }

    #[test]
    fn test_company_from_profile_link() {
        let fields = extractor().extract(DETAIL_PAGE, &origin(), "");
        assert_eq!(fields.company_name, "Acme Inc");
        assert_eq!(
            fields.company_website,
            "https://wellfound.com/company/acme"
        );
    }

    #[test]
    fn test_company_falls_back_to_image_alt() {
        let html = r#"
            <html><body>
                <img alt="Wellfound logo">
                <img alt="Globex">
                <p>hiring</p>
            </body></html>
        "#;
        let fields = extractor().extract(html, &origin(), "");
        assert_eq!(fields.company_name, "Globex");
    }

    #[test]
    fn test_company_sentinel_when_nothing_found() {
        let html = "<html><body><p>hiring</p></body></html>";
        let fields = extractor().extract(html, &origin(), "");
        assert_eq!(fields.company_name, SENTINEL_SEE_DESCRIPTION);
        assert_eq!(fields.company_website, SENTINEL_NOT_AVAILABLE);
    }

    #[test]
    fn test_description_container_preferred_over_body() {
        let fields = extractor().extract(DETAIL_PAGE, &origin(), "");
        assert_eq!(
            fields.description_snippet,
            "We build billing software for LATAM startups."
        );
    }

    #[test]
    fn test_qualifications_after_marker() {
        let fields = extractor().extract(DETAIL_PAGE, &origin(), "");
        assert!(fields.qualifications_text.starts_with("5 years of Python"));
    }

    #[test]
    fn test_qualifications_sentinel_when_no_marker() {
        let html = "<html><body><p>We are hiring.</p></body></html>";
        let fields = extractor().extract(html, &origin(), "");
        assert_eq!(fields.qualifications_text, SENTINEL_SEE_JOB_DESCRIPTION);
    }

    #[test]
    fn test_about_company_stops_at_blank_line() {
        let fields = extractor().extract(DETAIL_PAGE, &origin(), "");
        assert_eq!(fields.company_description, "Acme is a 40-person fintech.");
        assert!(!fields.company_description.contains("footer"));
    }

    #[test]
    fn test_tags_and_application_type() {
        let fields = extractor().extract(DETAIL_PAGE, &origin(), "");
        assert_eq!(fields.tags, vec!["Python".to_string(), "Fintech".to_string()]);
        assert_eq!(fields.application_type, ApplicationType::External);
    }

    #[test]
    fn test_part_time_detection() {
        let html = "<html><body><p>This is a part-time contract.</p></body></html>";
        let fields = extractor().extract(html, &origin(), "");
        assert_eq!(fields.hours_category, HoursCategory::PartTime);
    }

    #[test]
    fn test_snippet_supplies_title_and_company_as_last_resort() {
        let html = "<html><body></body></html>";
        let fields = extractor().extract(html, &origin(), "Designer\nInitech\n$30/hr");
        assert_eq!(fields.title, "Designer");
        assert_eq!(fields.company_name, "Initech");
    }

    #[test]
    fn test_full_text_preserves_blank_lines() {
        let document = Html::parse_document(
            "<html><body><p>one</p>\n\n<p>two</p></body></html>",
        );
        let text = full_text(&document);
        assert!(text.contains("one\n\ntwo"));
    }
}
