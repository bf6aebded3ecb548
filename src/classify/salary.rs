//! Salary extraction and pay-period classification.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::{
    DISALLOWED_CURRENCY_SYMBOLS, HOURLY_MARKERS, MONTHLY_MARKERS, SENTINEL_NOT_DISCLOSED,
    YEARLY_MARKERS,
};
use crate::domain::models::SalaryPeriod;

/// Currency marker + numeric literal (thousands separators, optional "k"),
/// optional range continuation and period suffix. The amount group keeps its
/// separators; digit counting strips them later.
fn salary_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?ix)
            (?:\$|usd\s?)\s?
            (\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?\s?(k)?
            (?:\s?[-–]\s?(?:\$|usd\s?)?\s?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?\s?k?)?
            ",
        )
        .unwrap()
    })
}

pub struct SalaryNormalizer;

impl SalaryNormalizer {
    /// Reject postings quoting a disallowed foreign currency anywhere in the
    /// visible text. Runs before salary extraction.
    pub fn currency_accepted(text: &str) -> bool {
        !DISALLOWED_CURRENCY_SYMBOLS
            .iter()
            .any(|sym| text.contains(sym))
    }

    /// Extract a salary expression and classify its pay period.
    ///
    /// Classification priority: explicit hourly marker, explicit monthly
    /// marker, explicit yearly marker or "k" magnitude, then the bare-number
    /// heuristic (a bare amount of two digits or fewer reads as an hourly
    /// rate), defaulting to monthly. No match at all yields the
    /// "not disclosed" sentinel with an unknown period.
    pub fn normalize(text: &str) -> (String, SalaryPeriod) {
        let Some(caps) = salary_re().captures(text) else {
            return (SENTINEL_NOT_DISCLOSED.into(), SalaryPeriod::Unknown);
        };
        let matched = caps.get(0).unwrap();

        // The pay period usually trails the amount on the same line.
        let line = line_around(text, matched.start());
        let line_lower = line.to_lowercase();

        let has_k = caps.get(2).is_some();
        let digits = caps[1].chars().filter(char::is_ascii_digit).count();

        let period = if HOURLY_MARKERS.iter().any(|m| line_lower.contains(m)) {
            SalaryPeriod::Hourly
        } else if MONTHLY_MARKERS.iter().any(|m| line_lower.contains(m)) {
            SalaryPeriod::Monthly
        } else if has_k || YEARLY_MARKERS.iter().any(|m| line_lower.contains(m)) {
            SalaryPeriod::Yearly
        } else if digits <= 2 {
            SalaryPeriod::Hourly
        } else {
            SalaryPeriod::Monthly
        };

        (line.trim().to_string(), period)
    }
}

/// The full line containing byte offset `pos`.
fn line_around(text: &str, pos: usize) -> &str {
    let start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[pos..]
        .find('\n')
        .map(|i| pos + i)
        .unwrap_or(text.len());
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_k_suffix_means_yearly() {
        let (text, period) = SalaryNormalizer::normalize("$120k");
        assert_eq!(period, SalaryPeriod::Yearly);
        assert_eq!(text, "$120k");
    }

    #[test]
    fn test_explicit_hourly_marker() {
        let (text, period) = SalaryNormalizer::normalize("$25/hr");
        assert_eq!(period, SalaryPeriod::Hourly);
        assert_eq!(text, "$25/hr");
    }

    #[test]
    fn test_spanish_monthly_marker() {
        let (_, period) = SalaryNormalizer::normalize("Pagamos $4,500/mes");
        assert_eq!(period, SalaryPeriod::Monthly);
    }

    #[test]
    fn test_bare_small_number_reads_hourly() {
        let (_, period) = SalaryNormalizer::normalize("$8");
        assert_eq!(period, SalaryPeriod::Hourly);
    }

    #[test]
    fn test_bare_large_number_defaults_monthly() {
        let (_, period) = SalaryNormalizer::normalize("$4,500");
        assert_eq!(period, SalaryPeriod::Monthly);
    }

    #[test]
    fn test_range_with_yearly_marker() {
        let (text, period) = SalaryNormalizer::normalize("Salary: $60,000 - $80,000 per year");
        assert_eq!(period, SalaryPeriod::Yearly);
        assert!(text.contains("$60,000 - $80,000"));
    }

    #[test]
    fn test_no_currency_token() {
        let (text, period) = SalaryNormalizer::normalize("Competitive salary, great team");
        assert_eq!(text, SENTINEL_NOT_DISCLOSED);
        assert_eq!(period, SalaryPeriod::Unknown);
    }

    #[test]
    fn test_disallowed_currencies_rejected() {
        assert!(!SalaryNormalizer::currency_accepted("₹ 40,000"));
        assert!(!SalaryNormalizer::currency_accepted("pay in €"));
        assert!(!SalaryNormalizer::currency_accepted("£35k"));
        assert!(SalaryNormalizer::currency_accepted("$35k USD"));
    }

    #[test]
    fn test_salary_found_mid_text_uses_its_line() {
        let text = "Great role\nComp: $3,000 mensual\nApply now";
        let (salary, period) = SalaryNormalizer::normalize(text);
        assert_eq!(salary, "Comp: $3,000 mensual");
        assert_eq!(period, SalaryPeriod::Monthly);
    }
}
