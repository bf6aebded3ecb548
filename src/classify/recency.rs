//! Recency classification for posting age text.
//!
//! Listing sites express posting age in wildly inconsistent ways, in two
//! languages: "just now", "nuevo", "3h", "hoy", "Dec 31", "2w". The
//! classifier resolves all of them against a freshness window (today or
//! yesterday) in strict priority order:
//!
//! 1. instant-fresh keyword or "<N> hour/minute" token
//! 2. localized today/yesterday keyword
//! 3. explicit "<month-abbrev> <day>" token, with year rollover
//! 4. coarse relative-age token ("<N>d", "<N>w", "<N>mo")
//! 5. nothing matched: not fresh
//!
//! The classifier never fails. Unparseable text is conservatively judged
//! stale but still yields a canonical timestamp ("now") for output.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate};
use regex::Regex;
use std::sync::OnceLock;

use crate::config::LocaleTable;
use crate::domain::models::FreshnessDecision;

/// Numeric age in hours or minutes, both languages. Two digits at most:
/// anything larger than 99 hours is stale anyway.
fn instant_age_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b\d{1,2}\s*(hours|hour|horas|hora|hrs|hr|h|minutes|minute|minutos|minuto|mins|min|m)\b",
        )
        .unwrap()
    })
}

/// "<month-word> <day>" token, e.g. "Dec 31" or "ene 5".
fn month_day_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b([a-záéíóúñ]{3,10})\.?\s+(\d{1,2})\b").unwrap()
    })
}

/// Coarse relative-age token: "3d", "2 w", "1mo". "mo" must sit before "w"
/// and "d" in the alternation so "1mo" is not read as days.
fn relative_age_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(\d{1,3})\s*(months|month|mo|meses|mes|weeks|week|w|semanas|semana|days|day|d|días|día|dias|dia)\b",
        )
        .unwrap()
    })
}

pub struct RecencyClassifier<'a> {
    locale: &'a LocaleTable,
}

impl<'a> RecencyClassifier<'a> {
    pub fn new(locale: &'a LocaleTable) -> Self {
        Self { locale }
    }

    /// Classify free text against the freshness window ending at `now`.
    /// `now` is injected so tests can pin the clock.
    pub fn classify(&self, text: &str, now: DateTime<Local>) -> FreshnessDecision {
        let lower = text.to_lowercase();
        let today = now.date_naive();
        let yesterday = today - Days::new(1);

        // 1. Instant-fresh: keyword or "<N>h"/"<N> min" token.
        if self
            .locale
            .instant_fresh
            .iter()
            .any(|kw| lower.contains(kw))
            || instant_age_re().is_match(&lower)
        {
            return FreshnessDecision {
                fresh: true,
                posted_at: canonical(today),
            };
        }

        // 2. Localized today/yesterday.
        if self.locale.today.iter().any(|kw| lower.contains(kw)) {
            return FreshnessDecision {
                fresh: true,
                posted_at: canonical(today),
            };
        }
        if self.locale.yesterday.iter().any(|kw| lower.contains(kw)) {
            return FreshnessDecision {
                fresh: true,
                posted_at: canonical(yesterday),
            };
        }

        // 3. Explicit "<month> <day>" token.
        if let Some(date) = self.resolve_month_day(&lower, today) {
            let fresh = date == today || date == yesterday;
            return FreshnessDecision {
                fresh,
                posted_at: canonical(date),
            };
        }

        // 4. Coarse relative age.
        if let Some(caps) = relative_age_re().captures(&lower) {
            let n: u64 = caps[1].parse().unwrap_or(1);
            let days = match &caps[2].to_lowercase()[..] {
                "mo" | "month" | "months" | "mes" | "meses" => n * 30,
                "w" | "week" | "weeks" | "semana" | "semanas" => n * 7,
                _ => n,
            };
            let date = today - Days::new(days);
            let fresh = date >= yesterday;
            return FreshnessDecision {
                fresh,
                posted_at: canonical(date),
            };
        }

        // 5. Nothing matched.
        FreshnessDecision {
            fresh: false,
            posted_at: canonical(today),
        }
    }

    /// Resolve the first "<month-word> <day>" token against a concrete date.
    /// Year rollover: a token month later than the current month belongs to
    /// the previous year (a "Dec 31" seen in January is last December).
    fn resolve_month_day(&self, lower: &str, today: NaiveDate) -> Option<NaiveDate> {
        for caps in month_day_re().captures_iter(lower) {
            let word = &caps[1];
            let Some(month) = self.month_number(word) else {
                continue;
            };
            let day: u32 = caps[2].parse().ok()?;
            let year = if month > today.month() {
                today.year() - 1
            } else {
                today.year()
            };
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                return Some(date);
            }
        }
        None
    }

    fn month_number(&self, word: &str) -> Option<u32> {
        self.locale
            .months
            .iter()
            .position(|spellings| spellings.iter().any(|s| *s == word))
            .map(|idx| idx as u32 + 1)
    }
}

/// Canonical output timestamp. Listing sites never expose the posting hour,
/// so a fixed morning time stands in.
fn canonical(date: NaiveDate) -> String {
    format!("{}, 09:00 AM", date.format("%m/%d/%Y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_LOCALE;
    use chrono::TimeZone;

    fn at(y: i32, m: u32, d: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn classifier() -> RecencyClassifier<'static> {
        RecencyClassifier::new(&DEFAULT_LOCALE)
    }

    #[test]
    fn test_instant_keywords_are_fresh() {
        let now = at(2026, 8, 26);
        assert!(classifier().classify("Posted just now", now).fresh);
        assert!(classifier().classify("Nuevo · Remoto", now).fresh);
        assert!(classifier().classify("3h", now).fresh);
        assert!(classifier().classify("45 minutos", now).fresh);
    }

    #[test]
    fn test_today_and_yesterday_keywords() {
        let now = at(2026, 8, 26);
        let today = classifier().classify("posted today", now);
        assert!(today.fresh);
        assert_eq!(today.posted_at, "08/26/2026, 09:00 AM");

        let ayer = classifier().classify("publicado ayer", now);
        assert!(ayer.fresh);
        assert_eq!(ayer.posted_at, "08/25/2026, 09:00 AM");
    }

    #[test]
    fn test_month_token_within_window() {
        let now = at(2026, 8, 26);
        let d = classifier().classify("Aug 25 · Full time", now);
        assert!(d.fresh);
        assert_eq!(d.posted_at, "08/25/2026, 09:00 AM");
    }

    #[test]
    fn test_month_token_outside_window_is_stale() {
        let now = at(2026, 8, 26);
        let d = classifier().classify("Aug 10", now);
        assert!(!d.fresh);
        assert_eq!(d.posted_at, "08/10/2026, 09:00 AM");
    }

    #[test]
    fn test_year_rollover() {
        // Jan 3 sees "Dec 31": previous year, outside the window.
        let now = at(2026, 1, 3);
        let d = classifier().classify("Dec 31", now);
        assert!(!d.fresh);
        assert_eq!(d.posted_at, "12/31/2025, 09:00 AM");
    }

    #[test]
    fn test_year_rollover_yesterday_is_fresh() {
        let now = at(2026, 1, 1);
        let d = classifier().classify("Dec 31", now);
        assert!(d.fresh);
        assert_eq!(d.posted_at, "12/31/2025, 09:00 AM");
    }

    #[test]
    fn test_spanish_month_token() {
        let now = at(2026, 8, 26);
        let d = classifier().classify("26 ago", now);
        // Day-first Spanish ordering is not recognized; month-first is.
        let d2 = classifier().classify("ago 26", now);
        assert!(d2.fresh);
        assert!(!d.fresh);
    }

    #[test]
    fn test_relative_age_tokens() {
        let now = at(2026, 8, 26);
        assert!(classifier().classify("1d ago", now).fresh);
        assert!(!classifier().classify("3d ago", now).fresh);
        assert!(!classifier().classify("2w", now).fresh);
        let mo = classifier().classify("1mo", now);
        assert!(!mo.fresh);
        assert_eq!(mo.posted_at, "07/27/2026, 09:00 AM");
    }

    #[test]
    fn test_relative_age_words_both_languages() {
        let now = at(2026, 8, 26);
        assert!(!classifier().classify("posted 4 days ago", now).fresh);
        assert!(classifier().classify("posted 1 day ago", now).fresh);
        assert!(!classifier().classify("hace 3 semanas", now).fresh);
    }

    #[test]
    fn test_unparseable_defaults_to_stale_now() {
        let now = at(2026, 8, 26);
        let d = classifier().classify("Remote · Full time", now);
        assert!(!d.fresh);
        assert_eq!(d.posted_at, "08/26/2026, 09:00 AM");
    }
}
