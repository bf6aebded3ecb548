//! Domain entities for one aggregation run.

use serde::Serialize;
use url::Url;

// ====== Enums ======

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryPeriod {
    Hourly,
    Monthly,
    Yearly,
    Unknown,
}

impl SalaryPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalaryPeriod::Hourly => "hourly",
            SalaryPeriod::Monthly => "monthly",
            SalaryPeriod::Yearly => "yearly",
            SalaryPeriod::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplicationType {
    EasyApply,
    External,
}

impl ApplicationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationType::EasyApply => "easy apply",
            ApplicationType::External => "external application",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoursCategory {
    Standard,
    PartTime,
}

impl HoursCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            HoursCategory::Standard => "standard",
            HoursCategory::PartTime => "part-time",
        }
    }
}

// ====== Candidate ======

/// A discovered, not-yet-validated posting link plus its listing snippet.
/// Created during discovery, immutable, consumed once.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub url: Url,
    pub raw_snippet_text: String,
    pub discovery_index: usize,
}

// ====== Freshness ======

/// Outcome of the recency classification. `posted_at` is always usable as a
/// canonical timestamp even when the posting is judged stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreshnessDecision {
    pub fresh: bool,
    pub posted_at: String,
}

// ====== Output record ======

/// One normalized job posting. Built once after every filter passes; never
/// mutated afterwards. `source_url` is unique within a run's output.
#[derive(Debug, Clone, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company_name: String,
    pub company_website: String,
    pub posted_at: String,
    pub salary_text: String,
    pub salary_period: SalaryPeriod,
    pub currency_accepted: bool,
    pub location_label: String,
    pub company_description: String,
    pub description_snippet: String,
    pub qualifications_text: String,
    pub tools: Vec<String>,
    pub industries: Vec<String>,
    pub application_type: ApplicationType,
    pub hours_category: HoursCategory,
    pub source_url: String,
    pub source_site: String,
}
