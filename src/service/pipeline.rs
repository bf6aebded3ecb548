//! Run orchestration.
//!
//! One run is strictly sequential: discover candidates on the listing page,
//! then walk them in discovery order, one detail fetch at a time. Every
//! pre-fetch filter runs before any network work for a candidate, and both
//! filter rejections and fetch failures skip the candidate without counting
//! toward the result limit or aborting the run.

use chrono::Local;
use rand::Rng;
use scraper::Html;
use std::collections::HashSet;
use tokio::time::{sleep, Duration};
use url::Url;

use crate::classify::{GeoFilter, RecencyClassifier, SalaryNormalizer, TagPartitioner};
use crate::config::{RunSettings, SiteProfile, DEFAULT_LOCALE, SENTINEL_NOT_DISCLOSED};
use crate::domain::models::{Candidate, JobPosting, SalaryPeriod};
use crate::error::Result;
use crate::extractor::{fields, CandidateDiscovery, FieldExtractor};
use crate::service::ContentSupplier;

/// Run-scoped set of already-handled posting URLs. Owned by the pipeline,
/// dropped at run end; never shared across runs.
#[derive(Debug, Default)]
pub struct DedupSet {
    seen: HashSet<String>,
}

impl DedupSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True exactly once per URL.
    pub fn first_sighting(&mut self, url: &str) -> bool {
        self.seen.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

pub struct Pipeline<'a, S: ContentSupplier> {
    supplier: &'a S,
    profile: &'a SiteProfile,
    settings: RunSettings,
    recency: RecencyClassifier<'a>,
    geo: GeoFilter,
    tagger: TagPartitioner,
    extractor: FieldExtractor,
}

impl<'a, S: ContentSupplier> Pipeline<'a, S> {
    pub fn new(supplier: &'a S, profile: &'a SiteProfile, settings: RunSettings) -> Self {
        Self {
            supplier,
            profile,
            settings,
            recency: RecencyClassifier::new(&DEFAULT_LOCALE),
            geo: GeoFilter::latam(),
            tagger: TagPartitioner::with_defaults(),
            extractor: FieldExtractor::new(profile.name),
        }
    }

    /// Execute one full run. Never fails: any total failure degrades to an
    /// empty output list with diagnostics on the log channel.
    pub async fn run(&self) -> Vec<JobPosting> {
        let Ok(listing_url) = self.listing_url() else {
            log::error!("[PIPELINE] Could not build listing URL for {}", self.profile.name);
            return Vec::new();
        };

        log::info!("[PIPELINE] Starting run against {}", listing_url);
        let listing_html = match self.supplier.fetch_page(&listing_url).await {
            Ok(html) => html,
            Err(e) => {
                log::warn!("[PIPELINE] Listing fetch failed: {}", e);
                return Vec::new();
            }
        };

        let origin = listing_url.clone();
        let candidates =
            CandidateDiscovery::discover(&listing_html, &origin, self.profile.card_patterns);
        if candidates.is_empty() {
            log::warn!(
                "[PIPELINE] No candidates discovered on {} - probable blocking or markup change",
                self.profile.name
            );
            return Vec::new();
        }
        log::info!("[PIPELINE] {} candidates discovered", candidates.len());

        self.process(candidates).await
    }

    /// Walk discovered candidates and assemble the output list, honoring the
    /// result limit. Exposed separately so tests can inject candidate lists.
    pub async fn process(&self, candidates: Vec<Candidate>) -> Vec<JobPosting> {
        let mut dedup = DedupSet::new();
        let mut output = Vec::new();

        for candidate in candidates {
            if output.len() >= self.settings.limit {
                log::info!("[PIPELINE] Result limit {} reached", self.settings.limit);
                break;
            }

            let url = candidate.url.to_string();
            if !dedup.first_sighting(&url) {
                log::trace!("[PIPELINE] #{} duplicate URL, skipping: {}", candidate.discovery_index, url);
                continue;
            }

            let snippet = &candidate.raw_snippet_text;
            let freshness = self.recency.classify(snippet, Local::now());
            if self.settings.check_recency && !freshness.fresh {
                log::debug!("[PIPELINE] #{} not fresh, skipping", candidate.discovery_index);
                continue;
            }
            if self.settings.check_currency && !SalaryNormalizer::currency_accepted(snippet) {
                log::debug!("[PIPELINE] #{} disallowed currency, skipping", candidate.discovery_index);
                continue;
            }
            if self.settings.check_region && !self.geo.is_relevant(snippet) {
                log::debug!("[PIPELINE] #{} outside target region, skipping", candidate.discovery_index);
                continue;
            }

            self.politeness_delay().await;

            let detail_html = match self.supplier.fetch_page(&candidate.url).await {
                Ok(html) => html,
                Err(e) => {
                    log::debug!("[PIPELINE] #{} detail fetch failed, skipping: {}", candidate.discovery_index, e);
                    continue;
                }
            };

            output.push(self.assemble(&candidate, &detail_html, freshness.posted_at));
            log::info!(
                "[PIPELINE] Emitted record {}/{} from {}",
                output.len(),
                self.settings.limit,
                url
            );
        }

        log::info!("[PIPELINE] Run complete: {} records", output.len());
        output
    }

    fn assemble(&self, candidate: &Candidate, detail_html: &str, posted_at: String) -> JobPosting {
        let origin = origin_of(&candidate.url);
        let fields =
            self.extractor
                .extract(detail_html, &origin, &candidate.raw_snippet_text);
        let (salary_text, salary_period) =
            salary_for(&candidate.raw_snippet_text, detail_html);
        let (tools, industries) = self.tagger.partition(&fields.tags);

        JobPosting {
            title: fields.title,
            company_name: fields.company_name,
            company_website: fields.company_website,
            posted_at,
            salary_text,
            salary_period,
            currency_accepted: true,
            location_label: self.profile.location_label.to_string(),
            company_description: fields.company_description,
            description_snippet: fields.description_snippet,
            qualifications_text: fields.qualifications_text,
            tools,
            industries,
            application_type: fields.application_type,
            hours_category: fields.hours_category,
            source_url: candidate.url.to_string(),
            source_site: self.profile.name.to_string(),
        }
    }

    fn listing_url(&self) -> Result<Url> {
        let mut url = Url::parse(self.profile.origin)
            .and_then(|u| u.join(self.profile.listing_path))
            .map_err(|e| crate::error::AppError::InvalidUrl(e.to_string()))?;
        if let Some(param) = self.profile.keyword_param {
            if !self.settings.wants_all_roles() {
                url.query_pairs_mut()
                    .append_pair(param, &self.settings.keyword);
            }
        }
        Ok(url)
    }

    /// Randomized delay between navigations; zero in tests.
    async fn politeness_delay(&self) {
        let range = self.settings.delay_ms.clone();
        if range.is_empty() {
            return;
        }
        let ms = rand::thread_rng().gen_range(range);
        if ms > 0 {
            sleep(Duration::from_millis(ms)).await;
        }
    }
}

/// Salary is usually quoted on the listing card; fall back to the detail
/// page text when the card says nothing.
fn salary_for(snippet: &str, detail_html: &str) -> (String, SalaryPeriod) {
    let (text, period) = SalaryNormalizer::normalize(snippet);
    if text != SENTINEL_NOT_DISCLOSED {
        return (text, period);
    }
    let detail_text = fields::full_text(&Html::parse_document(detail_html));
    SalaryNormalizer::normalize(&detail_text)
}

fn origin_of(url: &Url) -> Url {
    let mut origin = url.clone();
    origin.set_path("/");
    origin.set_query(None);
    origin.set_fragment(None);
    origin
}
