use crate::app::ports::{fetch_success, PageFetcher};
use crate::common::constants::{
    provincial_source, PROVINCES, PROVINCE_TOURISM_SUFFIX, PROVINCIAL_EXCLUDED_PREFIXES,
    PROVINCIAL_ID, SECTION_KEYWORDS,
};
use crate::common::error::{CrawlError, Result};
use crate::common::types::{AttractionRecord, ExtractReport, Extractor, ProgressLabels};
use crate::config::CrawlerConfig;
use crate::parser::section::{SectionNode, SectionWalk};
use crate::parser::{char_len, first_link, list_items, raw_text, stripped_text};
use crate::storage::RecordStore;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{debug, info, instrument};

static HEADINGS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("h2, h3, h4").expect("static selector"));

pub struct ProvincialExtractor {
    config: CrawlerConfig,
    provinces: Vec<String>,
    delay: Duration,
}

impl ProvincialExtractor {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self::with_provinces(config, PROVINCES.iter().map(|p| p.to_string()).collect())
    }

    pub fn with_provinces(config: &CrawlerConfig, provinces: Vec<String>) -> Self {
        Self {
            config: config.clone(),
            provinces,
            delay: config.province_delay(),
        }
    }

    /// Tourism page first, then the province's own page when the tourism
    /// page is missing or unreachable.
    async fn fetch_province(&self, fetcher: &dyn PageFetcher, province: &str) -> Result<String> {
        let tourism_url = self
            .config
            .page_url(&format!("{province}{PROVINCE_TOURISM_SUFFIX}"));
        match fetcher.fetch(&tourism_url).await {
            Ok(page) if page.is_success() => return Ok(page.body),
            Ok(page) => debug!("{} returned {}, trying province page", tourism_url, page.status),
            Err(e) => debug!("{}, trying province page", e),
        }
        fetch_success(fetcher, &self.config.page_url(province)).await
    }
}

pub fn validate_provincial_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "empty"
    } else if char_len(name) <= 1 {
        "too short"
    } else if PROVINCIAL_EXCLUDED_PREFIXES.iter().any(|p| name.starts_with(p)) {
        "excluded prefix"
    } else {
        return Ok(());
    };
    Err(CrawlError::NameRejected {
        name: name.to_string(),
        reason,
    })
}

fn is_attraction_heading(text: &str) -> bool {
    let lowered = text.to_lowercase();
    SECTION_KEYWORDS.iter().any(|k| lowered.contains(k))
}

/// Collect linked list items from every attraction-like section of a
/// province page.
pub fn parse_provincial_page(html: &str, province: &str, country: &str) -> Vec<AttractionRecord> {
    let document = Html::parse_document(html);
    let source = provincial_source(province);
    let mut records = Vec::new();

    for heading in document.select(&HEADINGS) {
        if !is_attraction_heading(&raw_text(heading)) {
            continue;
        }
        let Some(section) = SectionWalk::after(heading) else {
            continue;
        };
        for element in section.filter(|el| matches!(el.tag(), "ul" | "ol")) {
            for item in list_items(element) {
                let Some(link) = first_link(item) else {
                    continue;
                };
                let name = stripped_text(link);
                match validate_provincial_name(&name) {
                    Ok(()) => records.push(AttractionRecord::new(
                        name,
                        province,
                        country,
                        source.as_str(),
                    )),
                    Err(e) => debug!("{}", e),
                }
            }
        }
    }
    records
}

#[async_trait::async_trait]
impl Extractor for ProvincialExtractor {
    fn id(&self) -> &'static str {
        PROVINCIAL_ID
    }

    fn labels(&self) -> ProgressLabels {
        ProgressLabels {
            crawling: "各省旅游景点",
            counted: "各省景点",
            failed: None,
        }
    }

    #[instrument(skip_all, fields(extractor = PROVINCIAL_ID))]
    async fn extract(&self, fetcher: &dyn PageFetcher, store: &mut RecordStore) -> ExtractReport {
        let mut report = ExtractReport::new(self.id());
        for province in &self.provinces {
            match self.fetch_province(fetcher, province).await {
                Ok(body) => {
                    let before = report.added;
                    let candidates = parse_provincial_page(&body, province, &self.config.country);
                    report.absorb(store, candidates);
                    debug!("{}: {} new attractions", province, report.added - before);
                }
                Err(e) => {
                    debug!("{} skipped: {}", province, e);
                    report.errors.push(e);
                }
            }
            tokio::time::sleep(self.delay).await;
        }
        info!("Added {} provincial attractions", report.added);
        report
    }
}
