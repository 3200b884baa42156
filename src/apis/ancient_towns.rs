use super::crawl_single_page;
use crate::app::ports::PageFetcher;
use crate::common::constants::{ANCIENT_TOWNS_ID, ANCIENT_TOWN_PAGE, ANCIENT_TOWN_SOURCE};
use crate::common::error::{CrawlError, Result};
use crate::common::types::{AttractionRecord, ExtractReport, Extractor, ProgressLabels};
use crate::config::CrawlerConfig;
use crate::parser::{cell_name, data_rows, stripped_text, wikitables};
use crate::storage::RecordStore;
use scraper::Html;
use tracing::{info, instrument};

pub struct AncientTownExtractor {
    url: String,
    country: String,
}

impl AncientTownExtractor {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            url: config.page_url(ANCIENT_TOWN_PAGE),
            country: config.country.clone(),
        }
    }
}

pub fn parse_ancient_towns(html: &str, country: &str) -> Result<Vec<AttractionRecord>> {
    let document = Html::parse_document(html);
    let tables = wikitables(&document);
    if tables.is_empty() {
        return Err(CrawlError::anomaly(ANCIENT_TOWN_PAGE, "no wikitable found"));
    }

    let mut records = Vec::new();
    for table in tables {
        for cells in data_rows(table) {
            let Some(first) = cells.first() else {
                continue;
            };
            let name = cell_name(*first);
            if name.is_empty() {
                continue;
            }
            let province = cells.get(1).map(|c| stripped_text(*c)).unwrap_or_default();
            records.push(AttractionRecord::new(name, province, country, ANCIENT_TOWN_SOURCE));
        }
    }
    Ok(records)
}

#[async_trait::async_trait]
impl Extractor for AncientTownExtractor {
    fn id(&self) -> &'static str {
        ANCIENT_TOWNS_ID
    }

    fn labels(&self) -> ProgressLabels {
        ProgressLabels {
            crawling: "中国古镇",
            counted: "古镇",
            failed: Some("古镇"),
        }
    }

    #[instrument(skip_all, fields(extractor = ANCIENT_TOWNS_ID))]
    async fn extract(&self, fetcher: &dyn PageFetcher, store: &mut RecordStore) -> ExtractReport {
        let mut report = ExtractReport::new(self.id());
        let country = self.country.as_str();
        crawl_single_page(fetcher, &self.url, store, &mut report, |html| {
            parse_ancient_towns(html, country)
        })
        .await;
        info!("Added {} historic towns", report.added);
        report
    }
}
