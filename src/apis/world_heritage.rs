use super::crawl_single_page;
use crate::app::ports::PageFetcher;
use crate::common::constants::{WORLD_HERITAGE_ID, WORLD_HERITAGE_PAGE, WORLD_HERITAGE_SOURCE};
use crate::common::error::{CrawlError, Result};
use crate::common::types::{AttractionRecord, ExtractReport, Extractor, ProgressLabels};
use crate::config::CrawlerConfig;
use crate::parser::{cell_name, data_rows, stripped_text, wikitables};
use crate::storage::RecordStore;
use scraper::Html;
use tracing::{info, instrument};

pub struct WorldHeritageExtractor {
    url: String,
    country: String,
}

impl WorldHeritageExtractor {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            url: config.page_url(WORLD_HERITAGE_PAGE),
            country: config.country.clone(),
        }
    }
}

/// Rows with at least two cells: name from the first cell, province from
/// the third when there is one.
pub fn parse_world_heritage(html: &str, country: &str) -> Result<Vec<AttractionRecord>> {
    let document = Html::parse_document(html);
    let tables = wikitables(&document);
    if tables.is_empty() {
        return Err(CrawlError::anomaly(WORLD_HERITAGE_PAGE, "no wikitable found"));
    }

    let mut records = Vec::new();
    for table in tables {
        for cells in data_rows(table) {
            if cells.len() < 2 {
                continue;
            }
            let name = cell_name(cells[0]);
            if name.is_empty() {
                continue;
            }
            let province = cells.get(2).map(|c| stripped_text(*c)).unwrap_or_default();
            records.push(AttractionRecord::new(name, province, country, WORLD_HERITAGE_SOURCE));
        }
    }
    Ok(records)
}

#[async_trait::async_trait]
impl Extractor for WorldHeritageExtractor {
    fn id(&self) -> &'static str {
        WORLD_HERITAGE_ID
    }

    fn labels(&self) -> ProgressLabels {
        ProgressLabels {
            crawling: "中国世界遗产",
            counted: "中国世界遗产",
            failed: Some("世界遗产"),
        }
    }

    #[instrument(skip_all, fields(extractor = WORLD_HERITAGE_ID))]
    async fn extract(&self, fetcher: &dyn PageFetcher, store: &mut RecordStore) -> ExtractReport {
        let mut report = ExtractReport::new(self.id());
        let country = self.country.as_str();
        crawl_single_page(fetcher, &self.url, store, &mut report, |html| {
            parse_world_heritage(html, country)
        })
        .await;
        info!("Added {} world heritage sites", report.added);
        report
    }
}
