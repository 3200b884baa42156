use super::crawl_single_page;
use crate::app::ports::PageFetcher;
use crate::common::constants::{SCENIC_5A_ID, SCENIC_5A_PAGE, SCENIC_5A_SOURCE};
use crate::common::error::{CrawlError, Result};
use crate::common::types::{AttractionRecord, ExtractReport, Extractor, ProgressLabels};
use crate::config::CrawlerConfig;
use crate::parser::{char_len, data_rows, first_link, stripped_text, wikitables};
use crate::storage::RecordStore;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Html;
use tracing::{info, instrument};

/// Administrative suffixes that mark a cell as naming a region.
static REGION_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new("省|市|自治区|特别行政区").expect("static pattern"));

pub struct ScenicAreaExtractor {
    url: String,
    country: String,
}

impl ScenicAreaExtractor {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            url: config.page_url(SCENIC_5A_PAGE),
            country: config.country.clone(),
        }
    }
}

/// The 5A tables have no fixed column order.
///
/// Name: the first cell from index 1 on that holds a link and more than two
/// characters of text. Province: the last cell whose text carries a region
/// suffix. Name keeps the first match, province the last.
pub fn parse_scenic_areas(html: &str, country: &str) -> Result<Vec<AttractionRecord>> {
    let document = Html::parse_document(html);
    let tables = wikitables(&document);
    if tables.is_empty() {
        return Err(CrawlError::anomaly(SCENIC_5A_PAGE, "no wikitable found"));
    }

    let mut records = Vec::new();
    for table in tables {
        for cells in data_rows(table) {
            if cells.len() < 2 {
                continue;
            }
            let mut name = String::new();
            let mut province = String::new();
            for (idx, cell) in cells.iter().enumerate() {
                let text = stripped_text(*cell);
                if name.is_empty()
                    && idx >= 1
                    && char_len(&text) > 2
                    && first_link(*cell).is_some()
                {
                    name = text.clone();
                }
                if REGION_MARKER.is_match(&text) {
                    province = text;
                }
            }
            if !name.is_empty() {
                records.push(AttractionRecord::new(name, province, country, SCENIC_5A_SOURCE));
            }
        }
    }
    Ok(records)
}

#[async_trait::async_trait]
impl Extractor for ScenicAreaExtractor {
    fn id(&self) -> &'static str {
        SCENIC_5A_ID
    }

    fn labels(&self) -> ProgressLabels {
        ProgressLabels {
            crawling: "5A级景区",
            counted: "5A级景区",
            failed: Some("5A级景区"),
        }
    }

    #[instrument(skip_all, fields(extractor = SCENIC_5A_ID))]
    async fn extract(&self, fetcher: &dyn PageFetcher, store: &mut RecordStore) -> ExtractReport {
        let mut report = ExtractReport::new(self.id());
        let country = self.country.as_str();
        crawl_single_page(fetcher, &self.url, store, &mut report, |html| {
            parse_scenic_areas(html, country)
        })
        .await;
        info!("Added {} 5A scenic areas", report.added);
        report
    }
}
