use crate::app::ports::PageFetcher;
use crate::common::error::CrawlError;
use crate::storage::RecordStore;
use serde::{Deserialize, Serialize};

/// One named tourist site. `name` is the deduplication key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttractionRecord {
    pub name: String,
    pub province: String,
    pub country: String,
    pub source: String,
}

impl AttractionRecord {
    pub fn new(
        name: impl Into<String>,
        province: impl Into<String>,
        country: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            province: province.into(),
            country: country.into(),
            source: source.into(),
        }
    }
}

/// Outcome of one extractor run. Errors are collected, never raised.
#[derive(Debug)]
pub struct ExtractReport {
    pub extractor: &'static str,
    pub added: usize,
    /// Candidates the store refused: duplicate or empty names. Names dropped
    /// by a source's own filter never reach the report.
    pub skipped: usize,
    pub errors: Vec<CrawlError>,
}

impl ExtractReport {
    pub fn new(extractor: &'static str) -> Self {
        Self {
            extractor,
            added: 0,
            skipped: 0,
            errors: Vec::new(),
        }
    }

    /// Route candidates through the store, counting what stuck.
    pub fn absorb(&mut self, store: &mut RecordStore, candidates: Vec<AttractionRecord>) {
        for record in candidates {
            if store.try_add(record) {
                self.added += 1;
            } else {
                self.skipped += 1;
            }
        }
    }

    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Wording of the console progress lines for one source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressLabels {
    /// `📍 正在爬取{crawling}...`
    pub crawling: &'static str,
    /// `✓ {counted}: N 个`
    pub counted: &'static str,
    /// `✗ {failed}爬取失败: ...`; multi-page sources never report outright failure
    pub failed: Option<&'static str>,
}

/// Core trait that all attraction sources must implement
#[async_trait::async_trait]
pub trait Extractor: Send + Sync {
    /// Stable identifier, as accepted by `--sources`
    fn id(&self) -> &'static str;

    /// Labels used in progress output
    fn labels(&self) -> ProgressLabels;

    /// Walk this source's pages and append unseen records to `store`.
    async fn extract(&self, fetcher: &dyn PageFetcher, store: &mut RecordStore) -> ExtractReport;
}
