use crate::apis::create_extractor;
use crate::app::ports::PageFetcher;
use crate::common::constants::EXTRACTOR_ORDER;
use crate::common::error::CrawlError;
use crate::common::types::{ExtractReport, Extractor, ProgressLabels};
use crate::config::CrawlerConfig;
use crate::report::count_for_source;
use crate::storage::RecordStore;
use chrono::{DateTime, Utc};
use tracing::{info, instrument, warn};

/// Result of a complete crawl
#[derive(Debug)]
pub struct PipelineResult {
    pub reports: Vec<ExtractReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl PipelineResult {
    /// Every collected error, in extractor order.
    pub fn errors(&self) -> impl Iterator<Item = (&'static str, &CrawlError)> {
        self.reports
            .iter()
            .flat_map(|r| r.errors.iter().map(move |e| (r.extractor, e)))
    }

    pub fn error_count(&self) -> usize {
        self.reports.iter().map(|r| r.errors.len()).sum()
    }

    pub fn elapsed_secs(&self) -> f64 {
        (self.finished_at - self.started_at).num_milliseconds() as f64 / 1000.0
    }
}

/// Closing progress line for one extractor: a failure line when a
/// single-page source produced nothing but errors, else the source's count.
pub fn outcome_line(labels: &ProgressLabels, report: &ExtractReport, total: usize) -> String {
    let failure = labels
        .failed
        .zip(report.errors.first())
        .filter(|_| report.added == 0);
    match failure {
        Some((label, error)) => format!("  ✗ {}爬取失败: {}", label, error),
        None => format!("  ✓ {}: {} 个", labels.counted, total),
    }
}

/// Runs the extractors one after another against a shared store.
pub struct Pipeline<'a> {
    fetcher: &'a dyn PageFetcher,
    extractors: Vec<Box<dyn Extractor>>,
}

impl<'a> Pipeline<'a> {
    /// All extractors, in the fixed order.
    pub fn new(fetcher: &'a dyn PageFetcher, config: &CrawlerConfig) -> Self {
        Self::with_sources(fetcher, config, &EXTRACTOR_ORDER[..])
    }

    /// Only the named extractors, still in the fixed order. Unknown names
    /// are logged and ignored.
    pub fn with_sources<S: AsRef<str>>(
        fetcher: &'a dyn PageFetcher,
        config: &CrawlerConfig,
        sources: &[S],
    ) -> Self {
        for unknown in sources
            .iter()
            .map(|s| s.as_ref())
            .filter(|s| !EXTRACTOR_ORDER.contains(s))
        {
            warn!("Unknown source '{}' ignored", unknown);
        }
        let extractors = EXTRACTOR_ORDER
            .iter()
            .filter(|id| sources.iter().any(|s| s.as_ref() == **id))
            .filter_map(|id| create_extractor(id, config))
            .collect();
        Self { fetcher, extractors }
    }

    pub fn extractor_ids(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.id()).collect()
    }

    #[instrument(skip_all)]
    pub async fn run(&self, store: &mut RecordStore) -> PipelineResult {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(self.extractors.len());

        for extractor in &self.extractors {
            let labels = extractor.labels();
            println!("📍 正在爬取{}...", labels.crawling);
            let report = extractor.extract(self.fetcher, store).await;

            let total = count_for_source(store.records(), extractor.id());
            println!("{}", outcome_line(&labels, &report, total));
            info!(
                extractor = extractor.id(),
                added = report.added,
                skipped = report.skipped,
                errors = report.errors.len(),
                "extractor finished"
            );
            reports.push(report);
        }

        PipelineResult {
            reports,
            started_at,
            finished_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SINGLE_PAGE: ProgressLabels = ProgressLabels {
        crawling: "中国世界遗产",
        counted: "中国世界遗产",
        failed: Some("世界遗产"),
    };

    const MULTI_PAGE: ProgressLabels = ProgressLabels {
        crawling: "中国名山",
        counted: "名山",
        failed: None,
    };

    fn failed_report(added: usize) -> ExtractReport {
        let mut report = ExtractReport::new("world_heritage");
        report.added = added;
        report.errors.push(CrawlError::Status {
            url: "https://zh.wikipedia.org/wiki/x".to_string(),
            status: 503,
        });
        report
    }

    #[test]
    fn test_single_page_failure_line() {
        let line = outcome_line(&SINGLE_PAGE, &failed_report(0), 0);
        assert!(line.starts_with("  ✗ 世界遗产爬取失败: "));
        assert!(line.contains("503"));
    }

    #[test]
    fn test_count_line_when_records_were_added() {
        assert_eq!(outcome_line(&SINGLE_PAGE, &failed_report(2), 2), "  ✓ 中国世界遗产: 2 个");
        let clean = ExtractReport::new("world_heritage");
        assert_eq!(outcome_line(&SINGLE_PAGE, &clean, 0), "  ✓ 中国世界遗产: 0 个");
    }

    #[test]
    fn test_multi_page_sources_always_report_count() {
        assert_eq!(outcome_line(&MULTI_PAGE, &failed_report(0), 0), "  ✓ 名山: 0 个");
    }
}
