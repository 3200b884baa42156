use crate::app::ports::{fetch_success, PageFetcher};
use crate::common::constants::{
    MOUNTAINS_ID, MOUNTAIN_CHAR, MOUNTAIN_EXCLUDED_PREFIXES, MOUNTAIN_LIST_PAGES,
    MOUNTAIN_NAME_MAX_CHARS, MOUNTAIN_SOURCE,
};
use crate::common::error::{CrawlError, Result};
use crate::common::types::{AttractionRecord, ExtractReport, Extractor, ProgressLabels};
use crate::config::CrawlerConfig;
use crate::parser::{char_len, stripped_text};
use crate::storage::RecordStore;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::{info, instrument, trace, warn};

static CONTENT_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#mw-content-text a[href]").expect("static selector"));
static CONTENT: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div#mw-content-text").expect("static selector"));

pub struct MountainExtractor {
    urls: Vec<String>,
    country: String,
    delay: Duration,
}

impl MountainExtractor {
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            urls: MOUNTAIN_LIST_PAGES.iter().map(|p| config.page_url(p)).collect(),
            country: config.country.clone(),
            delay: config.mountain_delay(),
        }
    }
}

/// A link text counts as a mountain when it names one (contains 山), is
/// short, and is not an edit/reference link.
pub fn validate_mountain_name(text: &str) -> Result<()> {
    let reason = if text.is_empty() {
        "empty"
    } else if !text.contains(MOUNTAIN_CHAR) {
        "no mountain character"
    } else if char_len(text) > MOUNTAIN_NAME_MAX_CHARS {
        "too long"
    } else if MOUNTAIN_EXCLUDED_PREFIXES.iter().any(|p| text.starts_with(p)) {
        "excluded prefix"
    } else {
        return Ok(());
    };
    Err(CrawlError::NameRejected {
        name: text.to_string(),
        reason,
    })
}

/// Scan every link in the main content container of one list page.
pub fn parse_mountain_page(
    html: &str,
    source_page: &str,
    country: &str,
) -> Result<Vec<AttractionRecord>> {
    let document = Html::parse_document(html);
    if document.select(&CONTENT).next().is_none() {
        return Err(CrawlError::anomaly(source_page, "no main content container"));
    }

    let mut records = Vec::new();
    for link in document.select(&CONTENT_LINKS) {
        let text = stripped_text(link);
        match validate_mountain_name(&text) {
            Ok(()) => records.push(AttractionRecord::new(text, "", country, MOUNTAIN_SOURCE)),
            Err(e) => trace!("{}", e),
        }
    }
    Ok(records)
}

#[async_trait::async_trait]
impl Extractor for MountainExtractor {
    fn id(&self) -> &'static str {
        MOUNTAINS_ID
    }

    fn labels(&self) -> ProgressLabels {
        ProgressLabels {
            crawling: "中国名山",
            counted: "名山",
            failed: None,
        }
    }

    #[instrument(skip_all, fields(extractor = MOUNTAINS_ID))]
    async fn extract(&self, fetcher: &dyn PageFetcher, store: &mut RecordStore) -> ExtractReport {
        let mut report = ExtractReport::new(self.id());
        for url in &self.urls {
            let parsed = match fetch_success(fetcher, url).await {
                Ok(body) => parse_mountain_page(&body, url, &self.country),
                Err(e) => Err(e),
            };
            match parsed {
                Ok(candidates) => report.absorb(store, candidates),
                Err(e) => {
                    warn!("mountain list skipped: {}", e);
                    report.errors.push(e);
                }
            }
            tokio::time::sleep(self.delay).await;
        }
        info!("Added {} famous mountains", report.added);
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apis::test_support::MockFetcher;

    #[test]
    fn test_mountain_name_filter() {
        assert!(validate_mountain_name("泰山").is_ok());
        assert!(validate_mountain_name("峨眉山").is_ok());
        assert!(validate_mountain_name("").is_err());
        assert!(validate_mountain_name("五岳").is_err());
        assert!(validate_mountain_name("编辑山").is_err());
        assert!(validate_mountain_name("参考山文献").is_err());
        assert!(validate_mountain_name("中国四大佛教名山之首九华山").is_err());
        assert!(validate_mountain_name("一二三四五六七八九山").is_ok());
        assert!(validate_mountain_name("一二三四五六七八九十山").is_err());
    }

    #[test]
    fn test_only_links_inside_content_count() {
        let html = r##"<body>
            <div id="mw-navigation"><a href="/x">导航山</a></div>
            <div id="mw-content-text">
              <p><a href="/泰山">泰山</a>、<a href="/华山">华山</a>、<a>无链接山</a></p>
              <p><a href="/衡阳">衡阳市</a><a href="#e">编辑山</a></p>
            </div>
        </body>"##;
        let names: Vec<String> = parse_mountain_page(html, "中国五岳", "中国")
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["泰山", "华山"]);
    }

    #[test]
    fn test_missing_content_container_is_anomaly() {
        let html = "<body><a href='/a'>泰山</a></body>";
        let err = parse_mountain_page(html, "中国五岳", "中国").unwrap_err();
        assert!(matches!(err, CrawlError::ParseAnomaly { .. }));
    }

    #[tokio::test]
    async fn test_failed_page_does_not_stop_the_others() {
        let config = CrawlerConfig {
            mountain_delay_ms: 0,
            ..CrawlerConfig::default()
        };
        let page =
            r#"<div id="mw-content-text"><a href="/a">普陀山</a><a href="/b">泰山</a></div>"#;
        let fetcher = MockFetcher::new()
            .broken(&config.page_url("中国五岳"))
            .page(&config.page_url("中国四大佛教名山"), page)
            .page(&config.page_url("中国四大道教名山"), page);
        let mut store = RecordStore::new();

        let report = MountainExtractor::new(&config).extract(&fetcher, &mut store).await;

        assert_eq!(report.added, 2);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(fetcher.requested.lock().unwrap().len(), 3);
        assert!(store.records().iter().all(|r| r.source == "名山" && r.province.is_empty()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pauses_after_every_list_page() {
        let config = CrawlerConfig::default();
        let page = r#"<div id="mw-content-text"><a href="/a">峨眉山</a></div>"#;
        let fetcher = MockFetcher::new()
            .status(&config.page_url("中国五岳"), 503)
            .page(&config.page_url("中国四大佛教名山"), page);
        let mut store = RecordStore::new();

        let started = tokio::time::Instant::now();
        let report = MountainExtractor::new(&config).extract(&fetcher, &mut store).await;
        let elapsed = started.elapsed();

        assert_eq!(
            *fetcher.requested.lock().unwrap(),
            vec![
                config.page_url("中国五岳"),
                config.page_url("中国四大佛教名山"),
                config.page_url("中国四大道教名山"),
            ]
        );
        assert_eq!(report.added, 1);
        assert_eq!(report.errors.len(), 2);
        // 300 ms after each of the three pages
        assert!(elapsed >= Duration::from_millis(900));
        assert!(elapsed < Duration::from_millis(1000));
    }
}
