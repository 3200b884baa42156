use crate::app::ports::{FetchedPage, PageFetcher};
use crate::common::error::{CrawlError, Result};
use crate::config::CrawlerConfig;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

/// `PageFetcher` over one shared reqwest client, so connections are reused
/// across the whole crawl.
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        let agent = HeaderValue::from_str(&config.user_agent).map_err(|e| {
            CrawlError::Config(format!("invalid user_agent '{}': {}", config.user_agent, e))
        })?;
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, agent);
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        debug!("HTTP GET request to: {}", url);
        let fetch_error = |e: reqwest::Error| CrawlError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        };
        let resp = self.client.get(url).send().await.map_err(fetch_error)?;
        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(fetch_error)?;
        debug!("HTTP response: status={}, size={} bytes", status, body.len());
        Ok(FetchedPage {
            url: url.to_string(),
            status,
            body,
        })
    }
}
