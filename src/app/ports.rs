use crate::common::error::{CrawlError, Result};
use async_trait::async_trait;

/// Fetch capability: one GET per call. Transport failures are `Err`; any
/// HTTP status, successful or not, comes back as `Ok`.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage>;
}

#[derive(Clone, Debug)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// Fetch `url` and treat anything but a 200 as a failure.
pub async fn fetch_success(fetcher: &dyn PageFetcher, url: &str) -> Result<String> {
    let page = fetcher.fetch(url).await?;
    if page.is_success() {
        Ok(page.body)
    } else {
        Err(CrawlError::Status {
            url: page.url,
            status: page.status,
        })
    }
}
