use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetching {url} failed: {message}")]
    Fetch { url: String, message: String },

    #[error("{url} answered with status {status}")]
    Status { url: String, status: u16 },

    #[error("{source_page}: {detail}")]
    ParseAnomaly { source_page: String, detail: String },

    #[error("name '{name}' rejected: {reason}")]
    NameRejected { name: String, reason: &'static str },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl CrawlError {
    pub fn anomaly(source_page: impl Into<String>, detail: impl Into<String>) -> Self {
        CrawlError::ParseAnomaly {
            source_page: source_page.into(),
            detail: detail.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CrawlError>;
