use crate::common::constants::{
    DEFAULT_BASE_URL, DEFAULT_CONFIG_PATH, DEFAULT_COUNTRY, DEFAULT_OUTPUT_PATH, DEFAULT_USER_AGENT,
};
use crate::common::error::{CrawlError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub province_delay_ms: u64,
    pub mountain_delay_ms: u64,
    pub country: String,
    pub output_path: String,
    pub sample_limit: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 10,
            province_delay_ms: 500,
            mountain_delay_ms: 300,
            country: DEFAULT_COUNTRY.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            sample_limit: 50,
        }
    }
}

impl CrawlerConfig {
    /// Load an explicitly requested config file; it must exist and parse.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CrawlError::Config(format!("Failed to read config file '{}': {}", path.display(), e))
        })?;
        let config: CrawlerConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `path` if given, else `crawler.toml` when present, else defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load_from(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Self::load_from(default_path)
                } else {
                    debug!("no {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }

    /// Absolute address of a wiki page title.
    pub fn page_url(&self, title: &str) -> String {
        format!("{}{}", self.base_url, title)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn province_delay(&self) -> Duration {
        Duration::from_millis(self.province_delay_ms)
    }

    pub fn mountain_delay(&self) -> Duration {
        Duration::from_millis(self.mountain_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "province_delay_ms = 0\nsample_limit = 10").unwrap();

        let config = CrawlerConfig::load_from(file.path()).unwrap();
        assert_eq!(config.province_delay_ms, 0);
        assert_eq!(config.sample_limit, 10);
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.country, "中国");
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let err = CrawlerConfig::load(Some(Path::new("/nonexistent/crawler.toml"))).unwrap_err();
        assert!(matches!(err, CrawlError::Config(_)));
    }

    #[test]
    fn test_invalid_toml_is_reported() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"soon\"").unwrap();
        let err = CrawlerConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, CrawlError::Toml(_)));
    }

    #[test]
    fn test_page_url_joins_title() {
        let config = CrawlerConfig::default();
        assert_eq!(
            config.page_url("中国五岳"),
            "https://zh.wikipedia.org/wiki/中国五岳"
        );
    }
}
