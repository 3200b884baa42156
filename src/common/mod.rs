// Common utilities and shared types used across the application

pub mod constants;
pub mod error;
pub mod types;

pub use error::{CrawlError, Result};
pub use types::{AttractionRecord, ExtractReport, Extractor};
