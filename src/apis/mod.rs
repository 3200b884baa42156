pub mod ancient_towns;
pub mod mountains;
pub mod provincial;
pub mod scenic_areas;
pub mod world_heritage;

pub use ancient_towns::AncientTownExtractor;
pub use mountains::MountainExtractor;
pub use provincial::ProvincialExtractor;
pub use scenic_areas::ScenicAreaExtractor;
pub use world_heritage::WorldHeritageExtractor;

use crate::app::ports::{fetch_success, PageFetcher};
use crate::common::constants::{
    ANCIENT_TOWNS_ID, MOUNTAINS_ID, PROVINCIAL_ID, SCENIC_5A_ID, WORLD_HERITAGE_ID,
};
use crate::common::error::Result;
use crate::common::types::{AttractionRecord, ExtractReport, Extractor};
use crate::config::CrawlerConfig;
use crate::storage::RecordStore;
use tracing::warn;

pub fn create_extractor(id: &str, config: &CrawlerConfig) -> Option<Box<dyn Extractor>> {
    match id {
        WORLD_HERITAGE_ID => Some(Box::new(WorldHeritageExtractor::new(config))),
        SCENIC_5A_ID => Some(Box::new(ScenicAreaExtractor::new(config))),
        MOUNTAINS_ID => Some(Box::new(MountainExtractor::new(config))),
        ANCIENT_TOWNS_ID => Some(Box::new(AncientTownExtractor::new(config))),
        PROVINCIAL_ID => Some(Box::new(ProvincialExtractor::new(config))),
        _ => None,
    }
}

/// Fetch one page, run `parse` over its markup and feed the result to the
/// store. A failed fetch or parse lands in `report.errors`.
pub(crate) async fn crawl_single_page<F>(
    fetcher: &dyn PageFetcher,
    url: &str,
    store: &mut RecordStore,
    report: &mut ExtractReport,
    parse: F,
) where
    F: FnOnce(&str) -> Result<Vec<AttractionRecord>> + Send,
{
    let parsed = match fetch_success(fetcher, url).await {
        Ok(body) => parse(&body),
        Err(e) => Err(e),
    };
    match parsed {
        Ok(candidates) => report.absorb(store, candidates),
        Err(e) => {
            warn!("{} failed: {}", report.extractor, e);
            report.errors.push(e);
        }
    }
}
