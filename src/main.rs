use china_attractions::common::constants;
use china_attractions::config::CrawlerConfig;
use china_attractions::infra::ReqwestFetcher;
use china_attractions::logging;
use china_attractions::persist;
use china_attractions::pipeline::Pipeline;
use china_attractions::report::{sample_table, Summary};
use china_attractions::storage::RecordStore;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "china_attractions")]
#[command(about = "Collects well-known Chinese tourist attractions from Wikipedia")]
#[command(version = "0.1.0")]
struct Cli {
    /// Config file (default: crawler.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the JSON output
    #[arg(long)]
    output: Option<PathBuf>,

    /// Rows shown in the sample table
    #[arg(long)]
    limit: Option<usize>,

    /// Sources to crawl (comma-separated). Available: world_heritage,
    /// scenic_5a, mountains, ancient_towns, provincial
    #[arg(long)]
    sources: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let mut config = CrawlerConfig::load(cli.config.as_deref())?;
    if let Some(output) = &cli.output {
        config.output_path = output.to_string_lossy().to_string();
    }
    if let Some(limit) = cli.limit {
        config.sample_limit = limit;
    }

    let sources: Vec<String> = match &cli.sources {
        Some(list) => list.split(',').map(|s| s.trim().to_string()).collect(),
        None => constants::get_supported_extractors()
            .into_iter()
            .map(String::from)
            .collect(),
    };

    println!("🇨🇳 中国景点爬虫启动...\n");
    let fetcher = ReqwestFetcher::new(&config)?;
    let pipeline = Pipeline::with_sources(&fetcher, &config, sources.as_slice());
    info!(extractors = ?pipeline.extractor_ids(), "Starting crawl");

    let mut store = RecordStore::new();
    let result = pipeline.run(&mut store).await;

    if result.error_count() > 0 {
        warn!("{} errors encountered during crawl", result.error_count());
        println!("\n⚠️  Errors encountered:");
        for (extractor, error) in result.errors() {
            println!("   - [{}] {}", extractor, error);
        }
    }

    println!();
    print!("{}", Summary::from_records(store.records()));
    println!();
    print!("{}", sample_table(store.records(), config.sample_limit));
    println!();

    let output_path = Path::new(&config.output_path);
    persist::save_json(output_path, store.records())?;
    println!("✅ 已保存 {} 个景点到 {}", store.len(), output_path.display());
    println!("✅ 爬取完成！耗时 {:.1} 秒", result.elapsed_secs());

    Ok(())
}
