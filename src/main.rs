use foundit_crawler::{CrawlPipeline, FounditClient, FounditCrawlConfig, Result};
use tracing_subscriber::EnvFilter;

const OUTPUT_PATH: &str = "foundit_all_jobs.csv";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let result = CrawlPipeline::new()
        .crawl(FounditClient::new(FounditCrawlConfig {
            thread_count: 1,
            ..Default::default()
        })?)?
        .save(OUTPUT_PATH);

    tracing::info!(
        "scraping completed: {} jobs, {} failed branches",
        result.records.len(),
        result.failures.len()
    );

    Ok(())
}
