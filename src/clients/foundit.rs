use crate::crawler::JobCrawler;
use crate::extractor::{FounditJobExtractor, JobExtractor};
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::models::{CategoryLink, CrawlResult, SubcategoryLink};
use crate::pipeline::Crawler;
use crate::renderer::{ChromeRenderer, RenderOptions, SessionPool};
use crate::resolver::{self, MAX_SUBCATEGORIES};
use crate::{CrawlError, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct FounditCrawlConfig {
    pub base_url: String,
    pub user_agent: String,
    /// Wait after navigation before the rendered markup is read
    pub settle_delay: Duration,
    /// Upper bound on subcategories visited per category
    pub subcategory_limit: usize,
    /// Number of browser sessions rendering listing pages in parallel
    pub thread_count: usize,
    pub headless: bool,
}

impl Default for FounditCrawlConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.foundit.in".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
            settle_delay: Duration::from_secs(10),
            subcategory_limit: MAX_SUBCATEGORIES,
            thread_count: 1,
            headless: true,
        }
    }
}

impl FounditCrawlConfig {
    fn render_options(&self) -> RenderOptions {
        RenderOptions {
            user_agent: self.user_agent.clone(),
            headless: self.headless,
            settle_delay: self.settle_delay,
        }
    }
}

pub struct FounditClient<F = HttpFetcher> {
    config: FounditCrawlConfig,
    fetcher: F,
    extractor: FounditJobExtractor,
}

impl FounditClient<HttpFetcher> {
    pub fn new(config: FounditCrawlConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        Self::with_fetcher(config, fetcher)
    }
}

impl<F: PageFetcher> FounditClient<F> {
    pub fn with_fetcher(config: FounditCrawlConfig, fetcher: F) -> Result<Self> {
        let extractor = FounditJobExtractor::new(&config.base_url)?;
        Ok(Self {
            config,
            fetcher,
            extractor,
        })
    }
}

impl<F> JobCrawler for FounditClient<F>
where
    F: PageFetcher + Sync,
{
    fn resolve_categories(&self) -> Result<Vec<CategoryLink>> {
        let html = self.fetcher.fetch(&self.config.base_url)?;
        resolver::parse_categories(&html, &self.config.base_url)
    }

    fn resolve_subcategories(&self, category: &CategoryLink) -> Result<Vec<SubcategoryLink>> {
        let html = match self.fetcher.fetch(&category.url) {
            Ok(html) => html,
            Err(CrawlError::Fetch { url, status }) => {
                tracing::warn!("❌ failed to load {}: HTTP {}", url, status);
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        resolver::parse_subcategories(
            &html,
            category,
            &self.config.base_url,
            self.config.subcategory_limit,
        )
    }

    fn extractor(&self) -> &dyn JobExtractor {
        &self.extractor
    }
}

impl<F> Crawler for FounditClient<F>
where
    F: PageFetcher + Sync,
{
    fn start_crawl(&self) -> Result<CrawlResult> {
        tracing::info!("collecting foundit job listings.. ({})", self.config.base_url);

        let options = self.config.render_options();
        self.fetch_all_jobs(|| {
            SessionPool::launch_with(self.config.thread_count, || ChromeRenderer::launch(&options))
        })
        .inspect(|result| {
            tracing::info!("✅ {} foundit jobs collected", result.records.len())
        })
        .inspect_err(|e| tracing::error!("❌ foundit crawl failed: {}", e))
    }
}
