use crate::models::CrawlResult;
use crate::writer::save_to_csv;
use crate::Result;

pub struct CrawlPipeline;

#[must_use = "pipeline must end with .save() to execute"]
pub struct PipelineWithJobs {
    result: CrawlResult,
}

impl CrawlPipeline {
    pub fn new() -> Self {
        Self
    }

    pub fn crawl<C>(self, client: C) -> Result<PipelineWithJobs>
    where
        C: Crawler,
    {
        let result = client.start_crawl()?;
        Ok(PipelineWithJobs { result })
    }
}

impl Default for CrawlPipeline {
    fn default() -> Self {
        Self::new()
    }
}

pub trait Crawler {
    fn start_crawl(&self) -> Result<CrawlResult>;
}

impl PipelineWithJobs {
    /// Writes the export and logs every failed branch. Returns the crawl result.
    pub fn save(self, path: impl Into<String>) -> CrawlResult {
        let path: String = path.into();
        self.write(&path);
        self.report_failures();
        self.result
    }

    fn write(&self, path: &str) {
        match save_to_csv(&self.result.records, path) {
            Ok(_) => tracing::info!(
                "✅ csv saved: {} ({} rows)",
                path,
                self.result.records.len()
            ),
            Err(e) => tracing::error!("❌ csv save failed ({}): {}", path, e),
        }
    }

    fn report_failures(&self) {
        if self.result.failures.is_empty() {
            return;
        }

        let failed = self
            .result
            .failures
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        tracing::warn!(
            "failed to scrape these categories/subcategories: [{}]",
            failed.join(", ")
        );
    }
}
