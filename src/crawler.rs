use crate::extractor::JobExtractor;
use crate::models::{CategoryLink, CrawlResult, FailureEntry, JobRecord, SubcategoryLink};
use crate::renderer::{PageRenderer, SessionPool};
use crate::{CrawlError, Result};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Category → subcategory → listing traversal for one site.
///
/// Implementors supply discovery and extraction; the provided methods drive
/// the crawl and turn every failed branch into a [`FailureEntry`] instead of
/// aborting the run.
pub trait JobCrawler: Sync {
    fn resolve_categories(&self) -> Result<Vec<CategoryLink>>;

    fn resolve_subcategories(&self, category: &CategoryLink) -> Result<Vec<SubcategoryLink>>;

    fn extractor(&self) -> &dyn JobExtractor;

    /// Resolves categories first and only opens render sessions when there is
    /// something to crawl. Sessions are released before returning.
    fn fetch_all_jobs<R, F>(&self, open_sessions: F) -> Result<CrawlResult>
    where
        R: PageRenderer + Send,
        F: FnOnce() -> Result<SessionPool<R>>,
    {
        let categories = match self.resolve_categories() {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("❌ failed to load homepage: {}", e);
                return Ok(CrawlResult::default());
            }
        };

        if categories.is_empty() {
            tracing::warn!("no categories found, nothing to crawl");
            return Ok(CrawlResult::default());
        }
        tracing::info!("{} categories found", categories.len());

        let sessions = open_sessions()?;
        let result = self.crawl_categories(&categories, &sessions);
        sessions.release();

        Ok(result)
    }

    fn crawl_categories<R>(
        &self,
        categories: &[CategoryLink],
        sessions: &SessionPool<R>,
    ) -> CrawlResult
    where
        R: PageRenderer + Send,
    {
        let mut result = CrawlResult::default();

        for category in categories {
            let subcategories = match self.resolve_subcategories(category) {
                Ok(subcategories) => subcategories,
                Err(e) => {
                    tracing::warn!("❌ failed to crawl category {}: {}", category.name, e);
                    result.failures.push(FailureEntry::Category {
                        category: category.name.clone(),
                    });
                    continue;
                }
            };

            if subcategories.is_empty() {
                tracing::info!("no subcategories found for {}", category.name);
                continue;
            }

            // a panic while rendering or extracting fails only its own branch
            let outcomes = sessions.map_branches(&subcategories, |session, branch| {
                panic::catch_unwind(AssertUnwindSafe(|| self.crawl_branch(session, branch)))
                    .unwrap_or_else(|payload| {
                        Err(CrawlError::BranchPanicked(panic_message(payload)))
                    })
            });

            for (branch, outcome) in subcategories.iter().zip(outcomes) {
                match outcome {
                    Ok(jobs) => result.records.extend(jobs),
                    Err(e) => {
                        tracing::warn!("❌ failed to crawl subcategory {}: {}", branch.name, e);
                        result.failures.push(FailureEntry::Branch {
                            category: branch.parent_category.clone(),
                            subcategory: branch.name.clone(),
                        });
                    }
                }
            }
        }

        tracing::info!(
            "✅ {} jobs collected, {} branches failed",
            result.records.len(),
            result.failures.len()
        );
        result
    }

    fn crawl_branch<R>(&self, session: &mut R, branch: &SubcategoryLink) -> Result<Vec<JobRecord>>
    where
        R: PageRenderer,
    {
        tracing::info!("scraping: {} → {}", branch.parent_category, branch.name);
        let html = session.render(&branch.url)?;
        let jobs = self.extractor().extract_jobs(&html, branch)?;
        tracing::debug!("{} jobs on {}", jobs.len(), branch.url);
        Ok(jobs)
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}
