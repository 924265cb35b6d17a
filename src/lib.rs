pub mod clients;
pub mod crawler;
pub mod extractor;
pub mod fetcher;
pub mod models;
pub mod pipeline;
pub mod renderer;
pub mod resolver;
pub mod writer;

pub use clients::{FounditClient, FounditCrawlConfig};
pub use crawler::JobCrawler;
pub use extractor::{FounditJobExtractor, JobExtractor, JobFields};
pub use fetcher::{HttpFetcher, PageFetcher};
pub use models::{
    CategoryLink, CrawlResult, FailureEntry, JobRecord, NOT_AVAILABLE, SubcategoryLink,
};
pub use pipeline::{CrawlPipeline, Crawler, PipelineWithJobs};
pub use renderer::{ChromeRenderer, PageRenderer, RenderOptions, SessionPool};
pub use writer::save_to_csv;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Static page answered with a non-success status.
    #[error("failed to load {url}: HTTP {status}")]
    Fetch { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Browser navigation or markup read failed.
    #[error("failed to render {url}: {message}")]
    Render { url: String, message: String },

    #[error("browser session error: {0}")]
    Session(String),

    #[error("branch panicked: {0}")]
    BranchPanicked(String),

    #[error("extraction error: {0}")]
    Extraction(String),

    #[error("invalid selector: {0}")]
    Selector(String),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, CrawlError>;
