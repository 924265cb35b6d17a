pub mod foundit;

pub use foundit::{FounditClient, FounditCrawlConfig};
