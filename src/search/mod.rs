use anyhow::Result;

use crate::types::SearchResult;

pub mod serper;
pub mod tavily;

pub use serper::SerperClient;
pub use tavily::TavilyClient;

/// Cap on results requested per claim.
pub const MAX_RESULTS: usize = 5;

#[async_trait::async_trait]
pub trait Searcher: Send + Sync {
    /// Ranked results for `query`, at most `max_results` of them.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>>;
}
