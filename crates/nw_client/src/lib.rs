use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nw_core::{Article, Result};

pub mod newsapi;
pub mod retry;

pub use newsapi::{NewsApiClient, NewsApiConfig};

/// Upstream source of news articles. The orchestrator only talks to this
/// trait, so tests can substitute a mock source.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Search for articles about `keyword` published between `from` and `to`.
    async fn search(
        &self,
        keyword: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Article>>;

    /// Availability probe. Must never error; failures mean unavailable.
    async fn is_available(&self) -> bool;
}
