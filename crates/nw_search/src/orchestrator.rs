use chrono::Utc;
use nw_cache::CacheStore;
use nw_client::NewsSource;
use nw_core::{HealthStatus, Result, SearchQuery, SearchRequest, SearchResult};
use std::sync::Arc;
use tracing::{info, warn};

use crate::grouping::group_articles;
use crate::sample::sample_articles;

/// Composes the news source, the cache and the grouper. Decides the
/// online-vs-offline path per request and absorbs upstream failures into
/// the offline fallback; the only errors that escape are request-shape
/// problems. Holds no per-request state of its own.
pub struct SearchOrchestrator {
    source: Arc<dyn NewsSource>,
    cache: Arc<CacheStore>,
    offline_mode_enabled: bool,
}

impl SearchOrchestrator {
    pub fn new(source: Arc<dyn NewsSource>, cache: Arc<CacheStore>, offline_mode_enabled: bool) -> Self {
        Self {
            source,
            cache,
            offline_mode_enabled,
        }
    }

    pub fn cache(&self) -> &Arc<CacheStore> {
        &self.cache
    }

    /// Search for news about the requested keyword, grouped into time
    /// windows. Validation errors surface immediately; everything else
    /// degrades gracefully to the offline path.
    pub async fn search(&self, request: SearchRequest) -> Result<SearchResult> {
        let query = request.validated()?;

        if query.offline_mode {
            return Ok(self.search_offline(&query).await);
        }

        match self.search_online(&query).await {
            Ok(result) => Ok(result),
            Err(err) => {
                warn!(
                    "Online search for '{}' failed, falling back to offline cache: {}",
                    query.keyword, err
                );
                Ok(self.search_offline(&query).await)
            }
        }
    }

    async fn search_online(&self, query: &SearchQuery) -> Result<SearchResult> {
        let now = Utc::now();
        let from = query.interval_unit.window_start(now, query.interval_value);
        let articles = self.source.search(&query.keyword, from, now).await?;

        let groups = group_articles(&articles, query.interval_value, query.interval_unit);
        // Remember the raw list so a later outage can still answer.
        self.cache.put(&query.keyword, &articles).await;

        Ok(SearchResult {
            keyword: query.keyword.clone(),
            interval_value: query.interval_value,
            interval_unit: query.interval_unit,
            search_timestamp: now,
            from_cache: false,
            total_articles: articles.len(),
            interval_groups: groups,
            status: "success".to_string(),
            message: "Results fetched from NewsAPI".to_string(),
        })
    }

    async fn search_offline(&self, query: &SearchQuery) -> SearchResult {
        let cached = self.cache.get(&query.keyword).await;
        let (articles, message) = if cached.is_empty() {
            info!(
                "📭 No cached results for '{}', generating sample data",
                query.keyword
            );
            (
                sample_articles(&query.keyword, Utc::now()),
                "No cached results available, returning sample data".to_string(),
            )
        } else {
            info!(
                "📦 Serving {} cached articles for '{}'",
                cached.len(),
                query.keyword
            );
            (cached, "Results from offline cache".to_string())
        };

        let groups = group_articles(&articles, query.interval_value, query.interval_unit);

        SearchResult {
            keyword: query.keyword.clone(),
            interval_value: query.interval_value,
            interval_unit: query.interval_unit,
            search_timestamp: Utc::now(),
            from_cache: true,
            total_articles: articles.len(),
            interval_groups: groups,
            status: "success".to_string(),
            message,
        }
    }

    /// Probe the upstream source. Never errors; a failed probe reports
    /// the service as degraded.
    pub async fn health(&self) -> HealthStatus {
        let available = self.source.is_available().await;
        HealthStatus {
            news_api_available: available,
            offline_mode_enabled: self.offline_mode_enabled,
            timestamp: Utc::now(),
            status: if available { "UP" } else { "DEGRADED" }.to_string(),
        }
    }
}
