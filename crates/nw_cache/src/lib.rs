use chrono::{DateTime, Duration, Utc};
use nw_core::Article;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

pub const DEFAULT_TTL_HOURS: i64 = 24;
pub const DEFAULT_CLEANUP_PERIOD: std::time::Duration = std::time::Duration::from_secs(3600);

/// One cached search: the normalized keyword it was stored under, a
/// defensive copy of the articles, and the time it was stamped.
#[derive(Debug, Clone)]
struct CacheEntry {
    keyword: String,
    articles: Vec<Article>,
    cached_at: DateTime<Utc>,
}

/// In-memory keyword-to-articles store with TTL expiry and fuzzy lookup.
/// Entries are replaced whole under the write lock, so concurrent readers
/// never observe a partially written entry. State does not survive a
/// process restart.
pub struct CacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn with_default_ttl() -> Self {
        Self::new(Duration::hours(DEFAULT_TTL_HOURS))
    }

    /// Store search results for offline access. Blank keywords and empty
    /// result lists are silently ignored.
    pub async fn put(&self, keyword: &str, articles: &[Article]) {
        self.put_at(keyword, articles, Utc::now()).await;
    }

    async fn put_at(&self, keyword: &str, articles: &[Article], cached_at: DateTime<Utc>) {
        if keyword.trim().is_empty() || articles.is_empty() {
            return;
        }
        let key = normalize(keyword);
        let entry = CacheEntry {
            keyword: key.clone(),
            articles: articles.to_vec(),
            cached_at,
        };
        self.entries.write().await.insert(key.clone(), entry);
        debug!("💾 Cached {} articles under '{}'", articles.len(), key);
    }

    /// Look up cached articles. Falls back to a substring match in either
    /// direction when no exact key exists; a miss is an empty list, never
    /// an error. Expired entries are treated as absent whether or not
    /// cleanup has removed them yet.
    pub async fn get(&self, keyword: &str) -> Vec<Article> {
        self.get_at(keyword, Utc::now()).await
    }

    async fn get_at(&self, keyword: &str, now: DateTime<Utc>) -> Vec<Article> {
        if keyword.trim().is_empty() {
            return Vec::new();
        }
        let key = normalize(keyword);
        let entries = self.entries.read().await;

        if let Some(entry) = entries.get(&key) {
            if !self.is_expired(entry, now) {
                return entry.articles.clone();
            }
        }

        entries
            .values()
            .filter(|entry| !self.is_expired(entry, now))
            .find(|entry| entry.keyword.contains(&key) || key.contains(&entry.keyword))
            .map(|entry| entry.articles.clone())
            .unwrap_or_default()
    }

    pub async fn stats(&self) -> CacheStats {
        self.stats_at(Utc::now()).await
    }

    async fn stats_at(&self, now: DateTime<Utc>) -> CacheStats {
        let entries = self.entries.read().await;
        let valid = entries
            .values()
            .filter(|entry| !self.is_expired(entry, now))
            .count();
        CacheStats {
            total_cached_keywords: entries.len(),
            cache_duration: self.ttl.to_string(),
            valid_cached_entries: valid,
            expired_entries: entries.len() - valid,
            cached_keywords: entries.keys().cloned().collect(),
        }
    }

    /// Drop every entry older than the TTL.
    pub async fn cleanup_expired(&self) {
        let now = Utc::now();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !self.is_expired(entry, now));
        let removed = before - entries.len();
        if removed > 0 {
            info!("🧹 Removed {} expired cache entries", removed);
        }
    }

    /// Administrative reset: drop everything unconditionally.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
        info!("🧹 Cache cleared");
    }

    fn is_expired(&self, entry: &CacheEntry, now: DateTime<Utc>) -> bool {
        now > entry.cached_at + self.ttl
    }

    /// Start the periodic cleanup task. The handle owns the task; abort
    /// it on shutdown.
    pub fn spawn_cleanup(self: &Arc<Self>, period: std::time::Duration) -> JoinHandle<()> {
        let store = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; skip it so a fresh cache
            // is not scanned at startup.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                store.cleanup_expired().await;
            }
        })
    }
}

fn normalize(keyword: &str) -> String {
    keyword.trim().to_lowercase()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub total_cached_keywords: usize,
    pub cache_duration: String,
    pub valid_cached_entries: usize,
    pub expired_entries: usize,
    pub cached_keywords: Vec<String>,
}
