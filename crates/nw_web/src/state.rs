use nw_cache::CacheStore;
use nw_search::SearchOrchestrator;
use std::sync::Arc;

pub struct AppState {
    pub orchestrator: Arc<SearchOrchestrator>,
    pub cache: Arc<CacheStore>,
}
