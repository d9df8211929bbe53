use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use nw_core::{Error, IntervalUnit, Result, SearchRequest};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::error;

use crate::AppState;

/// Query parameters for the search endpoint. `intervalUnit` arrives as a
/// raw string so the case-insensitive/singular parsing rules apply.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    pub keyword: Option<String>,
    pub interval_value: Option<i64>,
    pub interval_unit: Option<String>,
    pub offline_mode: Option<bool>,
}

impl SearchParams {
    pub fn into_request(self) -> Result<SearchRequest> {
        let interval_unit = self
            .interval_unit
            .map(|raw| raw.parse::<IntervalUnit>())
            .transpose()?;
        Ok(SearchRequest {
            keyword: self.keyword.unwrap_or_default(),
            interval_value: self.interval_value,
            interval_unit,
            offline_mode: self.offline_mode,
        })
    }
}

pub async fn search_news(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    let request = match params.into_request() {
        Ok(request) => request,
        Err(err) => return error_response(err),
    };
    match state.orchestrator.search(request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => error_response(err),
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.orchestrator.health().await)
}

pub async fn cache_stats(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.cache.stats().await)
}

pub async fn clear_cache(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    state.cache.clear().await;
    Json(json!({
        "status": "success",
        "message": "Cache cleared"
    }))
}

fn error_response(err: Error) -> axum::response::Response {
    let status = match err {
        Error::Validation(_) => StatusCode::BAD_REQUEST,
        _ => {
            error!("Unexpected error handling request: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let body = Json(json!({
        "status": "error",
        "message": err.to_string()
    }));
    (status, body).into_response()
}
