use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use nw_core::{Article, Error, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::retry::with_backoff;
use crate::NewsSource;

const AVAILABILITY_TIMEOUT: Duration = Duration::from_secs(5);
const BACKOFF_BASE_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://newsapi.org/v2".to_string(),
            api_key: String::new(),
            timeout: Duration::from_secs(10),
            retry_attempts: 3,
        }
    }
}

/// Client for NewsAPI.org's Everything endpoint.
pub struct NewsApiClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
    timeout: Duration,
    retry_attempts: u32,
}

impl NewsApiClient {
    pub fn new(config: NewsApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .map_err(|e| Error::Validation(format!("Invalid base URL: {}", e)))?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            http,
            base_url,
            api_key: config.api_key,
            timeout: config.timeout,
            retry_attempts: config.retry_attempts,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        Url::parse(&format!("{}/{}", self.base_url, path))
            .map_err(|e| Error::Internal(format!("Invalid endpoint URL: {}", e)))
    }

    async fn search_once(
        &self,
        keyword: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Article>> {
        let url = self.endpoint("everything")?;
        let response = self
            .http
            .get(url)
            .query(&[
                ("q", keyword),
                ("from", &from.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("to", &to.to_rfc3339_opts(SecondsFormat::Secs, true)),
                ("sortBy", "publishedAt"),
                ("pageSize", "100"),
                ("apiKey", &self.api_key),
            ])
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(classify_status(status));
        }

        let body = response.text().await.map_err(|e| self.classify_transport(e))?;
        let parsed: NewsApiResponse = serde_json::from_str(&body)?;
        debug!(
            "NewsAPI returned {} of {} articles for '{}'",
            parsed.articles.len(),
            parsed.total_results.unwrap_or(0),
            keyword
        );
        Ok(parsed.articles)
    }

    fn classify_transport(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout)
        } else {
            Error::Http(err)
        }
    }
}

fn classify_status(status: StatusCode) -> Error {
    match status {
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimited,
        StatusCode::UNAUTHORIZED => Error::Unauthorized,
        s if s.is_client_error() => Error::Client(s.to_string()),
        s => Error::Server(s.to_string()),
    }
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn search(
        &self,
        keyword: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Article>> {
        let articles = with_backoff(self.retry_attempts, BACKOFF_BASE_DELAY, || {
            self.search_once(keyword, from, to)
        })
        .await?;
        info!("🗞️ Fetched {} articles for '{}'", articles.len(), keyword);
        Ok(articles)
    }

    async fn is_available(&self) -> bool {
        let url = match self.endpoint("top-headlines") {
            Ok(url) => url,
            Err(_) => return false,
        };
        let request = self
            .http
            .get(url)
            .query(&[("country", "us"), ("pageSize", "1"), ("apiKey", &self.api_key)])
            .send();
        match tokio::time::timeout(AVAILABILITY_TIMEOUT, request).await {
            Ok(Ok(response)) => response.status().is_success(),
            _ => false,
        }
    }
}

/// Envelope returned by the Everything endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsApiResponse {
    #[allow(dead_code)]
    status: String,
    total_results: Option<u32>,
    #[serde(default)]
    articles: Vec<Article>,
}
