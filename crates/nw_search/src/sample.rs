use chrono::{DateTime, Duration, Utc};
use nw_core::{Article, Source};

const SAMPLE_COUNT: usize = 10;

/// Deterministic placeholder articles referencing `keyword`, used to keep
/// the offline path responsive when the cache has nothing. Never treated
/// as real news.
pub fn sample_articles(keyword: &str, now: DateTime<Utc>) -> Vec<Article> {
    (0..SAMPLE_COUNT)
        .map(|i| Article {
            title: format!("Sample {} news article {}", keyword, i + 1),
            description: Some(format!(
                "This is a sample news article about {} for offline demonstration.",
                keyword
            )),
            content: Some(format!("Sample content for {} article {}", keyword, i + 1)),
            url: format!("https://example.com/news/{}", i + 1),
            url_to_image: Some(format!("https://example.com/images/{}.jpg", i + 1)),
            published_at: Some(now - Duration::hours(i as i64 * 2)),
            source: Source {
                id: Some("sample-source".to_string()),
                name: Some("Sample News Source".to_string()),
            },
            author: Some(format!("Sample Author {}", i + 1)),
        })
        .collect()
}
