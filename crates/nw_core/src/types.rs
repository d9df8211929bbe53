use chrono::{DateTime, Utc};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::interval::IntervalUnit;

/// A single news item. Field names follow the NewsAPI wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub title: String,
    pub description: Option<String>,
    pub content: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub source: Source,
    pub author: Option<String>,
}

/// Articles are deduplicated by `(url, published_at)` only.
impl PartialEq for Article {
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url && self.published_at == other.published_at
    }
}

impl Eq for Article {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: Option<String>,
    pub name: Option<String>,
}

/// One window of the grouped result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalBucket {
    pub interval_label: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub count: usize,
    pub articles: Vec<Article>,
}

/// Insertion-ordered label-to-bucket mapping. Serializes as a JSON object
/// whose keys keep insertion order (most recent window first), which a
/// plain HashMap or BTreeMap would not preserve.
#[derive(Debug, Clone, Default)]
pub struct IntervalGroups {
    buckets: Vec<IntervalBucket>,
}

impl IntervalGroups {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, bucket: IntervalBucket) {
        self.buckets.push(bucket);
    }

    pub fn get(&self, label: &str) -> Option<&IntervalBucket> {
        self.buckets.iter().find(|b| b.interval_label == label)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntervalBucket> {
        self.buckets.iter()
    }

    pub fn total_count(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }
}

impl Serialize for IntervalGroups {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.buckets.len()))?;
        for bucket in &self.buckets {
            map.serialize_entry(&bucket.interval_label, bucket)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IntervalGroups {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct GroupsVisitor;

        impl<'de> Visitor<'de> for GroupsVisitor {
            type Value = IntervalGroups;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of interval labels to buckets")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut groups = IntervalGroups::default();
                while let Some((_, bucket)) = access.next_entry::<String, IntervalBucket>()? {
                    groups.insert(bucket);
                }
                Ok(groups)
            }
        }

        deserializer.deserialize_map(GroupsVisitor)
    }
}

/// Response value for a search. Created fresh per request, never mutated
/// after being returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub keyword: String,
    pub interval_value: u32,
    pub interval_unit: IntervalUnit,
    pub search_timestamp: DateTime<Utc>,
    pub from_cache: bool,
    pub total_articles: usize,
    pub interval_groups: IntervalGroups,
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub news_api_available: bool,
    pub offline_mode_enabled: bool,
    pub timestamp: DateTime<Utc>,
    pub status: String,
}
