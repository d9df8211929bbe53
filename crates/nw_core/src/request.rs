use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::interval::IntervalUnit;
use crate::Result;

pub const DEFAULT_INTERVAL_VALUE: u32 = 12;

/// Incoming search parameters. Optional fields are filled with the
/// documented defaults by `validated`, which is the only way to turn a
/// request into something the orchestrator will accept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub keyword: String,
    pub interval_value: Option<i64>,
    pub interval_unit: Option<IntervalUnit>,
    pub offline_mode: Option<bool>,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            ..Self::default()
        }
    }

    /// Apply defaults (interval value 12, hours, online) and validate.
    /// After this, every field of the query is concrete and the interval
    /// value is positive.
    pub fn validated(self) -> Result<SearchQuery> {
        if self.keyword.trim().is_empty() {
            return Err(Error::Validation("Keyword is required".to_string()));
        }
        let interval_value = self.interval_value.unwrap_or(DEFAULT_INTERVAL_VALUE as i64);
        if interval_value <= 0 {
            return Err(Error::Validation(
                "Interval value must be positive".to_string(),
            ));
        }
        // Range-check before narrowing; a plain cast would truncate and
        // turn 2^32 into a zero-width window.
        let interval_value = u32::try_from(interval_value).map_err(|_| {
            Error::Validation(format!(
                "Interval value is too large (maximum {})",
                u32::MAX
            ))
        })?;
        Ok(SearchQuery {
            keyword: self.keyword,
            interval_value,
            interval_unit: self.interval_unit.unwrap_or_default(),
            offline_mode: self.offline_mode.unwrap_or(false),
        })
    }
}

/// A fully-populated, validated search request.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub keyword: String,
    pub interval_value: u32,
    pub interval_unit: IntervalUnit,
    pub offline_mode: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_once() {
        let query = SearchRequest::new("bitcoin").validated().unwrap();
        assert_eq!(query.keyword, "bitcoin");
        assert_eq!(query.interval_value, 12);
        assert_eq!(query.interval_unit, IntervalUnit::Hours);
        assert!(!query.offline_mode);
    }

    #[test]
    fn test_explicit_values_kept() {
        let request = SearchRequest {
            keyword: "rust".to_string(),
            interval_value: Some(6),
            interval_unit: Some(IntervalUnit::Days),
            offline_mode: Some(true),
        };
        let query = request.validated().unwrap();
        assert_eq!(query.interval_value, 6);
        assert_eq!(query.interval_unit, IntervalUnit::Days);
        assert!(query.offline_mode);
    }

    #[test]
    fn test_blank_keyword_rejected() {
        let err = SearchRequest::new("").validated().unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = SearchRequest::new("   ").validated().unwrap_err();
        assert!(err.to_string().contains("Keyword is required"));
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        let request = SearchRequest {
            keyword: "bitcoin".to_string(),
            interval_value: Some(-5),
            ..Default::default()
        };
        let err = request.validated().unwrap_err();
        assert!(err.to_string().contains("Interval value must be positive"));

        let request = SearchRequest {
            keyword: "bitcoin".to_string(),
            interval_value: Some(0),
            ..Default::default()
        };
        assert!(request.validated().is_err());
    }

    #[test]
    fn test_oversized_interval_rejected_not_truncated() {
        // 2^32 passes the positivity check on i64 but does not fit u32;
        // it must be rejected, not silently narrowed to 0.
        let request = SearchRequest {
            keyword: "bitcoin".to_string(),
            interval_value: Some(1_i64 << 32),
            ..Default::default()
        };
        let err = request.validated().unwrap_err();
        assert!(err.to_string().contains("Interval value is too large"));

        let request = SearchRequest {
            keyword: "bitcoin".to_string(),
            interval_value: Some(i64::MAX),
            ..Default::default()
        };
        assert!(request.validated().is_err());

        // The largest representable value is still accepted; the window
        // arithmetic saturates instead of overflowing.
        let request = SearchRequest {
            keyword: "bitcoin".to_string(),
            interval_value: Some(u32::MAX as i64),
            ..Default::default()
        };
        assert_eq!(request.validated().unwrap().interval_value, u32::MAX);
    }
}
