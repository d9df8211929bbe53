use std::future::Future;
use std::time::Duration;

use nw_core::{Error, Result};
use tracing::warn;

/// Run `op` up to `1 + attempts` times with exponential backoff starting
/// at `base_delay`. Only transient errors are retried; terminal errors
/// (rate limit, bad credentials, malformed request) return immediately.
pub async fn with_backoff<T, F, Fut>(attempts: u32, base_delay: Duration, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut delay = base_delay;
    let mut last = None;
    for attempt in 0..=attempts {
        if attempt > 0 {
            tokio::time::sleep(delay).await;
            delay = delay.saturating_mul(2);
        }
        match op().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < attempts => {
                warn!("attempt {}/{} failed: {}", attempt + 1, attempts + 1, err);
                last = Some(err);
            }
            Err(err) => return Err(err),
        }
    }
    Err(last.unwrap_or_else(|| Error::Internal("retries exhausted".to_string())))
}
