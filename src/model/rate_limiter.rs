// Request pacing for remote scorer backends.
//
// Perspective's free tier allows 1 QPS. The limiter enforces a minimum gap
// between requests: each acquire sleeps until the interval since the previous
// grant has elapsed.

use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::{Duration, Instant};

/// Enforces a maximum request rate across clones.
#[derive(Clone)]
pub struct RateLimiter {
    state: Arc<Mutex<Option<Instant>>>,
    interval: Duration,
}

impl RateLimiter {
    /// Limiter allowing `requests_per_second` requests per second.
    pub fn new(requests_per_second: f64) -> Self {
        Self {
            state: Arc::new(Mutex::new(None)),
            interval: Duration::from_secs_f64(1.0 / requests_per_second),
        }
    }

    /// Block until the next request is allowed.
    pub async fn acquire(&self) {
        let mut last_grant = self.state.lock().await;
        if let Some(last) = *last_grant {
            let since = Instant::now().duration_since(last);
            if since < self.interval {
                let wait = self.interval - since;
                // Release the lock while sleeping so other tasks can queue.
                drop(last_grant);
                tokio::time::sleep(wait).await;
                last_grant = self.state.lock().await;
            }
        }
        *last_grant = Some(Instant::now());
    }
}
