//! Fixed-window rate limiting for downloads.
//!
//! Tracks request counts per client key (typically the peer IP) over a
//! fixed time window and denies requests once the per-window quota is
//! exhausted.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Configuration for rate limiting.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the time window.
    pub max_requests: u32,
    /// Time window for counting requests.
    pub window: Duration,
}

impl RateLimitConfig {
    /// Create a new rate limit configuration.
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 1,
            window: Duration::from_secs(60),
        }
    }
}

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Request is allowed.
    Allowed,
    /// Request is denied due to rate limit.
    Denied {
        /// Time until the current window resets.
        retry_after: Duration,
    },
}

impl RateLimitResult {
    /// Check if the request is allowed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed)
    }
}

/// A single client's counting window.
#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request counter keyed by client identifier.
///
/// The first request from a key (or the first after its window elapsed)
/// opens a fresh window with a count of one; subsequent requests increment
/// the count and are denied once it exceeds the quota. Counting is
/// fixed-window, not sliding: two requests straddling a window boundary
/// can both be admitted.
///
/// # Example
///
/// ```
/// use filedrop::rate_limit::{FixedWindowLimiter, RateLimitConfig};
///
/// let limiter = FixedWindowLimiter::new(RateLimitConfig::new(1, 60));
/// assert!(limiter.check_and_record("10.0.0.1").is_allowed());
/// assert!(!limiter.check_and_record("10.0.0.1").is_allowed());
/// assert!(limiter.check_and_record("10.0.0.2").is_allowed());
/// ```
#[derive(Debug)]
pub struct FixedWindowLimiter {
    /// Rate limit configuration.
    config: RateLimitConfig,
    /// Per-client windows.
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Mutex::new(HashMap::new()),
        }
    }

    /// Record a request for `key` and report whether it is allowed.
    ///
    /// The increment and the quota comparison happen under one lock, so
    /// concurrent requests from the same client cannot slip past the quota.
    pub fn check_and_record(&self, key: &str) -> RateLimitResult {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap();

        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        // Lazy expiry: a stale window restarts on the next request.
        if now.duration_since(window.started_at) >= self.config.window {
            window.started_at = now;
            window.count = 0;
        }

        window.count += 1;
        if window.count <= self.config.max_requests {
            RateLimitResult::Allowed
        } else {
            let elapsed = now.duration_since(window.started_at);
            RateLimitResult::Denied {
                retry_after: self.config.window.saturating_sub(elapsed),
            }
        }
    }

    /// Remove windows whose period has elapsed.
    ///
    /// Returns the number of entries removed. Call periodically to keep the
    /// key map from growing without bound over long uptimes.
    pub fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut windows = self.windows.lock().unwrap();
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started_at) < self.config.window);
        before - windows.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().unwrap().len()
    }

    /// Start a background task that periodically sweeps expired windows.
    pub fn start_cleanup_task(self: Arc<Self>, interval: Duration) {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            // Skip the first immediate tick
            ticker.tick().await;

            loop {
                ticker.tick().await;
                let removed = self.cleanup();
                if removed > 0 {
                    tracing::debug!(removed, "Swept expired rate limit windows");
                }
            }
        });
    }
}
