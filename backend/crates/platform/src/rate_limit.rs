//! Login Rate Limiting
//!
//! Sliding-window counter of failed sign-in attempts per client key.
//!
//! The state lives in this process only: it is lost on restart and not
//! shared between replicas, so it is a best-effort brake, not a durable
//! limit. If the map cannot be consulted the limiter fails open.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Entries kept before stale keys are swept on the next write.
const SWEEP_THRESHOLD: usize = 1024;

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Failures tolerated inside one window
    pub max_attempts: u32,
    /// Window measured from the most recent failure
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window: Duration::from_secs(10 * 60),
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_attempts: u32, window_secs: u64) -> Self {
        Self {
            max_attempts,
            window: Duration::from_secs(window_secs),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct AttemptEntry {
    count: u32,
    last_attempt: Instant,
}

/// Process-local failed-login counter, cheap to clone and share.
#[derive(Debug, Clone, Default)]
pub struct LoginRateLimiter {
    config: RateLimitConfig,
    attempts: Arc<Mutex<HashMap<String, AttemptEntry>>>,
}

impl LoginRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            attempts: Arc::default(),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    fn entries(&self) -> Option<MutexGuard<'_, HashMap<String, AttemptEntry>>> {
        match self.attempts.lock() {
            Ok(guard) => Some(guard),
            Err(_) => {
                tracing::warn!("Login rate limiter state is poisoned; allowing attempt");
                None
            }
        }
    }

    fn window_elapsed(&self, entry: &AttemptEntry, now: Instant) -> bool {
        now.saturating_duration_since(entry.last_attempt) > self.config.window
    }

    pub fn is_limited(&self, key: &str) -> bool {
        self.is_limited_at(key, Instant::now())
    }

    /// Whether `key` has used up its attempts for the current window.
    pub fn is_limited_at(&self, key: &str, now: Instant) -> bool {
        let Some(mut entries) = self.entries() else {
            return false;
        };
        let Some(entry) = entries.get(key).copied() else {
            return false;
        };
        if self.window_elapsed(&entry, now) {
            entries.remove(key);
            return false;
        }
        entry.count >= self.config.max_attempts
    }

    pub fn record_failure(&self, key: &str) {
        self.record_failure_at(key, Instant::now());
    }

    /// Count one failed attempt for `key`.
    pub fn record_failure_at(&self, key: &str, now: Instant) {
        let Some(mut entries) = self.entries() else {
            return;
        };

        if entries.len() >= SWEEP_THRESHOLD {
            entries.retain(|_, entry| !self.window_elapsed(entry, now));
        }

        let count = match entries.get(key) {
            Some(entry) if !self.window_elapsed(entry, now) => entry.count.saturating_add(1),
            _ => 1,
        };
        entries.insert(
            key.to_string(),
            AttemptEntry {
                count,
                last_attempt: now,
            },
        );
    }

    /// Number of tracked keys.
    pub fn tracked_keys(&self) -> usize {
        self.entries().map(|entries| entries.len()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "203.0.113.7";

    #[test]
    fn test_unknown_key_is_not_limited() {
        let limiter = LoginRateLimiter::default();
        assert!(!limiter.is_limited(KEY));
    }

    #[test]
    fn test_fifth_failure_blocks_sixth_attempt() {
        let limiter = LoginRateLimiter::default();
        let start = Instant::now();

        for i in 0..4 {
            limiter.record_failure_at(KEY, start + Duration::from_secs(i));
            assert!(!limiter.is_limited_at(KEY, start + Duration::from_secs(i)));
        }
        limiter.record_failure_at(KEY, start + Duration::from_secs(5));
        assert!(limiter.is_limited_at(KEY, start + Duration::from_secs(6)));
    }

    #[test]
    fn test_window_elapsed_resets() {
        let limiter = LoginRateLimiter::default();
        let start = Instant::now();
        for _ in 0..5 {
            limiter.record_failure_at(KEY, start);
        }
        assert!(limiter.is_limited_at(KEY, start + Duration::from_secs(600)));

        let later = start + Duration::from_secs(601);
        assert!(!limiter.is_limited_at(KEY, later));
        assert_eq!(limiter.tracked_keys(), 0);

        limiter.record_failure_at(KEY, later);
        assert!(!limiter.is_limited_at(KEY, later));
    }

    #[test]
    fn test_window_slides_from_last_failure() {
        let limiter = LoginRateLimiter::default();
        let start = Instant::now();
        for i in 0..5 {
            limiter.record_failure_at(KEY, start + Duration::from_secs(i * 300));
        }
        // First failure is 20 minutes old but the last one is fresh.
        assert!(limiter.is_limited_at(KEY, start + Duration::from_secs(1300)));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = LoginRateLimiter::new(RateLimitConfig::new(1, 60));
        limiter.record_failure(KEY);
        assert!(limiter.is_limited(KEY));
        assert!(!limiter.is_limited("198.51.100.1"));
    }

    #[test]
    fn test_poisoned_state_fails_open() {
        let limiter = LoginRateLimiter::new(RateLimitConfig::new(1, 60));
        limiter.record_failure(KEY);
        assert!(limiter.is_limited(KEY));

        let shared = limiter.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.attempts.lock().unwrap();
            panic!("poison the limiter");
        })
        .join();

        assert!(limiter.attempts.is_poisoned());
        assert!(!limiter.is_limited(KEY));
        limiter.record_failure(KEY);
        assert_eq!(limiter.tracked_keys(), 0);
    }

    #[test]
    fn test_stale_keys_are_swept() {
        let limiter = LoginRateLimiter::default();
        let start = Instant::now();
        for i in 0..SWEEP_THRESHOLD {
            limiter.record_failure_at(&format!("10.0.{}.{}", i / 256, i % 256), start);
        }
        limiter.record_failure_at(KEY, start + Duration::from_secs(601));
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
