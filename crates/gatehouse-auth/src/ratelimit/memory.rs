//! In-process fixed window limiter.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

use gatehouse_core::result::AppResult;

use super::limiter::{RateLimitOutcome, RateLimitRule, RateLimiter};

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts calls per identifier in fixed windows.
///
/// State lives in this process only; multiple replicas each keep their
/// own counters. Windows that have run out are swept at most once per
/// window length, so the map only holds identifiers seen recently.
#[derive(Debug, Clone)]
pub struct MemoryRateLimiter {
    namespace: String,
    limit: u32,
    duration: Duration,
    windows: Arc<DashMap<String, Window>>,
    last_sweep: Arc<Mutex<Instant>>,
}

impl MemoryRateLimiter {
    /// Creates a limiter for a route.
    pub fn new(rule: &RateLimitRule) -> Self {
        Self {
            namespace: rule.namespace(),
            limit: rule.limit,
            duration: rule.duration,
            windows: Arc::new(DashMap::new()),
            last_sweep: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Drops expired windows if a full window has passed since the last sweep.
    fn sweep_expired(&self, now: Instant) {
        // Another caller is already sweeping.
        let Ok(mut last_sweep) = self.last_sweep.try_lock() else {
            return;
        };
        if now.duration_since(*last_sweep) < self.duration {
            return;
        }
        *last_sweep = now;
        drop(last_sweep);

        let before = self.windows.len();
        self.windows
            .retain(|_, window| now.duration_since(window.started) < self.duration);
        debug!(
            namespace = %self.namespace,
            evicted = before.saturating_sub(self.windows.len()),
            "Swept expired rate limit windows"
        );
    }
}

#[async_trait]
impl RateLimiter for MemoryRateLimiter {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn limit(&self, identifier: &str) -> AppResult<RateLimitOutcome> {
        let now = Instant::now();
        self.sweep_expired(now);

        let mut window = self
            .windows
            .entry(identifier.to_string())
            .or_insert(Window {
                started: now,
                count: 0,
            });

        if now.duration_since(window.started) >= self.duration {
            window.started = now;
            window.count = 0;
        }

        let success = window.count < self.limit;
        if success {
            window.count += 1;
        }

        Ok(RateLimitOutcome {
            success,
            limit: self.limit,
            remaining: self.limit - window.count,
        })
    }
}
