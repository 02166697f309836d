//! Per-client fixed-window rate limiting for the summary function.
//!
//! The policy ([`RateLimiter`]) is separate from where the counters live
//! ([`RateLimitStore`]). The in-memory store only counts for a single
//! warm instance. A shared key-value store can implement the same trait.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::errors::ProxyError;

/// Every this many checks the limiter sweeps expired records from its store.
pub const PURGE_EVERY: u64 = 256;

/// Counter for one client within the current window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateRecord {
    pub count: u32,
    pub window_reset_at: DateTime<Utc>,
}

impl RateRecord {
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.window_reset_at
    }
}

#[async_trait]
pub trait RateLimitStore: Send + Sync {
    async fn get(&self, key: &str) -> Option<RateRecord>;

    /// Counts one request. If the stored window has expired, a fresh window
    /// starting at `now` is opened first.
    async fn increment(&self, key: &str, now: DateTime<Utc>, window: Duration) -> RateRecord;

    async fn reset(&self, key: &str);

    /// Drops records whose window has ended.
    async fn purge_expired(&self, now: DateTime<Utc>);
}

/// End of a window opened at `now`. Windows too long for the calendar end at
/// the latest representable instant.
fn window_end(now: DateTime<Utc>, window: Duration) -> DateTime<Utc> {
    now.checked_add_signed(window).unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Process-local store. Concurrent increments on one key can race slightly;
/// the throttle is advisory.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitStore {
    records: DashMap<String, RateRecord>,
}

impl InMemoryRateLimitStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl RateLimitStore for InMemoryRateLimitStore {
    async fn get(&self, key: &str) -> Option<RateRecord> {
        self.records.get(key).map(|entry| *entry.value())
    }

    async fn increment(&self, key: &str, now: DateTime<Utc>, window: Duration) -> RateRecord {
        let mut entry = self.records.entry(key.to_string()).or_insert(RateRecord {
            count: 0,
            window_reset_at: window_end(now, window),
        });
        let record = entry.value_mut();

        if record.is_expired(now) {
            record.count = 0;
            record.window_reset_at = window_end(now, window);
        }

        record.count = record.count.saturating_add(1);
        *record
    }

    async fn reset(&self, key: &str) {
        self.records.remove(key);
    }

    async fn purge_expired(&self, now: DateTime<Utc>) {
        let before = self.records.len();
        self.records.retain(|_, record| !record.is_expired(now));
        debug!(removed = before.saturating_sub(self.records.len()), "Purged expired rate limit records");
    }
}

/// Fixed-window quota: at most `max_requests` per `window` per client key.
#[derive(Clone)]
pub struct RateLimiter {
    store: Arc<dyn RateLimitStore>,
    max_requests: u32,
    window: Duration,
    checks: Arc<AtomicU64>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(store: Arc<dyn RateLimitStore>, max_requests: u32, window: Duration) -> Self {
        Self {
            store,
            max_requests,
            window,
            checks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Limiter backed by a fresh [`InMemoryRateLimitStore`].
    #[must_use]
    pub fn in_memory(max_requests: u32, window_secs: u64) -> Self {
        let window = i64::try_from(window_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self::new(Arc::new(InMemoryRateLimitStore::new()), max_requests, window)
    }

    #[must_use]
    pub fn max_requests(&self) -> u32 {
        self.max_requests
    }

    /// Records the request and decides whether it may proceed.
    pub async fn check(&self, client_key: &str, now: DateTime<Utc>) -> Result<RateRecord, ProxyError> {
        if (self.checks.fetch_add(1, Ordering::Relaxed) + 1) % PURGE_EVERY == 0 {
            self.store.purge_expired(now).await;
        }

        let record = self.store.increment(client_key, now, self.window).await;

        if record.count > self.max_requests {
            let retry_after_secs = u64::try_from((record.window_reset_at - now).num_seconds())
                .unwrap_or(0)
                .max(1);
            warn!(
                client_key = %client_key,
                count = record.count,
                limit = self.max_requests,
                "Rate limit exceeded"
            );
            return Err(ProxyError::RateLimitExceeded { retry_after_secs });
        }

        debug!(
            "Request allowed for client {} ({}/{})",
            client_key, record.count, self.max_requests
        );
        Ok(record)
    }

    pub async fn reset(&self, client_key: &str) {
        self.store.reset(client_key).await;
    }
}
