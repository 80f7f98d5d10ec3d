//! Metrics collection for presence lookups.

use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Metrics collector for lookup operations.
#[derive(Debug, Clone)]
pub struct LookupMetrics {
    inner: Arc<LookupMetricsInner>,
}

#[derive(Debug)]
struct LookupMetricsInner {
    lookups: AtomicU64,
    active: AtomicU64,
    offline: AtomicU64,
    not_found: AtomicU64,
    gateway_failures: AtomicU64,
    last_active_hit: parking_lot::Mutex<Option<Instant>>,
}

impl Default for LookupMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupMetrics {
    /// Creates a new metrics collector.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(LookupMetricsInner {
                lookups: AtomicU64::new(0),
                active: AtomicU64::new(0),
                offline: AtomicU64::new(0),
                not_found: AtomicU64::new(0),
                gateway_failures: AtomicU64::new(0),
                last_active_hit: parking_lot::Mutex::new(None),
            }),
        }
    }

    /// Records a lookup request reaching the resolver.
    pub fn record_lookup(&self) {
        self.inner.lookups.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that resolved to an active status.
    pub fn record_active(&self) {
        self.inner.active.fetch_add(1, Ordering::Relaxed);
        *self.inner.last_active_hit.lock() = Some(Instant::now());
    }

    /// Records a lookup that found only an offline membership.
    pub fn record_offline(&self) {
        self.inner.offline.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup that found no membership anywhere.
    pub fn record_not_found(&self) {
        self.inner.not_found.fetch_add(1, Ordering::Relaxed);
    }

    /// Records a lookup aborted by a gateway failure.
    pub fn record_gateway_failure(&self) {
        self.inner.gateway_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Gets the lookup count.
    pub fn lookups(&self) -> u64 {
        self.inner.lookups.load(Ordering::Relaxed)
    }

    /// Gets the active-hit count.
    pub fn active(&self) -> u64 {
        self.inner.active.load(Ordering::Relaxed)
    }

    /// Gets the offline-hit count.
    pub fn offline(&self) -> u64 {
        self.inner.offline.load(Ordering::Relaxed)
    }

    /// Gets the not-found count.
    pub fn not_found(&self) -> u64 {
        self.inner.not_found.load(Ordering::Relaxed)
    }

    /// Gets the gateway-failure count.
    pub fn gateway_failures(&self) -> u64 {
        self.inner.gateway_failures.load(Ordering::Relaxed)
    }

    /// Gets time since the last active hit.
    pub fn time_since_active_hit(&self) -> Option<std::time::Duration> {
        self.inner
            .last_active_hit
            .lock()
            .map(|instant| instant.elapsed())
    }

    /// Creates a serializable snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            lookups: self.lookups(),
            active: self.active(),
            offline: self.offline(),
            not_found: self.not_found(),
            gateway_failures: self.gateway_failures(),
            seconds_since_active_hit: self.time_since_active_hit().map(|d| d.as_secs()),
        }
    }
}

/// Serializable snapshot of lookup metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    /// Lookup requests that reached the resolver
    pub lookups: u64,
    /// Lookups that resolved to an active status
    pub active: u64,
    /// Lookups that found only an offline membership
    pub offline: u64,
    /// Lookups that found no membership anywhere
    pub not_found: u64,
    /// Lookups aborted by gateway failures
    pub gateway_failures: u64,
    /// Seconds since the last active hit
    pub seconds_since_active_hit: Option<u64>,
}
