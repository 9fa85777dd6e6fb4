//! Poll loop: samples the snapshot source on a fixed cadence and decides
//! which snapshots get published.

use std::sync::Arc;
use std::time::Duration;

use mumble_online_common::Snapshot;
use tokio::time::MissedTickBehavior;

use crate::registry::SubscriberRegistry;
use crate::source::{fetch_blocking, SnapshotSource};

/// Floor applied to the poll interval; `tokio::time::interval` rejects zero.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Skip-throttle: suppresses repeated snapshots, but never for longer than
/// the keep-alive bound.
#[derive(Debug, Clone)]
pub struct Throttle {
    max_skips: u64,
    skip_count: u64,
    last: Option<Snapshot>,
}

impl Throttle {
    /// `max_skips = floor(max_interval / poll_interval)`.
    pub fn new(poll_interval: Duration, max_interval: Duration) -> Self {
        let max_skips = if poll_interval.is_zero() {
            0
        } else {
            (max_interval.as_secs_f64() / poll_interval.as_secs_f64()).floor() as u64
        };
        Self::with_max_skips(max_skips)
    }

    pub fn with_max_skips(max_skips: u64) -> Self {
        Self {
            max_skips,
            skip_count: 0,
            last: None,
        }
    }

    pub fn max_skips(&self) -> u64 {
        self.max_skips
    }

    pub fn skip_count(&self) -> u64 {
        self.skip_count
    }

    /// Record a fresh snapshot; returns whether it must be published.
    pub fn observe(&mut self, snapshot: &Snapshot) -> bool {
        let unchanged = self.last.as_ref() == Some(snapshot);
        if unchanged && self.skip_count < self.max_skips {
            self.skip_count += 1;
            return false;
        }

        self.skip_count = 0;
        if !unchanged {
            self.last = Some(snapshot.clone());
        }
        true
    }
}

/// Owns the poll cadence. Exactly one poller runs per server.
pub struct Poller {
    source: Arc<dyn SnapshotSource>,
    registry: SubscriberRegistry,
    throttle: Throttle,
    poll_interval: Duration,
}

impl Poller {
    pub fn new(
        source: Arc<dyn SnapshotSource>,
        registry: SubscriberRegistry,
        poll_interval: Duration,
        max_interval: Duration,
    ) -> Self {
        let poll_interval = poll_interval.max(MIN_POLL_INTERVAL);
        Self {
            source,
            registry,
            throttle: Throttle::new(poll_interval, max_interval),
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// One poll cycle. Returns whether the snapshot was published.
    pub async fn tick(&mut self) -> bool {
        let snapshot = fetch_blocking(Arc::clone(&self.source)).await;
        if !self.throttle.observe(&snapshot) {
            return false;
        }

        let is_error = snapshot.is_error();
        let delivered = self.registry.publish(snapshot);
        tracing::debug!(delivered, error = is_error, "Published snapshot");
        true
    }

    /// Poll forever. A slow source delays the following ticks instead of
    /// bunching them up.
    pub async fn run(mut self) {
        tracing::info!(
            interval = ?self.poll_interval,
            max_skips = self.throttle.max_skips(),
            "Poller started"
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            self.tick().await;
        }
    }
}
