use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use parking_lot::Mutex;

use super::record::{Mark, Measurement};

/// Progress readout for a cycle that is currently collecting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Indicator {
    pub label: String,
    pub elapsed_ms: u64,
}

/// Read-only projection of sampler state consumed by the dashboard.
///
/// Constructed only by the sampler; published at least once per second and at
/// every cycle boundary.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub now: DateTime<Local>,
    pub boosted: bool,
    pub boost_remaining_secs: Option<u64>,
    pub samples_taken: u64,
    pub since_last_secs: u64,
    pub until_next_secs: u64,
    pub avg_duration_ms: u64,
    pub last: Option<Measurement>,
    pub recent_marks: Vec<Mark>,
    pub total_marks: u64,
    pub indicator: Option<Indicator>,
}

impl StatusSnapshot {
    /// Pre-first-cycle view so the dashboard has something to paint
    /// immediately.
    pub fn initial(now: DateTime<Local>, normal_interval: Duration) -> Self {
        Self {
            now,
            boosted: false,
            boost_remaining_secs: None,
            samples_taken: 0,
            since_last_secs: 0,
            until_next_secs: normal_interval.as_secs(),
            avg_duration_ms: 0,
            last: None,
            recent_marks: Vec::new(),
            total_marks: 0,
            indicator: Some(Indicator {
                label: "Initializing…".to_string(),
                elapsed_ms: 0,
            }),
        }
    }
}

/// Latest-value cell the sampler publishes into and the dashboard reads from.
///
/// Publishing replaces the previous snapshot wholesale; readers clone the
/// latest value and render without holding the lock.
#[derive(Clone)]
pub struct SnapshotCell {
    inner: Arc<Mutex<StatusSnapshot>>,
}

impl SnapshotCell {
    pub fn new(initial: StatusSnapshot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(initial)),
        }
    }

    pub fn publish(&self, snapshot: StatusSnapshot) {
        *self.inner.lock() = snapshot;
    }

    pub fn latest(&self) -> StatusSnapshot {
        self.inner.lock().clone()
    }
}
