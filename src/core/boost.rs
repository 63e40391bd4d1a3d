use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Owns the boost expiry instant shared between the sampler thread and the
/// input path.
///
/// "Boosted" holds iff the queried instant is before the expiry. Extending
/// always restarts the window from now; windows never stack.
pub struct BoostController {
    duration: Duration,
    expiry: Mutex<Instant>,
}

impl BoostController {
    /// Starts un-boosted: the expiry is initialized to now.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            expiry: Mutex::new(Instant::now()),
        }
    }

    /// Unconditionally set the expiry to now + the boost duration.
    pub fn extend(&self) {
        *self.expiry.lock() = Instant::now() + self.duration;
    }

    pub fn is_boosted(&self) -> bool {
        self.is_boosted_at(Instant::now())
    }

    pub fn is_boosted_at(&self, at: Instant) -> bool {
        at < *self.expiry.lock()
    }

    /// Time left in the current window, if one is active at `at`.
    pub fn remaining(&self, at: Instant) -> Option<Duration> {
        let expiry = *self.expiry.lock();
        if at < expiry {
            Some(expiry - at)
        } else {
            None
        }
    }
}
