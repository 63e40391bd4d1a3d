use std::collections::VecDeque;

use parking_lot::Mutex;

use super::record::Mark;

struct MarkState {
    recent: VecDeque<Mark>,
    total: u64,
}

/// Bounded buffer of recent manual marks plus a running total that is never
/// decremented.
///
/// Writer is the input path only; the sampler and the dashboard read. The
/// buffer and the counter live under one lock so a reader never sees them
/// disagree.
pub struct MarkHistory {
    capacity: usize,
    state: Mutex<MarkState>,
}

impl MarkHistory {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(MarkState {
                recent: VecDeque::with_capacity(capacity),
                total: 0,
            }),
        }
    }

    /// Append a mark, evicting the oldest once at capacity, and bump the
    /// total. One critical section covers both.
    pub fn record(&self, mark: Mark) {
        let mut state = self.state.lock();
        if state.recent.len() >= self.capacity {
            state.recent.pop_front();
        }
        state.recent.push_back(mark);
        state.total += 1;
    }

    /// Consistent point-in-time copy of the recent buffer and the total.
    pub fn snapshot(&self) -> (Vec<Mark>, u64) {
        let state = self.state.lock();
        (state.recent.iter().cloned().collect(), state.total)
    }
}
