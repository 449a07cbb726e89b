//! Per-tick work limits: the round-robin candidate window and the raycast
//! allowance.

/// Persistent cursor that spreads a bounded per-tick window over a candidate
/// list, so every candidate is visited within `ceil(n / budget)` ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoundRobin {
    cursor: usize,
}

impl RoundRobin {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Indices to process this tick out of `count` candidates.
    ///
    /// The cursor is first reduced modulo `count`, since the list may have
    /// shrunk since the last tick.
    pub fn window(&mut self, count: usize, budget: usize) -> impl Iterator<Item = usize> {
        self.cursor %= count.max(1);
        let start = self.cursor;
        let take = budget.min(count);
        (0..take).map(move |i| (start + i) % count)
    }

    /// Move past `processed` candidates out of `count`.
    pub fn advance(&mut self, processed: usize, count: usize) {
        self.cursor = (self.cursor + processed) % count.max(1);
    }
}

/// Raycasts still allowed this tick.
#[derive(Debug, Clone, Copy)]
pub struct RaycastBudget {
    remaining: usize,
}

impl RaycastBudget {
    pub fn new(limit: usize) -> Self {
        Self { remaining: limit }
    }

    /// Spend one raycast. False once the budget is exhausted.
    pub fn try_take(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        true
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }
}
