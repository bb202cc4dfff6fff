use std::time::Duration;

/// Fixed animation/choreography durations for one draw cycle.
///
/// These are the three deferred transitions in the machine: how long the
/// globe shuffles, how long the capsule takes to land, and how long the
/// card exit animation may keep reading the prize after close.
#[derive(Debug, Clone, Copy)]
pub struct Timings {
    /// Duration of the shuffle phase in milliseconds
    pub shuffle_ms: u64,

    /// Duration of the capsule drop in milliseconds
    pub drop_ms: u64,

    /// Delay before the stored prize is cleared after close in milliseconds
    pub clear_ms: u64,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            shuffle_ms: 1500,
            drop_ms: 600,
            clear_ms: 500,
        }
    }
}

impl Timings {
    /// Set shuffle duration
    pub fn with_shuffle(mut self, ms: u64) -> Self {
        self.shuffle_ms = ms;
        self
    }

    /// Set drop duration
    pub fn with_drop(mut self, ms: u64) -> Self {
        self.drop_ms = ms;
        self
    }

    /// Set deferred-clear delay
    pub fn with_clear(mut self, ms: u64) -> Self {
        self.clear_ms = ms;
        self
    }

    pub fn shuffle(&self) -> Duration {
        Duration::from_millis(self.shuffle_ms)
    }

    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.drop_ms)
    }

    pub fn clear(&self) -> Duration {
        Duration::from_millis(self.clear_ms)
    }
}
