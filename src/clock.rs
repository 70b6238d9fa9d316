//! Time source and the inter-frame latch timer

use embassy_time::{Duration, Instant};

/// Monotonic time source
pub trait Clock {
    fn now(&mut self) -> Instant;
}

/// Clock backed by the global `embassy-time` driver
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&mut self) -> Instant {
        Instant::now()
    }
}

/// Tracks the dead time one-wire chips need between frames
///
/// The deadline is taken from the moment the last pulse of a frame left the
/// pin. Before the first frame there is nothing to wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatchTimer {
    interval: Duration,
    deadline: Option<Instant>,
}

impl LatchTimer {
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: None,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Earliest moment the next frame may start
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Whether a frame may start at `now`
    pub fn can_show(&self, now: Instant) -> bool {
        self.deadline.is_none_or(|deadline| now >= deadline)
    }

    /// Record the end of a frame at `now`
    pub fn mark(&mut self, now: Instant) {
        self.deadline = Some(now + self.interval);
    }

    /// Busy-wait until the next frame may start
    ///
    /// Blocks the whole program; there is nothing else to schedule.
    pub fn wait<K: Clock>(&self, clock: &mut K) {
        let Some(deadline) = self.deadline else {
            return;
        };
        while clock.now() < deadline {
            core::hint::spin_loop();
        }
    }
}
