//! Time sources for deferred UI effects.
//!
//! Toasts, the loader overlay and the intro sequence never sleep. They compare
//! deadlines against a [`Clock`], which lets tests drive them with a
//! [`ManualClock`] instead of waiting in real time.

use crate::prelude::{lock, Duration, Mutex};

/// Monotonic time elapsed since the clock was created.
pub trait Clock: Send + Sync {
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by `instant::Instant` so it also works on wasm32.
#[derive(Debug)]
pub struct SystemClock {
    origin: instant::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: instant::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Virtual clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves time forward by `by`.
    pub fn advance(&self, by: Duration) {
        *lock(&self.now) += by;
    }

    /// Jumps to an absolute point in time. Going backwards is ignored.
    pub fn set(&self, to: Duration) {
        let mut now = lock(&self.now);
        if to > *now {
            *now = to;
        }
    }
}

impl Clock for ManualClock {
    fn elapsed(&self) -> Duration {
        *lock(&self.now)
    }
}
