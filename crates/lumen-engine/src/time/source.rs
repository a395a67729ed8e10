use std::cell::Cell;
use std::rc::Rc;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

/// Injected time primitive read by [`Clock`](super::Clock).
///
/// Readings are milliseconds. Only differences between readings are meaningful
/// to the clock, so the origin is up to the source.
pub trait TimeSource {
    fn now_ms(&self) -> f64;
}

/// Wall-clock time: milliseconds since the Unix epoch.
#[derive(Debug, Copy, Clone, Default)]
pub struct WallTime;

impl TimeSource for WallTime {
    fn now_ms(&self) -> f64 {
        // A system clock set before 1970 reads as the epoch.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64()
            * 1000.0
    }
}

/// Monotonic time: milliseconds since the source was created.
///
/// Immune to wall-clock adjustments, so deltas are never negative.
#[derive(Debug, Copy, Clone)]
pub struct MonotonicTime {
    origin: Instant,
}

impl MonotonicTime {
    pub fn new() -> Self {
        Self { origin: Instant::now() }
    }
}

impl Default for MonotonicTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for MonotonicTime {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Manually driven time.
///
/// Clones share the same reading, so a test can keep one handle and move the
/// other into a clock.
#[derive(Debug, Clone, Default)]
pub struct ManualTime {
    now: Rc<Cell<f64>>,
}

impl ManualTime {
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl TimeSource for ManualTime {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
