use std::cell::Cell;
use std::rc::Rc;

use crate::core::Lifecycle;

use super::source::{TimeSource, WallTime};

/// Timing snapshot, all values in milliseconds.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ClockReading {
    /// Time source reading taken at the last `start()` or `update()`.
    pub time: f64,

    /// Sum of every `delta` since the last `start()`.
    pub elapsed: f64,

    /// Time between the two most recent readings.
    pub delta: f64,
}

/// Delta-time clock.
///
/// Stores only the previous reading and the running totals. `elapsed` is the
/// accumulation of deltas rather than `now - start`, and deltas are passed
/// through unclamped: a source that jumps backwards produces a negative delta.
///
/// Call `update()` exactly once per tick.
#[derive(Debug)]
pub struct Clock<T = WallTime> {
    source: T,
    reading: Rc<Cell<ClockReading>>,
}

impl Clock<WallTime> {
    /// Creates a clock reading wall-clock time.
    pub fn new() -> Self {
        Self::with_source(WallTime)
    }
}

impl Default for Clock<WallTime> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TimeSource> Clock<T> {
    pub fn with_source(source: T) -> Self {
        Self {
            source,
            reading: Rc::new(Cell::new(ClockReading::default())),
        }
    }

    pub fn source(&self) -> &T {
        &self.source
    }

    pub fn reading(&self) -> ClockReading {
        self.reading.get()
    }

    pub fn time(&self) -> f64 {
        self.reading.get().time
    }

    pub fn elapsed(&self) -> f64 {
        self.reading.get().elapsed
    }

    pub fn delta(&self) -> f64 {
        self.reading.get().delta
    }

    /// Returns a read-only handle that observes this clock's readings.
    pub fn signal(&self) -> ClockSignal {
        ClockSignal(Rc::clone(&self.reading))
    }
}

impl<T: TimeSource> Lifecycle for Clock<T> {
    /// Starts a fresh timing epoch.
    fn start(&mut self) {
        self.reading.set(ClockReading {
            time: self.source.now_ms(),
            elapsed: 0.0,
            delta: 0.0,
        });
    }

    /// Advances the clock by the time since the previous reading.
    fn update(&mut self) {
        let previous = self.reading.get();
        let now = self.source.now_ms();
        // Delta is taken against the stored reading before it is replaced.
        let delta = now - previous.time;

        self.reading.set(ClockReading {
            time: now,
            elapsed: previous.elapsed + delta,
            delta,
        });
    }
}

/// Read-only view of a [`Clock`].
///
/// Consumers hold a signal instead of a reference so they can read timing from
/// inside callbacks that run while the clock's owner is borrowed.
#[derive(Debug, Clone)]
pub struct ClockSignal(Rc<Cell<ClockReading>>);

impl ClockSignal {
    pub fn reading(&self) -> ClockReading {
        self.0.get()
    }

    pub fn elapsed(&self) -> f64 {
        self.0.get().elapsed
    }

    pub fn delta(&self) -> f64 {
        self.0.get().delta
    }
}
