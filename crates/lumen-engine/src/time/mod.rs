//! Time subsystem.
//!
//! The clock reads an injected [`TimeSource`], so tests and replays can drive it
//! with [`ManualTime`] instead of the wall clock.
//! Intended usage:
//! - one `Clock` per stage
//! - `start()` when the loop starts, `update()` once per tick

mod clock;
mod source;

pub use clock::{Clock, ClockReading, ClockSignal};
pub use source::{ManualTime, MonotonicTime, TimeSource, WallTime};
