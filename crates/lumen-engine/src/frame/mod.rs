//! Frame loop.
//!
//! The host's request/cancel-before-repaint pair is injected through
//! [`FrameScheduler`]; the loop keeps exactly one request outstanding while it
//! runs and ticks once per delivered frame.

mod run_loop;
mod scheduler;

pub use run_loop::{IdleTick, Loop, Tick};
pub use scheduler::{FrameRequest, FrameScheduler, ManualScheduler};
