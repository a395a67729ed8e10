//! Window + runtime loop.
//!
//! Owns the `winit` event loop and window, and exposes them to applications as
//! the host primitives the engine consumes: a frame scheduler and an observed
//! surface.

mod host;
mod runtime;

pub use host::{WindowHost, WindowScheduler, WindowSurface};
pub use runtime::{Runtime, RuntimeConfig};
