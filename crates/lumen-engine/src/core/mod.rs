//! Core engine-facing contracts.
//!
//! `Lifecycle` is shared by every component (clock, viewport, loop, scenes,
//! renderers). `App` is the boundary between the window runtime and the
//! application that owns a stage.

mod app;
mod lifecycle;

pub use app::{App, AppControl};
pub use lifecycle::Lifecycle;
