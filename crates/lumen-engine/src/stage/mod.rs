//! Lifecycle-driven composition.
//!
//! A [`Stage`] wires one clock, one viewport, a consumer scene and its renderer
//! to a frame loop. Consumers read timing and viewport state through signals;
//! no component mutates another's state.

mod driver;

pub use driver::Stage;
