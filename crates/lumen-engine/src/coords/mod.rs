//! Coordinate types shared by the viewport and its hosts.
//!
//! Sizes are logical pixels (DPI-independent); physical sizes are derived with
//! the viewport's clamped device pixel ratio.

mod size;

pub use size::Size;
