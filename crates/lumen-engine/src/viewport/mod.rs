//! Resize-aware viewport.
//!
//! The host's size-observation primitive is injected through [`Surface`];
//! notifications come back in as [`ResizeEntry`] values and are coalesced into
//! at most one resize callback per tick.

mod surface;
mod view;

pub use surface::{ManualSurface, Observation, ResizeEntry, Surface};
pub use view::{Viewport, ViewportMetrics, ViewportParams, ViewportSignal};
