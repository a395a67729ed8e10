use anyhow::Result;

use crate::core::Lifecycle;

/// Rendering surface interface.
///
/// The engine never draws. A renderer turns the consumer scene into a frame,
/// reading timing and viewport state through the signals it was given at
/// construction. `resize()` runs right after the scene's own `resize()`.
pub trait Renderer<C>: Lifecycle {
    /// Draws one frame of `scene`.
    ///
    /// An error halts the frame loop.
    fn render(&mut self, scene: &C) -> Result<()>;
}
