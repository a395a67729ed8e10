/// What the renderer should do after a failed frame acquisition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SurfaceErrorAction {
    /// The surface was configured again; the next frame can be drawn.
    Reconfigured,
    /// Drop this frame and try again on the next tick.
    SkipFrame,
    /// The device cannot present any more; the frame loop should halt.
    Fatal,
}

impl SurfaceErrorAction {
    pub fn is_fatal(self) -> bool {
        self == Self::Fatal
    }
}
