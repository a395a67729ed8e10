use anyhow::Result;
use winit::event::WindowEvent;

use crate::frame::FrameRequest;
use crate::viewport::ResizeEntry;
use crate::window::WindowHost;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by [`Runtime`](crate::window::Runtime).
pub trait App {
    /// Called once the window exists.
    ///
    /// The host hands out the frame scheduler and the observed surface the app
    /// builds its stage from. An error aborts the runtime.
    fn init(&mut self, host: WindowHost) -> Result<()>;

    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let _ = event;
        AppControl::Continue
    }

    /// Called when a frame requested through the host scheduler is due.
    fn on_frame(&mut self, request: FrameRequest) -> AppControl;

    /// Called when the observed surface changed size.
    fn on_resize(&mut self, entry: ResizeEntry);

    /// Called once when the event loop is shutting down.
    fn exiting(&mut self) {}
}
