use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::coords::Size;
use crate::frame::{FrameRequest, FrameScheduler};
use crate::viewport::{Observation, ResizeEntry, Surface};

/// Bookkeeping shared between the runtime and the host handles.
#[derive(Debug, Default)]
struct HostState {
    next_id: Cell<u64>,
    due_frame: Cell<Option<FrameRequest>>,
    observation: Cell<Option<Observation>>,
}

impl HostState {
    fn next_id(&self) -> u64 {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        id
    }

    fn request_frame(&self) -> FrameRequest {
        let request = FrameRequest::new(self.next_id());
        self.due_frame.set(Some(request));
        request
    }

    fn cancel_frame(&self, request: FrameRequest) {
        if self.due_frame.get() == Some(request) {
            self.due_frame.set(None);
        }
    }

    fn take_due_frame(&self) -> Option<FrameRequest> {
        self.due_frame.take()
    }

    fn observe(&self) -> Observation {
        let observation = Observation::new(self.next_id());
        self.observation.set(Some(observation));
        observation
    }

    fn unobserve(&self, observation: Observation) {
        if self.observation.get() == Some(observation) {
            self.observation.set(None);
        }
    }
}

/// Host primitives backed by one winit window.
///
/// Cloning is cheap; clones share the same window and bookkeeping.
#[derive(Debug, Clone)]
pub struct WindowHost {
    window: Arc<Window>,
    state: Rc<HostState>,
}

impl WindowHost {
    pub(crate) fn new(window: Arc<Window>) -> Self {
        Self {
            window,
            state: Rc::default(),
        }
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    /// Frame scheduler mapping requests onto `request_redraw`.
    pub fn scheduler(&self) -> WindowScheduler {
        WindowScheduler {
            window: Arc::clone(&self.window),
            state: Rc::clone(&self.state),
        }
    }

    /// Surface whose container is the window's client area.
    pub fn surface(&self) -> WindowSurface {
        WindowSurface {
            window: Arc::clone(&self.window),
            state: Rc::clone(&self.state),
        }
    }

    /// Takes the outstanding frame request, if a redraw should drive the loop.
    pub(crate) fn take_due_frame(&self) -> Option<FrameRequest> {
        self.state.take_due_frame()
    }

    /// Builds the notification for a new client size, if it is being observed.
    pub(crate) fn resize_entry(&self, physical: PhysicalSize<u32>) -> Option<ResizeEntry> {
        let observation = self.state.observation.get()?;
        let logical = physical.to_logical::<f64>(self.window.scale_factor());
        Some(ResizeEntry {
            observation,
            size: Size::new(logical.width, logical.height),
        })
    }
}

/// [`FrameScheduler`] driven by the window's redraw events.
#[derive(Debug)]
pub struct WindowScheduler {
    window: Arc<Window>,
    state: Rc<HostState>,
}

impl FrameScheduler for WindowScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        let request = self.state.request_frame();
        self.window.request_redraw();
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        // The redraw may still arrive; without a due request it is ignored.
        self.state.cancel_frame(request);
    }
}

/// [`Surface`] over the window's client area, in logical pixels.
#[derive(Debug)]
pub struct WindowSurface {
    window: Arc<Window>,
    state: Rc<HostState>,
}

impl Surface for WindowSurface {
    fn container_rect(&self) -> Option<Size> {
        let logical = self
            .window
            .inner_size()
            .to_logical::<f64>(self.window.scale_factor());
        Some(Size::new(logical.width, logical.height))
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.window.scale_factor()
    }

    fn observe(&mut self) -> Observation {
        self.state.observe()
    }

    fn unobserve(&mut self, observation: Observation) {
        self.state.unobserve(observation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_request_is_not_due() {
        let state = HostState::default();
        let request = state.request_frame();
        state.cancel_frame(request);
        assert_eq!(state.take_due_frame(), None);
    }

    #[test]
    fn due_request_is_taken_once() {
        let state = HostState::default();
        let request = state.request_frame();
        assert_eq!(state.take_due_frame(), Some(request));
        assert_eq!(state.take_due_frame(), None);
    }

    #[test]
    fn cancelling_superseded_request_keeps_newer_one() {
        let state = HostState::default();
        let old = state.request_frame();
        let new = state.request_frame();
        state.cancel_frame(old);
        assert_eq!(state.take_due_frame(), Some(new));
    }

    #[test]
    fn unobserve_only_releases_matching_subscription() {
        let state = HostState::default();
        let first = state.observe();
        let second = state.observe();
        assert_ne!(first, second);

        state.unobserve(first);
        assert_eq!(state.observation.get(), Some(second));
        state.unobserve(second);
        assert_eq!(state.observation.get(), None);
    }
}
