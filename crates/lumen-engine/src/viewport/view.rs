use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::coords::Size;
use crate::core::Lifecycle;

use super::surface::{Observation, ResizeEntry, Surface};

/// Size, aspect ratio and device pixel ratio of a viewport.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ViewportMetrics {
    pub size: Size,

    /// `size.width / size.height`, recomputed together with `size`.
    pub ratio: f64,

    /// Device pixel ratio clamped to the viewport's maximum.
    pub dpr: f64,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            size: Size::default(),
            ratio: 1.0,
            dpr: 1.0,
        }
    }
}

/// Viewport construction parameters.
pub struct ViewportParams<E> {
    /// Observed surface.
    pub element: E,

    /// Upper clamp on the device pixel ratio. `None` is unbounded.
    pub maximum_dpr: Option<f64>,

    /// Owner callback fired from `update()` after a size change.
    pub resize: Option<Box<dyn FnMut()>>,
}

impl<E> ViewportParams<E> {
    pub fn new(element: E) -> Self {
        Self {
            element,
            maximum_dpr: None,
            resize: None,
        }
    }

    pub fn maximum_dpr(mut self, maximum_dpr: f64) -> Self {
        self.maximum_dpr = Some(maximum_dpr);
        self
    }

    pub fn resize(mut self, resize: impl FnMut() + 'static) -> Self {
        self.resize = Some(Box::new(resize));
        self
    }
}

/// Resize-aware viewport tracker.
///
/// Host notifications only record the latest measurement and raise
/// `needs_update`; the owner's resize callback runs from `update()`, which the
/// loop calls once per tick. Any number of measurements between two ticks
/// coalesce into a single callback with the last values.
///
/// A zero-height container produces a non-finite `ratio`. This is not guarded
/// here; consumers validate it.
pub struct Viewport<E> {
    element: E,
    maximum_dpr: f64,
    metrics: Rc<Cell<ViewportMetrics>>,
    needs_update: bool,
    resize: Box<dyn FnMut()>,
    observation: Option<Observation>,
}

impl<E: Surface> Viewport<E> {
    pub fn new(params: ViewportParams<E>) -> Self {
        let ViewportParams {
            element,
            maximum_dpr,
            resize,
        } = params;

        Self {
            element,
            maximum_dpr: maximum_dpr.unwrap_or(f64::INFINITY),
            metrics: Rc::new(Cell::new(ViewportMetrics::default())),
            needs_update: false,
            resize: resize.unwrap_or_else(|| Box::new(|| {})),
            observation: None,
        }
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    pub fn maximum_dpr(&self) -> f64 {
        self.maximum_dpr
    }

    pub fn metrics(&self) -> ViewportMetrics {
        self.metrics.get()
    }

    pub fn size(&self) -> Size {
        self.metrics.get().size
    }

    pub fn ratio(&self) -> f64 {
        self.metrics.get().ratio
    }

    pub fn dpr(&self) -> f64 {
        self.metrics.get().dpr
    }

    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Whether a size-observation subscription is live.
    pub fn is_observing(&self) -> bool {
        self.observation.is_some()
    }

    /// Returns a read-only handle that observes this viewport's metrics.
    pub fn signal(&self) -> ViewportSignal {
        ViewportSignal(Rc::clone(&self.metrics))
    }

    /// Replaces the owner's resize callback.
    pub fn set_resize(&mut self, resize: impl FnMut() + 'static) {
        self.resize = Box::new(resize);
    }

    /// Records a measurement and marks the viewport dirty.
    ///
    /// Does not call the resize callback; that happens on the next `update()`.
    pub fn set(&mut self, size: Size, dpr: f64) {
        self.metrics.set(ViewportMetrics {
            size,
            ratio: size.ratio(),
            dpr: dpr.min(self.maximum_dpr),
        });
        self.needs_update = true;
    }

    /// Records a measurement using the element's current device pixel ratio.
    pub fn set_size(&mut self, size: Size) {
        let dpr = self.element.device_pixel_ratio();
        self.set(size, dpr);
    }

    /// Host notification entry point.
    ///
    /// Entries for a subscription that has since been released are dropped.
    pub fn observe(&mut self, entry: ResizeEntry) {
        if self.observation != Some(entry.observation) {
            log::trace!("dropping stale resize entry {:?}", entry.observation);
            return;
        }
        self.set_size(entry.size);
    }
}

impl<E: Surface> Lifecycle for Viewport<E> {
    /// Measures the container once and subscribes to its size changes.
    ///
    /// Without a container the viewport stays inactive; `start()` can be called
    /// again once the element is attached.
    fn start(&mut self) {
        self.stop();

        let Some(rect) = self.element.container_rect() else {
            log::debug!("viewport element has no container, staying inactive");
            return;
        };

        let dpr = self.element.device_pixel_ratio();
        self.set(rect, dpr);
        self.observation = Some(self.element.observe());
    }

    fn stop(&mut self) {
        if let Some(observation) = self.observation.take() {
            self.element.unobserve(observation);
        }
    }

    /// Fires the resize callback if a measurement is pending.
    fn update(&mut self) {
        if !self.needs_update {
            return;
        }

        self.needs_update = false;
        (self.resize)();
    }

    fn dispose(&mut self) {
        self.stop();
    }
}

impl<E: fmt::Debug> fmt::Debug for Viewport<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Viewport")
            .field("element", &self.element)
            .field("maximum_dpr", &self.maximum_dpr)
            .field("metrics", &self.metrics.get())
            .field("needs_update", &self.needs_update)
            .field("observation", &self.observation)
            .finish_non_exhaustive()
    }
}

/// Read-only view of a [`Viewport`]'s metrics.
#[derive(Debug, Clone)]
pub struct ViewportSignal(Rc<Cell<ViewportMetrics>>);

impl ViewportSignal {
    pub fn metrics(&self) -> ViewportMetrics {
        self.0.get()
    }

    pub fn size(&self) -> Size {
        self.0.get().size
    }

    pub fn ratio(&self) -> f64 {
        self.0.get().ratio
    }

    pub fn dpr(&self) -> f64 {
        self.0.get().dpr
    }
}
