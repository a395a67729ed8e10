use crate::coords::Size;

/// Handle identifying one size-observation subscription.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Observation(u64);

impl Observation {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// One size-change notification pushed by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResizeEntry {
    /// Subscription the notification was produced for.
    pub observation: Observation,

    /// New content rectangle of the observed container, in logical pixels.
    pub size: Size,
}

/// Host surface measured and observed by a [`Viewport`](super::Viewport).
///
/// Wraps the host's size-observation primitive. Notifications are delivered by
/// the host calling `Viewport::observe` with a [`ResizeEntry`] carrying the
/// handle returned from `observe()`.
pub trait Surface {
    /// Bounding box of the surface's immediate container.
    ///
    /// `None` while the surface is not attached to anything.
    fn container_rect(&self) -> Option<Size>;

    /// Ratio of physical to logical pixels on the current display.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Subscribes to size changes of the container.
    fn observe(&mut self) -> Observation;

    /// Releases a subscription. Unknown handles are ignored.
    fn unobserve(&mut self, observation: Observation);
}

/// Scripted surface for tests and headless hosts.
#[derive(Debug, Clone)]
pub struct ManualSurface {
    container: Option<Size>,
    dpr: f64,
    next_id: u64,
    active: Option<Observation>,
    subscriptions: u32,
}

impl ManualSurface {
    /// A surface attached to a container of the given size.
    pub fn attached(size: Size) -> Self {
        Self {
            container: Some(size),
            ..Self::detached()
        }
    }

    /// A surface with no container.
    pub fn detached() -> Self {
        Self {
            container: None,
            dpr: 1.0,
            next_id: 0,
            active: None,
            subscriptions: 0,
        }
    }

    pub fn with_dpr(mut self, dpr: f64) -> Self {
        self.dpr = dpr;
        self
    }

    pub fn attach(&mut self, size: Size) {
        self.container = Some(size);
    }

    pub fn detach(&mut self) {
        self.container = None;
    }

    pub fn set_dpr(&mut self, dpr: f64) {
        self.dpr = dpr;
    }

    /// The live subscription, if any.
    pub fn active(&self) -> Option<Observation> {
        self.active
    }

    /// Total number of `observe()` calls.
    pub fn subscriptions(&self) -> u32 {
        self.subscriptions
    }

    /// Builds the notification the host would push for the live subscription.
    pub fn notify(&self, size: Size) -> Option<ResizeEntry> {
        self.active.map(|observation| ResizeEntry { observation, size })
    }
}

impl Surface for ManualSurface {
    fn container_rect(&self) -> Option<Size> {
        self.container
    }

    fn device_pixel_ratio(&self) -> f64 {
        self.dpr
    }

    fn observe(&mut self) -> Observation {
        self.next_id += 1;
        self.subscriptions += 1;
        let observation = Observation::new(self.next_id);
        self.active = Some(observation);
        observation
    }

    fn unobserve(&mut self, observation: Observation) {
        if self.active == Some(observation) {
            self.active = None;
        }
    }
}
