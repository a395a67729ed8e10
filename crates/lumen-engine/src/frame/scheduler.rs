/// Handle identifying one outstanding frame request.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    #[inline]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Host display-refresh primitive.
///
/// `request_frame` asks for a callback before the next repaint; the host later
/// reports the due request back to `Loop::frame`. `cancel_frame` withdraws a
/// request that has not fired yet.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;

    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Deterministic scheduler for tests and headless stepping.
///
/// Requests accumulate until `take_due()` hands them out, which plays the role
/// of one display refresh.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    outstanding: Vec<FrameRequest>,
    requested: u32,
    cancelled: u32,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that have neither fired nor been cancelled.
    pub fn outstanding(&self) -> &[FrameRequest] {
        &self.outstanding
    }

    pub fn requested(&self) -> u32 {
        self.requested
    }

    pub fn cancelled(&self) -> u32 {
        self.cancelled
    }

    /// Removes and returns every outstanding request, oldest first.
    pub fn take_due(&mut self) -> Vec<FrameRequest> {
        std::mem::take(&mut self.outstanding)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        self.requested += 1;
        let request = FrameRequest::new(self.next_id);
        self.outstanding.push(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        let before = self.outstanding.len();
        self.outstanding.retain(|r| *r != request);
        if self.outstanding.len() != before {
            self.cancelled += 1;
        }
    }
}
