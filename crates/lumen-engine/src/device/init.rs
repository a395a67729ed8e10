/// Knobs for [`Gpu::new`](super::Gpu::new).
///
/// Preferences, not demands: anything the adapter or surface cannot honor falls
/// back to a supported value.
#[derive(Debug, Clone)]
pub struct GpuInit {
    pub power_preference: wgpu::PowerPreference,

    /// Take the first sRGB surface format if there is one.
    pub prefer_srgb: bool,

    /// Requested present mode; `Fifo` is used when unsupported.
    ///
    /// `Fifo` paces presentation to the display refresh, the cadence the frame
    /// loop is built around.
    pub present_mode: wgpu::PresentMode,

    /// Requested alpha mode; the surface's first supported mode otherwise.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    pub required_features: wgpu::Features,
    pub required_limits: wgpu::Limits,

    /// Frames the presentation engine may queue ahead; backends treat it as a hint.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            desired_maximum_frame_latency: 2,
        }
    }
}
