/// Width/height pair in logical pixels.
///
/// This is the unit hosts report container rectangles in. Physical pixel sizes
/// are derived by multiplying with the viewport's device pixel ratio.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[inline]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `width / height`.
    ///
    /// A zero height yields a non-finite value; callers decide how to treat it.
    #[inline]
    pub fn ratio(self) -> f64 {
        self.width / self.height
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Scales to physical pixels, rounding and clamping each axis to at least 1.
    pub fn to_physical(self, dpr: f64) -> (u32, u32) {
        let w = (self.width * dpr).round().max(1.0);
        let h = (self.height * dpr).round().max(1.0);
        (w as u32, h as u32)
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}
