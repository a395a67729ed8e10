use bytemuck::{Pod, Zeroable};

/// Bloom post-processing descriptor.
///
/// Parameters only; the renderer decides how (and whether) the glow is
/// composited.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BloomEffect {
    pub intensity: f32,
    pub range: f32,
    pub steps: f32,

    /// Luminance above which pixels start to glow.
    pub threshold: f32,
}

impl BloomEffect {
    pub const NAME: &'static str = "BloomEffect";

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Uniform block laid out for GPU upload.
    pub fn uniforms(&self) -> BloomUniforms {
        BloomUniforms {
            intensity: self.intensity,
            range: self.range,
            steps: self.steps,
            threshold: self.threshold,
        }
    }

    /// Glow added to a color of luminance `luma`.
    pub fn glow(&self, luma: f32) -> f32 {
        (luma - self.threshold).max(0.0) * self.intensity * self.range
    }
}

impl Default for BloomEffect {
    fn default() -> Self {
        Self {
            intensity: 5.0,
            range: 0.1,
            steps: 0.003,
            threshold: 0.4,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct BloomUniforms {
    pub intensity: f32,
    pub range: f32,
    pub steps: f32,
    pub threshold: f32,
}
