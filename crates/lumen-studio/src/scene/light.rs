use glam::Vec3;

/// Omnidirectional light with range-limited falloff.
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// `0xRRGGBB`.
    pub color: u32,
    pub intensity: f32,

    /// Range after which the light contributes nothing; `0` is unlimited.
    pub distance: f32,

    /// Falloff exponent.
    pub decay: f32,

    pub position: Vec3,
}

impl PointLight {
    pub fn new(color: u32, intensity: f32, distance: f32, decay: f32) -> Self {
        Self {
            color,
            intensity,
            distance,
            decay,
            position: Vec3::ZERO,
        }
    }

    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Color as linear-ish RGB in `[0, 1]`.
    pub fn rgb(&self) -> Vec3 {
        let channel = |shift: u32| ((self.color >> shift) & 0xff) as f32 / 255.0;
        Vec3::new(channel(16), channel(8), channel(0))
    }

    /// Falloff factor at `d` units from the light.
    pub fn attenuation(&self, d: f32) -> f32 {
        let falloff = 1.0 / d.max(0.01).powf(self.decay);
        if self.distance > 0.0 {
            let window = (1.0 - (d / self.distance).powi(4)).clamp(0.0, 1.0);
            falloff * window * window
        } else {
            falloff
        }
    }

    /// Radiance this light delivers at `point`.
    pub fn contribution_at(&self, point: Vec3) -> Vec3 {
        let d = self.position.distance(point);
        self.rgb() * self.intensity * self.attenuation(d)
    }
}
