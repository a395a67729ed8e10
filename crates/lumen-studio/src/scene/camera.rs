use glam::{Mat4, Vec3};

/// Perspective camera.
///
/// `projection` is only refreshed by `update_projection_matrix()`, so callers
/// batch parameter changes and recompute once.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    /// Heading of the camera around the Y axis, measured from +Z.
    pub fn heading(&self) -> f32 {
        self.position.x.atan2(self.position.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_tracks_aspect() {
        let mut camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0);
        let square = camera.projection.x_axis.x;

        camera.aspect = 2.0;
        assert_eq!(camera.projection.x_axis.x, square);

        camera.update_projection_matrix();
        assert!((camera.projection.x_axis.x - square / 2.0).abs() < 1e-6);
    }

    #[test]
    fn heading_of_camera_on_z_axis_is_zero() {
        let camera = PerspectiveCamera::new(45.0, 1.0, 0.1, 100.0).with_position(Vec3::new(0.0, 0.0, 6.0));
        assert_eq!(camera.heading(), 0.0);

        let side = camera.with_position(Vec3::new(3.0, 0.0, 0.0));
        assert!((side.heading() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
