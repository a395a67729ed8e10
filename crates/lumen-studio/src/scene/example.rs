use anyhow::Result;
use glam::Vec3;

use lumen_engine::core::Lifecycle;
use lumen_engine::time::ClockSignal;
use lumen_engine::viewport::ViewportSignal;

use super::camera::PerspectiveCamera;
use super::light::PointLight;
use super::mesh::{Mesh, StandardMaterial, TorusKnotGeometry};

/// Dependencies handed to [`ExampleScene::new`].
pub struct ExampleSceneParams {
    pub clock: ClockSignal,
    pub viewport: ViewportSignal,
    pub camera: PerspectiveCamera,
}

/// A metallic torus knot spinning under three moving point lights.
///
/// Reads timing and viewport state through signals; the clock and viewport
/// themselves belong to the stage.
pub struct ExampleScene {
    clock: ClockSignal,
    viewport: ViewportSignal,
    pub camera: PerspectiveCamera,
    pub torus_knot: Mesh<TorusKnotGeometry>,
    pub lights: [PointLight; 3],
}

impl ExampleScene {
    pub fn new(params: ExampleSceneParams) -> Self {
        let ExampleSceneParams {
            clock,
            viewport,
            camera,
        } = params;

        let torus_knot = Mesh::new(
            TorusKnotGeometry::new(1.0, 0.4, 200, 40, 2, 1),
            StandardMaterial {
                metalness: 1.0,
                roughness: 0.4,
                ..StandardMaterial::default()
            },
        );

        let lights = [
            PointLight::new(0xffbbff, 0.5, 30.0, 0.5).at(Vec3::new(2.0, 0.0, -2.0)),
            PointLight::new(0xbbffff, 0.5, 30.0, 0.5).at(Vec3::new(-2.0, 4.0, 2.0)),
            PointLight::new(0xffffff, 1.0, 30.0, 2.0).at(Vec3::new(0.0, 5.0, 0.0)),
        ];

        Self {
            clock,
            viewport,
            camera,
            torus_knot,
            lights,
        }
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }
}

impl Lifecycle for ExampleScene {
    async fn load(&mut self) -> Result<()> {
        anyhow::ensure!(!self.torus_knot.is_disposed(), "scene was disposed");
        if let Some(geometry) = &self.torus_knot.geometry {
            log::debug!(
                "torus knot ({}, {}) radius {} tube {}: {} vertices, {} indices",
                geometry.p,
                geometry.q,
                geometry.radius,
                geometry.tube,
                geometry.vertex_count(),
                geometry.index_count()
            );
        }
        Ok(())
    }

    fn update(&mut self) {
        let theta = f64::from(self.camera.heading());
        let elapsed = self.clock.elapsed();
        let delta = self.clock.delta() as f32;

        let [light1, light2, _] = &mut self.lights;
        light1.position.x = ((theta + elapsed * 0.001).cos() * 2.0) as f32;
        light1.position.z = ((theta + elapsed * 0.0005).sin() * 2.0) as f32;
        light2.position.y = ((theta + elapsed * 0.001).sin() * 4.0) as f32;
        light2.position.z = ((theta + elapsed * 0.0005).cos() * 2.0) as f32;

        self.torus_knot.rotation.x += 0.0002 * delta;
        self.torus_knot.rotation.y += 0.0002 * delta;
    }

    fn resize(&mut self) {
        let ratio = self.viewport.ratio();
        if !ratio.is_finite() || ratio <= 0.0 {
            log::warn!("ignoring unusable viewport ratio {ratio}");
            return;
        }

        self.camera.aspect = ratio as f32;
        self.camera.update_projection_matrix();
    }

    fn dispose(&mut self) {
        self.torus_knot.dispose();
    }
}
