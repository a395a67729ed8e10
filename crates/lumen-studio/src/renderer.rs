use anyhow::Result;
use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;

use lumen_engine::core::Lifecycle;
use lumen_engine::device::Gpu;
use lumen_engine::render::Renderer;
use lumen_engine::viewport::{ViewportMetrics, ViewportSignal};

use crate::effects::BloomEffect;
use crate::scene::{ExampleScene, PointLight};

/// Share of the accumulated light radiance that reaches the backdrop.
const AMBIENT_SHARE: f32 = 0.25;

/// Presents the example scene on a wgpu surface.
///
/// Draws a lit backdrop only: the clear color follows the lights' radiance at
/// the origin, brightened by the bloom glow.
pub struct WgpuRenderer {
    gpu: Gpu,
    viewport: ViewportSignal,
    bloom: BloomEffect,
    bloom_ubo: Option<wgpu::Buffer>,
}

impl WgpuRenderer {
    pub fn new(gpu: Gpu, viewport: ViewportSignal, bloom: BloomEffect) -> Self {
        let bloom_ubo = gpu
            .device()
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("lumen bloom ubo"),
                contents: bytemuck::bytes_of(&bloom.uniforms()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        log::debug!("{} uniforms uploaded", bloom.name());

        Self {
            gpu,
            viewport,
            bloom,
            bloom_ubo: Some(bloom_ubo),
        }
    }
}

impl Lifecycle for WgpuRenderer {
    fn resize(&mut self) {
        let metrics = self.viewport.metrics();
        let Some(extent) = surface_extent(metrics, self.gpu.window_size()) else {
            log::debug!("viewport {:?} has no drawable area, keeping surface", metrics.size);
            return;
        };

        let (width, height) = metrics.size.to_physical(metrics.dpr);
        log::debug!(
            "surface {:?} -> {:?}, render resolution {width}x{height}",
            self.gpu.size(),
            extent
        );
        self.gpu.resize(extent);
    }

    fn dispose(&mut self) {
        if let Some(ubo) = self.bloom_ubo.take() {
            ubo.destroy();
        }
    }
}

impl Renderer<ExampleScene> for WgpuRenderer {
    fn render(&mut self, scene: &ExampleScene) -> Result<()> {
        let Some(ubo) = self.bloom_ubo.as_ref() else {
            anyhow::bail!("renderer used after dispose");
        };

        let mut frame = match self.gpu.begin_frame() {
            Ok(frame) => frame,
            Err(err) => {
                let action = self.gpu.handle_surface_error(err);
                anyhow::ensure!(!action.is_fatal(), "surface lost beyond recovery");
                log::debug!("skipping frame: {action:?}");
                return Ok(());
            }
        };

        self.gpu
            .queue()
            .write_buffer(ubo, 0, bytemuck::bytes_of(&self.bloom.uniforms()));

        {
            let _rpass = frame.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("lumen clear pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color(scene.lights(), &self.bloom)),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        self.gpu.submit(frame);
        Ok(())
    }
}

/// Swapchain extent for a viewport shown in a window of `window` physical
/// pixels, or `None` while there is nothing to draw into (minimized window).
///
/// The extent always tracks the window itself; presenting at any other size is
/// rejected by some backends. The clamped dpr only bounds render resolution.
fn surface_extent(metrics: ViewportMetrics, window: PhysicalSize<u32>) -> Option<PhysicalSize<u32>> {
    if !metrics.size.is_valid() || window.width == 0 || window.height == 0 {
        return None;
    }
    Some(window)
}

/// Backdrop color for a frame lit by `lights`.
fn clear_color(lights: &[PointLight], bloom: &BloomEffect) -> wgpu::Color {
    let radiance = lights
        .iter()
        .map(|light| light.contribution_at(Vec3::ZERO))
        .fold(Vec3::ZERO, |acc, c| acc + c);

    let luma = radiance.dot(Vec3::new(0.2126, 0.7152, 0.0722));
    let lit = (radiance * AMBIENT_SHARE + Vec3::splat(bloom.glow(luma))).clamp(Vec3::ZERO, Vec3::ONE);

    wgpu::Color {
        r: f64::from(lit.x),
        g: f64::from(lit.y),
        b: f64::from(lit.z),
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_engine::coords::Size;

    fn metrics(width: f64, height: f64, dpr: f64) -> ViewportMetrics {
        let size = Size::new(width, height);
        ViewportMetrics {
            size,
            ratio: size.ratio(),
            dpr,
        }
    }

    // ── surface extent ────────────────────────────────────────────────────

    #[test]
    fn minimized_window_keeps_surface() {
        assert_eq!(surface_extent(metrics(0.0, 0.0, 2.0), PhysicalSize::new(0, 0)), None);
        assert_eq!(surface_extent(metrics(0.0, 0.0, 2.0), PhysicalSize::new(1600, 1200)), None);
        assert_eq!(surface_extent(metrics(800.0, 600.0, 2.0), PhysicalSize::new(0, 0)), None);
    }

    #[test]
    fn extent_follows_window_not_clamped_dpr() {
        // 3x display with dpr clamped to 2.
        let extent = surface_extent(metrics(800.0, 600.0, 2.0), PhysicalSize::new(2400, 1800));
        assert_eq!(extent, Some(PhysicalSize::new(2400, 1800)));
    }

    // ── clear color ───────────────────────────────────────────────────────

    #[test]
    fn dark_without_lights() {
        let color = clear_color(&[], &BloomEffect::default());
        assert_eq!((color.r, color.g, color.b, color.a), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn tint_follows_light_color() {
        let red = PointLight::new(0xff0000, 1.0, 30.0, 1.0).at(Vec3::new(0.0, 2.0, 0.0));
        let color = clear_color(&[red], &BloomEffect::default());
        assert!(color.r > 0.0);
        assert_eq!(color.b, 0.0);
    }

    #[test]
    fn bright_lights_bloom_into_every_channel() {
        let red = PointLight::new(0xff0000, 50.0, 0.0, 1.0).at(Vec3::new(0.0, 1.0, 0.0));
        let color = clear_color(&[red], &BloomEffect::default());
        assert_eq!(color.r, 1.0);
        assert!(color.g > 0.0);
        assert!(color.b > 0.0);
    }

    #[test]
    fn channels_stay_in_range() {
        let lights = [
            PointLight::new(0xffffff, 100.0, 0.0, 0.5).at(Vec3::new(0.0, 0.5, 0.0)),
            PointLight::new(0xffffff, 100.0, 0.0, 0.5).at(Vec3::new(0.5, 0.0, 0.0)),
        ];
        let color = clear_color(&lights, &BloomEffect::default());
        for channel in [color.r, color.g, color.b] {
            assert!((0.0..=1.0).contains(&channel));
        }
    }
}
