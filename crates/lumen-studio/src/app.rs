use std::sync::Arc;

use anyhow::Result;
use glam::Vec3;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{Key, NamedKey};

use lumen_engine::core::{App, AppControl, Lifecycle};
use lumen_engine::device::{Gpu, GpuInit};
use lumen_engine::frame::FrameRequest;
use lumen_engine::stage::Stage;
use lumen_engine::time::Clock;
use lumen_engine::viewport::{ResizeEntry, Viewport, ViewportParams};
use lumen_engine::window::{WindowHost, WindowScheduler, WindowSurface};

use crate::config::StudioConfig;
use crate::effects::BloomEffect;
use crate::renderer::WgpuRenderer;
use crate::scene::{ExampleScene, ExampleSceneParams, PerspectiveCamera};

type StudioStage = Stage<WindowScheduler, WindowSurface, ExampleScene, WgpuRenderer>;

/// Runs the example scene in a window.
pub struct StudioApp {
    config: StudioConfig,
    stage: Option<StudioStage>,
}

impl StudioApp {
    pub fn new(config: StudioConfig) -> Self {
        Self {
            config,
            stage: None,
        }
    }

    fn build_stage(&self, host: &WindowHost) -> Result<StudioStage> {
        let gpu = pollster::block_on(Gpu::new(Arc::clone(host.window()), GpuInit::default()))?;

        let clock = Clock::new();

        let mut params = ViewportParams::new(host.surface());
        if let Some(maximum_dpr) = self.config.maximum_dpr {
            params = params.maximum_dpr(maximum_dpr);
        }
        let viewport = Viewport::new(params);

        let camera = PerspectiveCamera::new(45.0, viewport.ratio() as f32, 0.1, 100.0)
            .with_position(Vec3::new(0.0, 0.0, 5.0));
        let scene = ExampleScene::new(ExampleSceneParams {
            clock: clock.signal(),
            viewport: viewport.signal(),
            camera,
        });

        let renderer = WgpuRenderer::new(gpu, viewport.signal(), BloomEffect::default());

        Ok(Stage::new(host.scheduler(), clock, viewport, scene, renderer))
    }
}

impl App for StudioApp {
    fn init(&mut self, host: WindowHost) -> Result<()> {
        let mut stage = self.build_stage(&host)?;
        pollster::block_on(stage.load())?;
        stage.try_start()?;

        log::info!("stage running");
        self.stage = Some(stage);
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, request: FrameRequest) -> AppControl {
        let Some(stage) = self.stage.as_mut() else {
            return AppControl::Continue;
        };

        match stage.frame(request) {
            Ok(()) => AppControl::Continue,
            // Already logged by the loop, which has stopped.
            Err(_) => AppControl::Exit,
        }
    }

    fn on_resize(&mut self, entry: ResizeEntry) {
        if let Some(stage) = self.stage.as_mut() {
            stage.observe(entry);
        }
    }

    fn exiting(&mut self) {
        if let Some(mut stage) = self.stage.take() {
            stage.dispose();
            log::info!("stage disposed");
        }
    }
}
