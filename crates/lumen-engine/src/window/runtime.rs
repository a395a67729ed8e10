use anyhow::{Context, Result};
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App, AppControl};

use super::host::WindowHost;

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "lumen".to_string(),
            initial_size: LogicalSize::new(1280.0, 720.0),
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens one window and drives `app` until it exits.
    pub fn run<A>(config: RuntimeConfig, app: A) -> Result<()>
    where
        A: 'static + App,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        // Frames are paced by explicit redraw requests from the frame scheduler.
        event_loop.set_control_flow(ControlFlow::Wait);

        let mut state = AppState::new(config, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        Ok(())
    }
}

struct AppState<A> {
    config: RuntimeConfig,
    app: A,
    host: Option<WindowHost>,
}

impl<A: App> AppState<A> {
    fn new(config: RuntimeConfig, app: A) -> Self {
        Self {
            config,
            app,
            host: None,
        }
    }

    fn create_host(&self, event_loop: &ActiveEventLoop) -> Result<WindowHost> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        Ok(WindowHost::new(Arc::new(window)))
    }
}

impl<A: App> ApplicationHandler for AppState<A> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.host.is_some() {
            return;
        }

        let host = match self.create_host(event_loop) {
            Ok(host) => host,
            Err(e) => {
                log::error!("failed to create initial window: {e:#}");
                event_loop.exit();
                return;
            }
        };

        self.host = Some(host.clone());

        if let Err(e) = self.app.init(host) {
            log::error!("application failed to initialize: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(host) = self.host.clone() else {
            return;
        };
        if host.window().id() != window_id {
            return;
        }

        if self.app.on_window_event(&event) == AppControl::Exit {
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => {
                if let Some(entry) = host.resize_entry(size) {
                    self.app.on_resize(entry);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let size = host.window().inner_size();
                if let Some(entry) = host.resize_entry(size) {
                    self.app.on_resize(entry);
                }
            }

            WindowEvent::RedrawRequested => {
                let Some(request) = host.take_due_frame() else {
                    return;
                };
                if self.app.on_frame(request) == AppControl::Exit {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.app.exiting();
    }
}
