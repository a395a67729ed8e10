//! Lumen studio: the example scene in a window.

mod app;
mod config;
mod effects;
mod renderer;
mod scene;

use anyhow::Result;

use lumen_engine::logging::init_logging;
use lumen_engine::window::Runtime;

use crate::app::StudioApp;
use crate::config::StudioConfig;

fn main() -> Result<()> {
    let config = StudioConfig::from_env()?;
    init_logging(config.logging());

    Runtime::run(config.runtime(), StudioApp::new(config))
}
