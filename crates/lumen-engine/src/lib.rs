//! Lumen engine crate.
//!
//! The coordination layer of a real-time renderer: a frame loop, a resize-aware
//! viewport and a delta-time clock under a shared lifecycle contract, plus the
//! winit/wgpu host pieces that drive them.

pub mod coords;
pub mod core;
pub mod device;
pub mod frame;
pub mod render;
pub mod stage;
pub mod time;
pub mod viewport;
pub mod window;

pub mod logging;
