//! Rendering surface interface.
//!
//! Geometry, shading and compositing are delegated to whatever implements
//! [`Renderer`]; the engine only decides when it runs.

mod renderer;

pub use renderer::Renderer;
