//! Example scene content.

mod camera;
mod example;
mod light;
mod mesh;

pub use camera::PerspectiveCamera;
pub use example::{ExampleScene, ExampleSceneParams};
pub use light::PointLight;
