//! Sphere renderer drawing one mesh through two GPU paths per frame.
//!
//! The standard path pulls vertices through a vertex/fragment pipeline. The
//! mesh-shading path reads the same vertex buffer in an object (task) stage and
//! emits one triangle per vertex from the mesh stage, layered on top.

pub mod camera;
pub mod config;
pub mod mesh;
pub mod mode;
pub mod pipeline;
pub mod plan;

mod renderer;

pub use camera::Transforms;
pub use config::{CameraConfig, SceneConfig, Tints};
pub use mode::PrimitiveMode;
pub use plan::FramePlan;
pub use renderer::Renderer;
