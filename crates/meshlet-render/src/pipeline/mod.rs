//! Pipeline construction.
//!
//! One WGSL module feeds both families: the standard vertex/fragment pipelines
//! and the object + mesh + fragment pipelines.

mod builder;
mod entry_points;

pub use builder::{depth_state, tint_stride, Pipelines, TargetFormats, TintUniform};
pub use entry_points::EntryPoints;

/// WGSL source holding all five entry points.
pub const SPHERE_SHADER: &str = include_str!("../shaders/sphere.wgsl");
