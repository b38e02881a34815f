//! Meshlet engine crate.
//!
//! This crate owns the platform + GPU runtime pieces used by the renderer and viewer:
//! window hosting, device/surface/depth management, per-window input and frame timing.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod render;
