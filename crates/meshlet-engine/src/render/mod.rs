//! Renderer-facing handles.
//!
//! The runtime acquires the frame; renderers record into the provided encoder
//! and own their GPU resources (pipelines, buffers, bind groups).

mod ctx;

pub use ctx::{RenderCtx, RenderTarget};
