//! Sphere geometry: CPU generation and the GPU buffers built from it.

mod buffers;
mod sphere;

pub use buffers::GpuMesh;
pub use sphere::{SphereDesc, SphereMesh, SphereVertex};
