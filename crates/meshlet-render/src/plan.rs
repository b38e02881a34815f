//! Per-frame command plan.
//!
//! [`FramePlan::build`] turns renderer state into the exact sequence of passes
//! and draws for one frame. The renderer replays the plan against wgpu; tests
//! inspect it directly.

use glam::Mat4;

use crate::camera::Transforms;
use crate::mode::PrimitiveMode;

/// Threads per object (task) workgroup. Must match `@workgroup_size` of the object entry point.
pub const OBJECT_THREADS_PER_GROUP: u32 = 1;

/// Threads per mesh workgroup, one per emitted vertex. Must match the mesh entry point.
pub const MESH_THREADS_PER_GROUP: u32 = 3;

/// Flat color slot selected through a dynamic uniform offset.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Tint {
    Surface,
    Points,
    Meshlets,
}

impl Tint {
    pub const ALL: [Tint; 3] = [Tint::Surface, Tint::Points, Tint::Meshlets];

    /// Slot index in the tint uniform buffer.
    pub fn slot(self) -> u32 {
        match self {
            Tint::Surface => 0,
            Tint::Points => 1,
            Tint::Meshlets => 2,
        }
    }
}

/// Load operations of one render pass.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PassLoad {
    pub color: wgpu::LoadOp<wgpu::Color>,
    pub depth: wgpu::LoadOp<f32>,
}

/// One indexed draw over the whole sphere index buffer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct IndexedDraw {
    pub topology: wgpu::PrimitiveTopology,
    pub tint: Tint,
    pub index_count: u32,
}

/// Mesh-shader dispatch: one object group per sphere vertex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MeshDispatch {
    pub polygon_mode: wgpu::PolygonMode,
    pub tint: Tint,
    /// Object workgroups in x, y, z.
    pub groups: [u32; 3],
    pub object_threads: u32,
    pub mesh_threads: u32,
}

/// Sizes of the uploaded sphere.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MeshCounts {
    pub vertex_count: u32,
    pub index_count: u32,
}

/// Everything the renderer encodes for one frame, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    /// `projection * view * model`, shared by every stage that transforms.
    pub matrix: Mat4,

    pub standard_load: PassLoad,
    /// Current topology first, then the point overlay.
    pub standard_draws: [IndexedDraw; 2],

    pub mesh_load: PassLoad,
    pub mesh_dispatch: MeshDispatch,
}

impl FramePlan {
    pub fn build(
        mode: PrimitiveMode,
        transforms: &Transforms,
        counts: MeshCounts,
        clear_color: wgpu::Color,
    ) -> Self {
        let index_count = counts.index_count;

        Self {
            matrix: transforms.combined(),
            standard_load: PassLoad {
                color: wgpu::LoadOp::Clear(clear_color),
                depth: wgpu::LoadOp::Clear(1.0),
            },
            standard_draws: [
                IndexedDraw {
                    topology: mode.topology(),
                    tint: Tint::Surface,
                    index_count,
                },
                IndexedDraw {
                    topology: wgpu::PrimitiveTopology::PointList,
                    tint: Tint::Points,
                    index_count,
                },
            ],
            // Color is kept so the meshlets land on top of the sphere; depth
            // is cleared again, so the sphere does not occlude them.
            mesh_load: PassLoad {
                color: wgpu::LoadOp::Load,
                depth: wgpu::LoadOp::Clear(1.0),
            },
            mesh_dispatch: MeshDispatch {
                polygon_mode: mode.polygon_mode(),
                tint: Tint::Meshlets,
                groups: [counts.vertex_count, 1, 1],
                object_threads: OBJECT_THREADS_PER_GROUP,
                mesh_threads: MESH_THREADS_PER_GROUP,
            },
        }
    }
}
