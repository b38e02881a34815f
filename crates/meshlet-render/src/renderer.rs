use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use meshlet_engine::render::{RenderCtx, RenderTarget};

use crate::camera::{TransformUniform, Transforms};
use crate::config::SceneConfig;
use crate::mesh::{GpuMesh, SphereDesc, SphereMesh};
use crate::mode::PrimitiveMode;
use crate::pipeline::{self, EntryPoints, Pipelines, TargetFormats, TintUniform};
use crate::plan::{FramePlan, MeshCounts, PassLoad, Tint};

/// Largest object-group count a single mesh dispatch may use per dimension.
const MAX_GROUPS_PER_DIMENSION: u32 = 65_535;

/// Draws the sphere through the standard pipeline, then the mesh pipeline on top.
///
/// Pipelines, buffers and bind groups are created in [`Renderer::new`] and are
/// immutable afterwards; only the primitive mode and the resize-derived
/// transforms change.
pub struct Renderer {
    config: SceneConfig,
    pipelines: Pipelines,
    mesh: GpuMesh,

    transform_ubo: wgpu::Buffer,
    tint_stride: u32,
    frame_bind_group: wgpu::BindGroup,
    object_bind_group: wgpu::BindGroup,

    transforms: Transforms,
    mode: PrimitiveMode,
}

impl Renderer {
    /// Builds every GPU object the renderer needs.
    ///
    /// Any failure here is a configuration error; the caller decides whether to abort.
    pub fn new(ctx: &RenderCtx<'_>, config: SceneConfig) -> Result<Self> {
        let groups = dispatch_groups(&config.sphere)?;
        let sphere = SphereMesh::generate(&config.sphere).context("failed to generate sphere")?;
        log::info!("sphere vertex count: {groups}");

        let pipelines = Pipelines::build(
            ctx.device,
            TargetFormats {
                color: ctx.surface_format,
                depth: ctx.depth_format,
            },
            &EntryPoints::default(),
            pipeline::SPHERE_SHADER,
        )
        .context("failed to build render pipelines")?;

        let mesh = GpuMesh::upload(ctx.device, &sphere);

        let transform_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("meshlet transform ubo"),
            size: std::mem::size_of::<TransformUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let tint_stride = pipeline::tint_stride(ctx.device.limits().min_uniform_buffer_offset_alignment);
        let tint_ubo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("meshlet tint ubo"),
            contents: &tint_bytes(&config, tint_stride),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let frame_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("meshlet frame bind group"),
            layout: pipelines.frame_layout(),
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: transform_ubo.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                        buffer: &tint_ubo,
                        offset: 0,
                        size: wgpu::BufferSize::new(std::mem::size_of::<TintUniform>() as u64),
                    }),
                },
            ],
        });

        let object_bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("meshlet object input bind group"),
            layout: pipelines.object_layout(),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: mesh.vertex_buffer.as_entire_binding(),
            }],
        });

        let mut transforms = Transforms::new(config.camera);
        transforms.resize(ctx.size.width, ctx.size.height);

        Ok(Self {
            config,
            pipelines,
            mesh,
            transform_ubo,
            tint_stride,
            frame_bind_group,
            object_bind_group,
            transforms,
            mode: PrimitiveMode::default(),
        })
    }

    /// Recomputes the transforms for a new drawable size. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.transforms.resize(width, height) {
            log::debug!("aspect {:.4} ({width}x{height})", self.transforms.aspect());
        }
    }

    /// Selects line or triangle rendering. Takes effect on the next drawn frame.
    pub fn set_primitive_mode(&mut self, mode: PrimitiveMode) {
        self.mode = mode;
    }

    pub fn primitive_mode(&self) -> PrimitiveMode {
        self.mode
    }

    pub fn transforms(&self) -> &Transforms {
        &self.transforms
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count
    }

    /// The commands the next `draw_frame` will encode.
    pub fn plan(&self) -> FramePlan {
        FramePlan::build(
            self.mode,
            &self.transforms,
            MeshCounts {
                vertex_count: self.mesh.vertex_count,
                index_count: self.mesh.index_count,
            },
            self.config.clear_color,
        )
    }

    /// Encodes one frame: the standard pass, then the mesh pass on the same targets.
    ///
    /// Does nothing for a zero-sized drawable.
    pub fn draw_frame(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>) {
        if ctx.size.width == 0 || ctx.size.height == 0 {
            return;
        }

        let plan = self.plan();
        ctx.queue.write_buffer(
            &self.transform_ubo,
            0,
            bytemuck::bytes_of(&TransformUniform::from(plan.matrix)),
        );

        self.encode_standard_pass(target, &plan);
        self.encode_mesh_pass(target, &plan);
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn encode_standard_pass(&self, target: &mut RenderTarget<'_>, plan: &FramePlan) {
        let mut rpass = begin_pass(target, "meshlet standard pass", plan.standard_load);

        rpass.set_vertex_buffer(0, self.mesh.vertex_buffer.slice(..));
        rpass.set_index_buffer(self.mesh.index_buffer.slice(..), GpuMesh::INDEX_FORMAT);

        for draw in &plan.standard_draws {
            let Some(pipeline) = self.pipelines.standard(draw.topology) else { continue };
            rpass.set_pipeline(pipeline);
            rpass.set_bind_group(0, &self.frame_bind_group, &[self.tint_offset(draw.tint)]);
            rpass.draw_indexed(0..draw.index_count, 0, 0..1);
        }
    }

    fn encode_mesh_pass(&self, target: &mut RenderTarget<'_>, plan: &FramePlan) {
        let dispatch = plan.mesh_dispatch;
        let Some(pipeline) = self.pipelines.mesh(dispatch.polygon_mode) else { return };

        let mut rpass = begin_pass(target, "meshlet mesh pass", plan.mesh_load);

        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &self.frame_bind_group, &[self.tint_offset(dispatch.tint)]);
        rpass.set_bind_group(1, &self.object_bind_group, &[]);

        let [x, y, z] = dispatch.groups;
        rpass.draw_mesh_tasks(x, y, z);
    }

    fn tint_offset(&self, tint: Tint) -> wgpu::DynamicOffset {
        tint.slot() * self.tint_stride
    }
}

fn begin_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &'static str,
    load: PassLoad,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: load.color,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: target.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: load.depth,
                store: wgpu::StoreOp::Store,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Object groups one frame dispatches for `sphere`: one per vertex.
///
/// Checked before any geometry is generated.
fn dispatch_groups(sphere: &SphereDesc) -> Result<u32> {
    let count = sphere
        .vertex_count()
        .with_context(|| format!("sphere segments {:?} overflow u32 indices", sphere.segments))?;
    anyhow::ensure!(
        count <= MAX_GROUPS_PER_DIMENSION,
        "sphere has {count} vertices; one mesh dispatch supports at most {MAX_GROUPS_PER_DIMENSION}"
    );
    Ok(count)
}

/// Tint colors laid out at `stride`-byte slots, in [`Tint::slot`] order.
fn tint_bytes(config: &SceneConfig, stride: u32) -> Vec<u8> {
    let stride = stride as usize;
    let mut bytes = vec![0u8; stride * Tint::ALL.len()];

    for tint in Tint::ALL {
        let color = match tint {
            Tint::Surface => config.tints.surface,
            Tint::Points => config.tints.points,
            Tint::Meshlets => config.tints.meshlets,
        };
        let offset = tint.slot() as usize * stride;
        let uniform = TintUniform { color };
        let src = bytemuck::bytes_of(&uniform);
        bytes[offset..offset + src.len()].copy_from_slice(src);
    }

    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── tints ───────────────────────────────────────────────────────────────

    #[test]
    fn tint_bytes_places_colors_at_slots() {
        let config = SceneConfig::default();
        let bytes = tint_bytes(&config, 256);
        assert_eq!(bytes.len(), 3 * 256);

        let read = |slot: usize| -> [f32; 4] {
            let at = slot * 256;
            bytemuck::pod_read_unaligned::<[f32; 4]>(&bytes[at..at + 16])
        };
        assert_eq!(read(0), [0.0, 1.0, 0.0, 1.0]);
        assert_eq!(read(1), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(read(2), [0.0, 0.0, 1.0, 1.0]);
    }

    // ── dispatch bound ──────────────────────────────────────────────────────

    #[test]
    fn default_sphere_fits_one_dispatch() {
        assert_eq!(dispatch_groups(&SceneConfig::default().sphere).unwrap(), 61 * 61);
    }

    #[test]
    fn oversized_sphere_is_rejected_before_generation() {
        let sphere = SphereDesc { segments: [300, 300], ..Default::default() };
        let err = dispatch_groups(&sphere).unwrap_err();
        assert!(err.to_string().contains("90601"), "{err}");
    }

    #[test]
    fn overflowing_sphere_is_rejected() {
        let sphere = SphereDesc { segments: [u32::MAX, 2], ..Default::default() };
        assert!(dispatch_groups(&sphere).is_err());
    }
}
