use anyhow::Result;

use crate::camera::TransformUniform;
use crate::mesh::SphereVertex;

use super::EntryPoints;

/// Color and depth formats every pipeline renders into.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct TargetFormats {
    pub color: wgpu::TextureFormat,
    pub depth: wgpu::TextureFormat,
}

/// Shared depth state: nearer fragments win and write depth.
pub fn depth_state(format: wgpu::TextureFormat) -> wgpu::DepthStencilState {
    wgpu::DepthStencilState {
        format,
        depth_write_enabled: true,
        depth_compare: wgpu::CompareFunction::Less,
        stencil: wgpu::StencilState::default(),
        bias: wgpu::DepthBiasState::default(),
    }
}

/// Rasterizer state of every pipeline: clockwise front faces, back faces culled.
fn primitive_state(
    topology: wgpu::PrimitiveTopology,
    polygon_mode: wgpu::PolygonMode,
) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Cw,
        cull_mode: Some(wgpu::Face::Back),
        polygon_mode,
        unclipped_depth: false,
        conservative: false,
    }
}

/// All render pipelines, built once at startup and never mutated.
///
/// wgpu bakes topology and fill mode into the pipeline object, so each family
/// holds one variant per value the renderer switches between.
pub struct Pipelines {
    /// Group 0: transform uniform + dynamic-offset tint uniform.
    frame_layout: wgpu::BindGroupLayout,
    /// Group 1 of the mesh pipelines: sphere vertices as object-stage storage.
    object_layout: wgpu::BindGroupLayout,

    standard_triangles: wgpu::RenderPipeline,
    standard_lines: wgpu::RenderPipeline,
    standard_points: wgpu::RenderPipeline,

    mesh_fill: wgpu::RenderPipeline,
    mesh_line: wgpu::RenderPipeline,
}

impl Pipelines {
    /// Verifies the shader's entry points, then builds both pipeline families.
    pub fn build(
        device: &wgpu::Device,
        formats: TargetFormats,
        entries: &EntryPoints,
        source: &str,
    ) -> Result<Self> {
        entries.verify(source)?;

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("meshlet sphere shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("meshlet frame bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::TASK
                        | wgpu::ShaderStages::MESH,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TransformUniform>() as u64,
                        ),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TintUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
        });

        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("meshlet object input bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::TASK,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: wgpu::BufferSize::new(
                        std::mem::size_of::<SphereVertex>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let standard_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("meshlet standard pipeline layout"),
            bind_group_layouts: &[&frame_layout],
            immediate_size: 0,
        });

        let mesh_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("meshlet mesh pipeline layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            immediate_size: 0,
        });

        let color_targets = [Some(wgpu::ColorTargetState {
            format: formats.color,
            blend: None,
            write_mask: wgpu::ColorWrites::ALL,
        })];

        let standard = |label: &str, topology: wgpu::PrimitiveTopology| {
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&standard_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(entries.vertex),
                    compilation_options: Default::default(),
                    buffers: &[SphereVertex::layout()],
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(entries.fragment),
                    compilation_options: Default::default(),
                    targets: &color_targets,
                }),
                primitive: primitive_state(topology, wgpu::PolygonMode::Fill),
                depth_stencil: Some(depth_state(formats.depth)),
                multisample: wgpu::MultisampleState::default(),
                multiview_mask: None,
                cache: None,
            })
        };

        let mesh = |label: &str, polygon_mode: wgpu::PolygonMode| {
            device.create_mesh_pipeline(&wgpu::MeshPipelineDescriptor {
                label: Some(label),
                layout: Some(&mesh_layout),
                task: Some(wgpu::TaskState {
                    module: &shader,
                    entry_point: Some(entries.object),
                    compilation_options: Default::default(),
                }),
                mesh: wgpu::MeshState {
                    module: &shader,
                    entry_point: Some(entries.mesh),
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(entries.mesh_fragment),
                    compilation_options: Default::default(),
                    targets: &color_targets,
                }),
                primitive: primitive_state(wgpu::PrimitiveTopology::TriangleList, polygon_mode),
                depth_stencil: Some(depth_state(formats.depth)),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            })
        };

        let pipelines = Self {
            standard_triangles: standard(
                "meshlet standard pipeline (triangles)",
                wgpu::PrimitiveTopology::TriangleList,
            ),
            standard_lines: standard(
                "meshlet standard pipeline (lines)",
                wgpu::PrimitiveTopology::LineList,
            ),
            standard_points: standard(
                "meshlet standard pipeline (points)",
                wgpu::PrimitiveTopology::PointList,
            ),
            mesh_fill: mesh("meshlet mesh pipeline (fill)", wgpu::PolygonMode::Fill),
            mesh_line: mesh("meshlet mesh pipeline (line)", wgpu::PolygonMode::Line),
            frame_layout,
            object_layout,
        };

        log::debug!("pipelines built for {:?} / {:?}", formats.color, formats.depth);
        Ok(pipelines)
    }

    pub fn frame_layout(&self) -> &wgpu::BindGroupLayout {
        &self.frame_layout
    }

    pub fn object_layout(&self) -> &wgpu::BindGroupLayout {
        &self.object_layout
    }

    /// Standard pipeline for `topology`, if one was built.
    pub fn standard(&self, topology: wgpu::PrimitiveTopology) -> Option<&wgpu::RenderPipeline> {
        match topology {
            wgpu::PrimitiveTopology::TriangleList => Some(&self.standard_triangles),
            wgpu::PrimitiveTopology::LineList => Some(&self.standard_lines),
            wgpu::PrimitiveTopology::PointList => Some(&self.standard_points),
            _ => None,
        }
    }

    /// Mesh pipeline for `polygon_mode`, if one was built.
    pub fn mesh(&self, polygon_mode: wgpu::PolygonMode) -> Option<&wgpu::RenderPipeline> {
        match polygon_mode {
            wgpu::PolygonMode::Fill => Some(&self.mesh_fill),
            wgpu::PolygonMode::Line => Some(&self.mesh_line),
            wgpu::PolygonMode::Point => None,
        }
    }
}

/// Uniform block holding one flat color (16 bytes, placed at aligned offsets).
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TintUniform {
    pub color: [f32; 4],
}

/// Distance between tint slots: the uniform size rounded up to the device's
/// dynamic offset alignment.
pub fn tint_stride(min_uniform_offset_alignment: u32) -> u32 {
    let size = std::mem::size_of::<TintUniform>() as u32;
    let align = min_uniform_offset_alignment.max(1);
    size.div_ceil(align) * align
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tint_stride_rounds_up_to_alignment() {
        assert_eq!(tint_stride(256), 256);
        assert_eq!(tint_stride(64), 64);
        assert_eq!(tint_stride(16), 16);
        assert_eq!(tint_stride(0), 16);
    }

    #[test]
    fn depth_state_writes_and_keeps_nearest() {
        let state = depth_state(wgpu::TextureFormat::Depth32Float);
        assert!(state.depth_write_enabled);
        assert_eq!(state.depth_compare, wgpu::CompareFunction::Less);
        assert_eq!(state.format, wgpu::TextureFormat::Depth32Float);
    }

    #[test]
    fn primitive_state_culls_back_faces_clockwise_front() {
        let state = primitive_state(wgpu::PrimitiveTopology::TriangleList, wgpu::PolygonMode::Line);
        assert_eq!(state.front_face, wgpu::FrontFace::Cw);
        assert_eq!(state.cull_mode, Some(wgpu::Face::Back));
        assert_eq!(state.polygon_mode, wgpu::PolygonMode::Line);
    }
}
