/// Initialization parameters for the GPU layer.
///
/// Keep this structure stable and minimal. Add configuration flags only when a
/// concrete platform or backend requirement exists.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Prefer an sRGB surface format when available.
    ///
    /// When `false`, a linear 8-bit BGRA/RGBA format is preferred instead.
    pub prefer_srgb: bool,

    /// Present mode (swap behavior).
    ///
    /// FIFO is broadly supported and paces presentation to the display.
    pub present_mode: wgpu::PresentMode,

    /// Optional alpha mode preference for the surface.
    ///
    /// If provided but unsupported on the current surface, a supported mode is selected.
    pub alpha_mode: Option<wgpu::CompositeAlphaMode>,

    /// Required wgpu features.
    ///
    /// Device creation fails early with a readable error if the adapter lacks any of them.
    pub required_features: wgpu::Features,

    /// Limits requested from the device.
    ///
    /// `None` requests the adapter's own limits, which are always satisfiable.
    pub required_limits: Option<wgpu::Limits>,

    /// Opt into wgpu's experimental features (mesh shaders live behind this gate).
    pub experimental: bool,

    /// Format of the depth texture owned by the GPU layer.
    pub depth_format: wgpu::TextureFormat,

    /// Desired maximum frame latency for the surface.
    ///
    /// This value is a hint; support depends on platform/backend.
    pub desired_maximum_frame_latency: u32,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            prefer_srgb: true,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: None,
            required_features: wgpu::Features::empty(),
            required_limits: None,
            experimental: false,
            depth_format: wgpu::TextureFormat::Depth32Float,
            desired_maximum_frame_latency: 2,
        }
    }
}

impl GpuInit {
    /// Configuration for mesh-shader rendering.
    ///
    /// Requests the experimental mesh shader feature plus line polygon mode
    /// (wireframe fill for triangles emitted by the mesh stage).
    pub fn mesh_shading() -> Self {
        Self {
            prefer_srgb: false,
            required_features: wgpu::Features::EXPERIMENTAL_MESH_SHADER
                | wgpu::Features::POLYGON_MODE_LINE,
            experimental: true,
            ..Self::default()
        }
    }
}
