/// Represents a single acquired frame.
///
/// This object is short-lived and must be finalized promptly. Holding the surface
/// texture prevents acquisition of subsequent frames.
pub struct GpuFrame {
    pub surface_texture: wgpu::SurfaceTexture,

    /// Color view of the acquired surface texture.
    pub view: wgpu::TextureView,

    /// View of the depth texture matching the surface size.
    pub depth_view: wgpu::TextureView,

    pub encoder: wgpu::CommandEncoder,
}
