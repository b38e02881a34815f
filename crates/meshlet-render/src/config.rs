use crate::mesh::SphereDesc;

/// Camera parameters applied on every resize.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// Distance the view matrix moves the scene away from the eye (along -Z).
    pub distance: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 65.0,
            near: 0.1,
            far: 100.0,
            distance: 2.8,
        }
    }
}

/// Flat colors for each draw (RGBA, linear).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tints {
    /// Triangles or lines of the standard pass.
    pub surface: [f32; 4],
    /// Vertex dots of the standard pass.
    pub points: [f32; 4],
    /// Triangles emitted by the mesh stage.
    pub meshlets: [f32; 4],
}

impl Default for Tints {
    fn default() -> Self {
        Self {
            surface: [0.0, 1.0, 0.0, 1.0],
            points: [1.0, 0.0, 0.0, 1.0],
            meshlets: [0.0, 0.0, 1.0, 1.0],
        }
    }
}

/// Everything the renderer needs to know about the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneConfig {
    pub sphere: SphereDesc,
    pub camera: CameraConfig,
    pub tints: Tints,
    pub clear_color: wgpu::Color,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            sphere: SphereDesc::default(),
            camera: CameraConfig::default(),
            tints: Tints::default(),
            clear_color: wgpu::Color {
                r: 0.93,
                g: 0.97,
                b: 1.0,
                a: 1.0,
            },
        }
    }
}
