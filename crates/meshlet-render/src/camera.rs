use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::config::CameraConfig;

/// Projection, view and model matrices.
///
/// All three start as identity. [`Transforms::resize`] rebuilds projection and
/// view and resets the model; nothing else mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Transforms {
    camera: CameraConfig,
    aspect: f32,
    projection: Mat4,
    view: Mat4,
    model: Mat4,
}

impl Transforms {
    pub fn new(camera: CameraConfig) -> Self {
        Self {
            camera,
            aspect: 1.0,
            projection: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            model: Mat4::IDENTITY,
        }
    }

    /// Applies a drawable size change.
    ///
    /// Returns `false` (and keeps the previous matrices) for a zero-sized drawable.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }

        let CameraConfig {
            fov_y_degrees,
            near,
            far,
            distance,
        } = self.camera;

        self.aspect = width as f32 / height as f32;
        self.projection = Mat4::perspective_rh(fov_y_degrees.to_radians(), self.aspect, near, far);
        self.view = Mat4::from_translation(Vec3::new(0.0, 0.0, -distance));
        self.model = Mat4::IDENTITY;
        true
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    /// `projection * view * model`.
    pub fn combined(&self) -> Mat4 {
        self.projection * self.view * self.model
    }
}

/// Uniform block holding the combined matrix (column-major, 64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct TransformUniform {
    pub matrix: [[f32; 4]; 4],
}

impl From<Mat4> for TransformUniform {
    fn from(m: Mat4) -> Self {
        Self {
            matrix: m.to_cols_array_2d(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn resized(width: u32, height: u32) -> Transforms {
        let mut t = Transforms::new(CameraConfig::default());
        assert!(t.resize(width, height));
        t
    }

    #[test]
    fn starts_as_identity() {
        let t = Transforms::new(CameraConfig::default());
        assert_eq!(t.combined(), Mat4::IDENTITY);
    }

    #[test]
    fn aspect_is_width_over_height() {
        assert_eq!(resized(800, 600).aspect(), 800.0 / 600.0);
        for (w, h) in [(1, 1), (1920, 1080), (333, 1000), (7, 3)] {
            assert_eq!(resized(w, h).aspect(), w as f32 / h as f32);
        }
    }

    #[test]
    fn projection_uses_configured_fov() {
        let t = resized(800, 600);
        let f = 1.0 / (65.0f32.to_radians() * 0.5).tan();
        assert!((t.projection().y_axis.y - f).abs() < 1e-5);
        assert!((t.projection().x_axis.x - f / t.aspect()).abs() < 1e-5);
    }

    #[test]
    fn view_moves_scene_back() {
        let t = resized(800, 600);
        assert_eq!(t.view().w_axis, Vec4::new(0.0, 0.0, -2.8, 1.0));
        assert_eq!(t.model(), Mat4::IDENTITY);
    }

    #[test]
    fn origin_projects_inside_depth_range() {
        let t = resized(800, 600);
        let clip = t.combined() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc_z = clip.z / clip.w;
        assert!(ndc_z > 0.0 && ndc_z < 1.0);
    }

    #[test]
    fn zero_size_keeps_previous_matrices() {
        let mut t = resized(800, 600);
        let before = t.clone();
        assert!(!t.resize(0, 600));
        assert!(!t.resize(800, 0));
        assert_eq!(t, before);
    }

    #[test]
    fn uniform_is_column_major() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let u = TransformUniform::from(m);
        assert_eq!(u.matrix[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(std::mem::size_of::<TransformUniform>(), 64);
    }
}
