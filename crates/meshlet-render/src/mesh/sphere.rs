use std::f32::consts::PI;

use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Parameters of a UV sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereDesc {
    /// Bounding box size along each axis. Unequal values give an ellipsoid.
    pub extent: [f32; 3],
    /// `[around, pole_to_pole]` segment counts.
    pub segments: [u32; 2],
}

impl Default for SphereDesc {
    fn default() -> Self {
        Self {
            extent: [1.2, 1.2, 1.2],
            segments: [60, 60],
        }
    }
}

impl SphereDesc {
    /// Number of vertices `generate` produces: one seam column and both pole rows are duplicated.
    ///
    /// `None` when the count does not fit a `u32` index.
    pub fn vertex_count(&self) -> Option<u32> {
        let [around, rings] = self.segments;
        around.checked_add(1)?.checked_mul(rings.checked_add(1)?)
    }

    /// Number of `u32` indices `generate` produces (two triangles per quad).
    pub fn index_count(&self) -> Option<u32> {
        let [around, rings] = self.segments;
        around.checked_mul(rings)?.checked_mul(6)
    }
}

/// Interleaved vertex shared by both pipelines (32 bytes).
///
///  offset  0  position [f32; 3]   loc 0
///  offset 12  normal   [f32; 3]   loc 1
///  offset 24  uv       [f32; 2]   loc 2
///
/// The object stage reads the same buffer as a flat `array<f32>` with a
/// stride of [`SphereVertex::FLOATS`].
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct SphereVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl SphereVertex {
    pub const FLOATS: usize = 8;

    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x3, // position
        1 => Float32x3, // normal
        2 => Float32x2  // uv
    ];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SphereVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// CPU-side sphere with `u32` triangle-list indices.
#[derive(Debug, Clone)]
pub struct SphereMesh {
    pub vertices: Vec<SphereVertex>,
    pub indices: Vec<u32>,
}

impl SphereMesh {
    /// Generates a UV sphere.
    ///
    /// Rings run from the +Y pole to the -Y pole. Triangles wind clockwise
    /// when seen from outside.
    pub fn generate(desc: &SphereDesc) -> Result<Self> {
        let [around, rings] = desc.segments;
        anyhow::ensure!(around >= 3, "sphere needs at least 3 segments around, got {around}");
        anyhow::ensure!(rings >= 2, "sphere needs at least 2 rings, got {rings}");
        anyhow::ensure!(
            desc.extent.iter().all(|e| e.is_finite() && *e > 0.0),
            "sphere extent must be positive, got {:?}",
            desc.extent
        );

        let (Some(vertex_count), Some(index_count)) = (desc.vertex_count(), desc.index_count()) else {
            anyhow::bail!("sphere segments {:?} overflow u32 indices", desc.segments);
        };

        let radii = Vec3::from_array(desc.extent) * 0.5;
        let mut vertices = Vec::with_capacity(vertex_count as usize);
        let mut indices = Vec::with_capacity(index_count as usize);

        for ring in 0..=rings {
            let theta = ring as f32 * PI / rings as f32;
            let (sin_theta, cos_theta) = theta.sin_cos();

            for segment in 0..=around {
                let phi = segment as f32 * 2.0 * PI / around as f32;
                let (sin_phi, cos_phi) = phi.sin_cos();

                let unit = Vec3::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);
                let normal = (unit / radii).normalize_or(unit);

                vertices.push(SphereVertex {
                    position: (unit * radii).to_array(),
                    normal: normal.to_array(),
                    uv: [segment as f32 / around as f32, ring as f32 / rings as f32],
                });
            }
        }

        for ring in 0..rings {
            for segment in 0..around {
                let current = ring * (around + 1) + segment;
                let next = current + around + 1;

                indices.extend_from_slice(&[
                    current,
                    next,
                    current + 1,
                    current + 1,
                    next,
                    next + 1,
                ]);
            }
        }

        Ok(Self { vertices, indices })
    }

    pub fn vertex_count(&self) -> u32 {
        self.vertices.len() as u32
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(around: u32, rings: u32) -> SphereMesh {
        SphereMesh::generate(&SphereDesc {
            extent: [1.2, 1.2, 1.2],
            segments: [around, rings],
        })
        .unwrap()
    }

    // ── counts ────────────────────────────────────────────────────────────

    #[test]
    fn default_sphere_vertex_count() {
        let mesh = sphere(60, 60);
        assert_eq!(mesh.vertex_count(), 61 * 61);
        assert_eq!(Some(mesh.vertex_count()), SphereDesc::default().vertex_count());
    }

    #[test]
    fn index_count_matches_desc() {
        let desc = SphereDesc { segments: [8, 5], ..Default::default() };
        let mesh = SphereMesh::generate(&desc).unwrap();
        assert_eq!(Some(mesh.index_count()), desc.index_count());
        assert_eq!(mesh.index_count(), 8 * 5 * 6);
    }

    #[test]
    fn indices_in_range() {
        let mesh = sphere(12, 7);
        assert!(mesh.indices.iter().all(|&i| i < mesh.vertex_count()));
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[test]
    fn positions_lie_on_radius() {
        let mesh = sphere(16, 9);
        for v in &mesh.vertices {
            let r = Vec3::from_array(v.position).length();
            assert!((r - 0.6).abs() < 1e-5, "radius {r}");
        }
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let mesh = sphere(16, 9);
        for v in &mesh.vertices {
            let n = Vec3::from_array(v.normal);
            assert!((n.length() - 1.0).abs() < 1e-5);
            assert!(n.dot(Vec3::from_array(v.position)) > 0.0);
        }
    }

    #[test]
    fn first_vertex_is_north_pole() {
        let mesh = sphere(16, 9);
        let p = mesh.vertices[0].position;
        assert!((p[1] - 0.6).abs() < 1e-6);
        assert_eq!(mesh.vertices[0].uv, [0.0, 0.0]);
    }

    #[test]
    fn triangles_wind_clockwise_from_outside() {
        let mesh = sphere(16, 9);
        // Skip the degenerate pole fan; check a band at the equator.
        let quad = (4 * 16) as usize * 6;
        let tri = &mesh.indices[quad..quad + 3];
        let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(mesh.vertices[i as usize].position));
        let face_normal = (b - a).cross(c - a);
        let outward = (a + b + c) / 3.0;
        assert!(face_normal.dot(outward) < 0.0);
    }

    #[test]
    fn extent_scales_axes() {
        let desc = SphereDesc { extent: [2.0, 1.0, 2.0], segments: [8, 4] };
        let mesh = SphereMesh::generate(&desc).unwrap();
        assert!((mesh.vertices[0].position[1] - 0.5).abs() < 1e-6);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn too_few_segments_rejected() {
        let desc = SphereDesc { segments: [2, 8], ..Default::default() };
        assert!(SphereMesh::generate(&desc).is_err());
        let desc = SphereDesc { segments: [8, 1], ..Default::default() };
        assert!(SphereMesh::generate(&desc).is_err());
    }

    #[test]
    fn overflowing_counts_are_none() {
        let desc = SphereDesc { segments: [u32::MAX, 4], ..Default::default() };
        assert_eq!(desc.vertex_count(), None);
        assert_eq!(desc.index_count(), None);

        let desc = SphereDesc { segments: [70_000, 70_000], ..Default::default() };
        assert_eq!(desc.vertex_count(), None);
        assert!(SphereMesh::generate(&desc).is_err());
    }

    #[test]
    fn non_positive_extent_rejected() {
        let desc = SphereDesc { extent: [1.0, 0.0, 1.0], ..Default::default() };
        assert!(SphereMesh::generate(&desc).is_err());
    }

    #[test]
    fn vertex_is_32_bytes() {
        assert_eq!(std::mem::size_of::<SphereVertex>(), 32);
        assert_eq!(SphereVertex::FLOATS * 4, 32);
    }
}
