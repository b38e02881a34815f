use std::fmt;

/// How the sphere surface is rasterized.
///
/// `Triangle` draws filled triangles; `Line` draws the index buffer as a line
/// list in the standard pass and wireframe triangles in the mesh pass.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum PrimitiveMode {
    Line,
    #[default]
    Triangle,
}

impl PrimitiveMode {
    /// Topology of the first indexed draw of the standard pass.
    pub fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Self::Line => wgpu::PrimitiveTopology::LineList,
            Self::Triangle => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    /// Fill mode of the mesh pass.
    pub fn polygon_mode(self) -> wgpu::PolygonMode {
        match self {
            Self::Line => wgpu::PolygonMode::Line,
            Self::Triangle => wgpu::PolygonMode::Fill,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Line => Self::Triangle,
            Self::Triangle => Self::Line,
        }
    }
}

impl fmt::Display for PrimitiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Line => "line",
            Self::Triangle => "triangle",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_triangle() {
        assert_eq!(PrimitiveMode::default(), PrimitiveMode::Triangle);
        assert_eq!(PrimitiveMode::default().polygon_mode(), wgpu::PolygonMode::Fill);
    }

    #[test]
    fn line_maps_to_wireframe() {
        assert_eq!(PrimitiveMode::Line.topology(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(PrimitiveMode::Line.polygon_mode(), wgpu::PolygonMode::Line);
    }

    #[test]
    fn triangle_maps_to_solid_fill() {
        assert_eq!(PrimitiveMode::Triangle.topology(), wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(PrimitiveMode::Triangle.polygon_mode(), wgpu::PolygonMode::Fill);
    }

    #[test]
    fn toggle_round_trips() {
        assert_eq!(PrimitiveMode::Line.toggled(), PrimitiveMode::Triangle);
        assert_eq!(PrimitiveMode::Triangle.toggled().toggled(), PrimitiveMode::Triangle);
    }

    #[test]
    fn display_names() {
        assert_eq!(PrimitiveMode::Line.to_string(), "line");
        assert_eq!(PrimitiveMode::Triangle.to_string(), "triangle");
    }
}
