use anyhow::{Result, anyhow};

use crate::plan::{MESH_THREADS_PER_GROUP, OBJECT_THREADS_PER_GROUP};

/// Names of the five shader entry points both pipelines are built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoints {
    pub vertex: &'static str,
    pub fragment: &'static str,
    pub object: &'static str,
    pub mesh: &'static str,
    pub mesh_fragment: &'static str,
}

impl Default for EntryPoints {
    fn default() -> Self {
        Self {
            vertex: "vertex_main",
            fragment: "fragment_color",
            object: "object_main",
            mesh: "mesh_main",
            mesh_fragment: "fragment_mesh",
        }
    }
}

/// What a single entry point must look like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Expected<'a> {
    name: &'a str,
    stage: naga::ShaderStage,
    workgroup_size: Option<[u32; 3]>,
}

impl EntryPoints {
    fn expectations(&self) -> [Expected<'static>; 5] {
        [
            Expected {
                name: self.vertex,
                stage: naga::ShaderStage::Vertex,
                workgroup_size: None,
            },
            Expected {
                name: self.fragment,
                stage: naga::ShaderStage::Fragment,
                workgroup_size: None,
            },
            Expected {
                name: self.object,
                stage: naga::ShaderStage::Task,
                workgroup_size: Some([OBJECT_THREADS_PER_GROUP, 1, 1]),
            },
            Expected {
                name: self.mesh,
                stage: naga::ShaderStage::Mesh,
                workgroup_size: Some([MESH_THREADS_PER_GROUP, 1, 1]),
            },
            Expected {
                name: self.mesh_fragment,
                stage: naga::ShaderStage::Fragment,
                workgroup_size: None,
            },
        ]
    }

    /// Parses `source` as WGSL and checks every entry point exists with the
    /// expected stage and workgroup size.
    ///
    /// Runs on the CPU before any pipeline is created, so a broken shader is
    /// reported with a readable message instead of a device validation panic.
    pub fn verify(&self, source: &str) -> Result<()> {
        let module = naga::front::wgsl::parse_str(source)
            .map_err(|e| anyhow!("shader failed to parse:\n{}", e.emit_to_string(source)))?;
        check(&module, &self.expectations())
    }
}

fn check(module: &naga::Module, expected: &[Expected<'_>]) -> Result<()> {
    for want in expected {
        let ep = module
            .entry_points
            .iter()
            .find(|ep| ep.name == want.name)
            .ok_or_else(|| anyhow!("shader has no entry point `{}`", want.name))?;

        anyhow::ensure!(
            ep.stage == want.stage,
            "entry point `{}` is a {:?} stage, expected {:?}",
            want.name,
            ep.stage,
            want.stage
        );

        if let Some(size) = want.workgroup_size {
            anyhow::ensure!(
                ep.workgroup_size == size,
                "entry point `{}` declares workgroup size {:?}, expected {:?}",
                want.name,
                ep.workgroup_size,
                size
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STANDARD_ONLY: &str = r#"
        @vertex
        fn vertex_main(@location(0) p: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(p, 1.0);
        }

        @fragment
        fn fragment_color() -> @location(0) vec4<f32> {
            return vec4<f32>(0.0, 1.0, 0.0, 1.0);
        }

        @compute @workgroup_size(3)
        fn spread() {}
    "#;

    fn parse(src: &str) -> naga::Module {
        naga::front::wgsl::parse_str(src).unwrap()
    }

    fn expect(name: &'static str, stage: naga::ShaderStage) -> Expected<'static> {
        Expected {
            name,
            stage,
            workgroup_size: None,
        }
    }

    #[test]
    fn matching_entry_points_pass() {
        let module = parse(STANDARD_ONLY);
        let expected = [
            expect("vertex_main", naga::ShaderStage::Vertex),
            expect("fragment_color", naga::ShaderStage::Fragment),
        ];
        assert!(check(&module, &expected).is_ok());
    }

    #[test]
    fn missing_entry_point_is_reported_by_name() {
        let err = EntryPoints::default().verify(STANDARD_ONLY).unwrap_err();
        assert!(err.to_string().contains("object_main"), "{err}");
    }

    #[test]
    fn wrong_stage_is_rejected() {
        let module = parse(STANDARD_ONLY);
        let err = check(&module, &[expect("vertex_main", naga::ShaderStage::Fragment)]).unwrap_err();
        assert!(err.to_string().contains("vertex_main"));
    }

    #[test]
    fn workgroup_size_is_checked() {
        let module = parse(STANDARD_ONLY);
        let mut want = expect("spread", naga::ShaderStage::Compute);

        want.workgroup_size = Some([3, 1, 1]);
        assert!(check(&module, &[want]).is_ok());

        want.workgroup_size = Some([1, 1, 1]);
        assert!(check(&module, &[want]).is_err());
    }

    // ── shipped shader ────────────────────────────────────────────────────

    #[test]
    fn sphere_shader_has_every_entry_point() {
        EntryPoints::default().verify(crate::pipeline::SPHERE_SHADER).unwrap();
    }

    #[test]
    fn sphere_shader_validates() {
        let module = parse(crate::pipeline::SPHERE_SHADER);
        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator.validate(&module).unwrap();
    }

    #[test]
    fn parse_errors_surface_as_errors() {
        assert!(EntryPoints::default().verify("fn broken( {").is_err());
    }
}
