mod app;
mod view_model;

use meshlet_engine::device::GpuInit;
use meshlet_engine::logging::{init_logging, LoggingConfig};
use meshlet_engine::window::{Runtime, RuntimeConfig};
use meshlet_render::{PrimitiveMode, SceneConfig};

use app::Viewer;

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig {
        title: app::title_for(PrimitiveMode::default()),
        ..RuntimeConfig::default()
    };

    let viewer = Runtime::run(config, GpuInit::mesh_shading(), Viewer::new(SceneConfig::default()))?;

    match viewer.into_failure() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
