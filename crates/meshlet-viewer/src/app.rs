use std::time::Duration;

use winit::window::WindowId;

use meshlet_engine::core::{App, AppControl, FrameCtx};
use meshlet_engine::time::FrameRate;
use meshlet_render::{PrimitiveMode, Renderer, SceneConfig};

use crate::view_model::{KeyAction, ViewModel};

pub const TITLE: &str = "meshlet";

/// Window title for `mode`.
pub fn title_for(mode: PrimitiveMode) -> String {
    format!("{TITLE} · {mode} (L lines, T triangles, Space toggle)")
}

/// The sphere viewer: one window, one renderer, keyboard mode switching.
pub struct Viewer {
    scene: SceneConfig,
    model: ViewModel<Renderer>,
    fps: FrameRate,
    failure: Option<anyhow::Error>,
}

impl Viewer {
    pub fn new(scene: SceneConfig) -> Self {
        Self {
            scene,
            model: ViewModel::default(),
            fps: FrameRate::new(Duration::from_secs(1)),
            failure: None,
        }
    }

    /// Error that stopped the viewer, if any.
    pub fn into_failure(self) -> Option<anyhow::Error> {
        self.failure
    }

    fn ensure_renderer(&mut self, ctx: &FrameCtx<'_, '_>) -> bool {
        if self.model.renderer().is_some() {
            return true;
        }

        match Renderer::new(&ctx.render_ctx(), self.scene.clone()) {
            Ok(renderer) => {
                self.model.attach(renderer);
                ctx.window.set_title(&title_for(self.model.mode()));
                true
            }
            Err(e) => {
                log::error!("renderer setup failed: {e:#}");
                self.failure = Some(e);
                false
            }
        }
    }
}

impl App for Viewer {
    fn on_resize(&mut self, _window_id: WindowId, width: u32, height: u32) {
        if let Some(renderer) = self.model.renderer_mut() {
            renderer.resize(width, height);
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.ensure_renderer(ctx) {
            return AppControl::Exit;
        }

        match self.model.handle_keys(ctx.input_frame) {
            KeyAction::Quit => return AppControl::Exit,
            KeyAction::ModeChanged(mode) => ctx.window.set_title(&title_for(mode)),
            KeyAction::None => {}
        }

        if let Some(fps) = self.fps.record(&ctx.time) {
            log::debug!("{fps:.1} fps");
        }

        let Some(renderer) = self.model.renderer() else {
            return AppControl::Continue;
        };
        ctx.render(|rctx, target| renderer.draw_frame(rctx, target))
    }
}
