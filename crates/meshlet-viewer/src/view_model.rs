use meshlet_engine::input::{InputFrame, Key};
use meshlet_render::{PrimitiveMode, Renderer};

/// Anything that can be told which primitive mode to draw with.
pub trait ModeTarget {
    fn set_primitive_mode(&mut self, mode: PrimitiveMode);
}

impl ModeTarget for Renderer {
    fn set_primitive_mode(&mut self, mode: PrimitiveMode) {
        Renderer::set_primitive_mode(self, mode);
    }
}

/// What a frame's key presses asked for.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyAction {
    None,
    ModeChanged(PrimitiveMode),
    Quit,
}

/// Owns the selected primitive mode and pushes every change to the renderer.
///
/// The renderer is attached late (it needs a device), so the mode may be set
/// before one exists; it is forwarded on attach.
pub struct ViewModel<R> {
    mode: PrimitiveMode,
    target: Option<R>,
}

impl<R> Default for ViewModel<R> {
    fn default() -> Self {
        Self {
            mode: PrimitiveMode::default(),
            target: None,
        }
    }
}

impl<R: ModeTarget> ViewModel<R> {
    pub fn mode(&self) -> PrimitiveMode {
        self.mode
    }

    pub fn renderer(&self) -> Option<&R> {
        self.target.as_ref()
    }

    pub fn renderer_mut(&mut self) -> Option<&mut R> {
        self.target.as_mut()
    }

    /// Attaches the renderer and brings it up to date with the current mode.
    pub fn attach(&mut self, mut target: R) {
        target.set_primitive_mode(self.mode);
        self.target = Some(target);
    }

    /// Stores `mode` and forwards it. Returns whether the mode changed.
    pub fn set_mode(&mut self, mode: PrimitiveMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        if let Some(target) = self.target.as_mut() {
            target.set_primitive_mode(mode);
        }
        if changed {
            log::info!("primitive mode: {mode}");
        }
        changed
    }

    /// Applies this frame's key presses: L selects lines, T triangles,
    /// Space toggles, Escape quits.
    pub fn handle_keys(&mut self, frame: &InputFrame) -> KeyAction {
        if frame.key_pressed(Key::Escape) {
            return KeyAction::Quit;
        }

        let requested = if frame.key_pressed(Key::L) {
            Some(PrimitiveMode::Line)
        } else if frame.key_pressed(Key::T) {
            Some(PrimitiveMode::Triangle)
        } else if frame.key_pressed(Key::Space) {
            Some(self.mode.toggled())
        } else {
            None
        };

        match requested {
            Some(mode) if self.set_mode(mode) => KeyAction::ModeChanged(mode),
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        received: Vec<PrimitiveMode>,
    }

    impl ModeTarget for Recorder {
        fn set_primitive_mode(&mut self, mode: PrimitiveMode) {
            self.received.push(mode);
        }
    }

    fn pressed(keys: &[Key]) -> InputFrame {
        let mut frame = InputFrame::default();
        frame.keys_pressed.extend(keys.iter().copied());
        frame
    }

    // ── mode forwarding ─────────────────────────────────────────────────────

    #[test]
    fn starts_in_triangle_mode() {
        let vm: ViewModel<Recorder> = ViewModel::default();
        assert_eq!(vm.mode(), PrimitiveMode::Triangle);
        assert!(vm.renderer().is_none());
    }

    #[test]
    fn attach_pushes_current_mode() {
        let mut vm = ViewModel::default();
        vm.set_mode(PrimitiveMode::Line);
        vm.attach(Recorder::default());
        assert_eq!(vm.renderer().map(|r| r.received.clone()), Some(vec![PrimitiveMode::Line]));
    }

    #[test]
    fn every_set_is_forwarded() {
        let mut vm = ViewModel::default();
        vm.attach(Recorder::default());

        assert!(vm.set_mode(PrimitiveMode::Line));
        assert!(!vm.set_mode(PrimitiveMode::Line));
        assert!(vm.set_mode(PrimitiveMode::Triangle));

        let received = vm.renderer().map(|r| r.received.clone()).unwrap_or_default();
        assert_eq!(
            received,
            vec![
                PrimitiveMode::Triangle,
                PrimitiveMode::Line,
                PrimitiveMode::Line,
                PrimitiveMode::Triangle,
            ]
        );
    }

    // ── keys ────────────────────────────────────────────────────────────────

    #[test]
    fn keys_select_modes() {
        let mut vm: ViewModel<Recorder> = ViewModel::default();

        assert_eq!(vm.handle_keys(&pressed(&[Key::L])), KeyAction::ModeChanged(PrimitiveMode::Line));
        assert_eq!(vm.handle_keys(&pressed(&[Key::L])), KeyAction::None);
        assert_eq!(
            vm.handle_keys(&pressed(&[Key::T])),
            KeyAction::ModeChanged(PrimitiveMode::Triangle)
        );
    }

    #[test]
    fn space_toggles() {
        let mut vm: ViewModel<Recorder> = ViewModel::default();
        vm.handle_keys(&pressed(&[Key::Space]));
        assert_eq!(vm.mode(), PrimitiveMode::Line);
        vm.handle_keys(&pressed(&[Key::Space]));
        assert_eq!(vm.mode(), PrimitiveMode::Triangle);
    }

    #[test]
    fn escape_wins_over_mode_keys() {
        let mut vm: ViewModel<Recorder> = ViewModel::default();
        assert_eq!(vm.handle_keys(&pressed(&[Key::L, Key::Escape])), KeyAction::Quit);
        assert_eq!(vm.mode(), PrimitiveMode::Triangle);
    }

    #[test]
    fn no_keys_no_action() {
        let mut vm: ViewModel<Recorder> = ViewModel::default();
        assert_eq!(vm.handle_keys(&InputFrame::default()), KeyAction::None);
    }
}
