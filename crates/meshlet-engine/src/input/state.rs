use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Held keys and focus for the window.
///
/// Press transitions are written into an [`InputFrame`].
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(focused) => {
                self.focused = focused;
                if !focused {
                    // Releases are not delivered while unfocused.
                    self.keys_down.clear();
                }
            }

            InputEvent::Key { key, state: KeyState::Pressed } => {
                if self.keys_down.insert(key) {
                    frame.keys_pressed.insert(key);
                }
            }

            InputEvent::Key { key, state: KeyState::Released } => {
                self.keys_down.remove(&key);
            }
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state }
    }

    #[test]
    fn held_key_reports_one_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::L, KeyState::Pressed));
        // Auto-repeat delivers another press while held.
        state.apply_event(&mut frame, key(Key::L, KeyState::Pressed));

        assert!(state.key_down(Key::L));
        assert!(frame.key_pressed(Key::L));
        assert_eq!(frame.keys_pressed.len(), 1);
    }

    #[test]
    fn repeat_across_frames_is_not_a_new_press() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        frame.clear();
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(!frame.key_pressed(Key::Space));

        state.apply_event(&mut frame, key(Key::Space, KeyState::Released));
        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        assert!(frame.key_pressed(Key::Space));
    }

    #[test]
    fn release_of_unheld_key_is_ignored() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::T, KeyState::Released));
        assert!(!state.key_down(Key::T));
        assert!(frame.keys_pressed.is_empty());
    }

    #[test]
    fn focus_loss_clears_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Space, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Focused(false));

        assert!(!state.key_down(Key::Space));
        assert!(!state.focused);
    }

    #[test]
    fn clear_keeps_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::Escape, KeyState::Pressed));
        frame.clear();

        assert!(!frame.key_pressed(Key::Escape));
        assert!(state.key_down(Key::Escape));
    }
}
