use std::collections::HashSet;

use super::types::Key;

/// Keys that went down since the last frame.
///
/// Auto-repeat does not count: a key reappears only after it was released.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys_pressed: HashSet<Key>,
}

impl InputFrame {
    pub fn clear(&mut self) {
        self.keys_pressed.clear();
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }
}
