//! Yes/No confirmation prompt

use serde::{Deserialize, Serialize};

use crate::platform::Key;

/// Result of feeding a key to a dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogChoice {
    /// Still open
    Pending,
    Yes,
    No,
}

/// Two-option prompt. Index 0 is "Yes", index 1 is "No".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmDialog {
    pub selected: usize,
}

impl ConfirmDialog {
    pub const OPTIONS: [&'static str; 2] = ["Yes", "No"];

    pub fn new() -> Self {
        Self { selected: 0 }
    }

    /// Left/Right cycle the selection, Return confirms; other keys are ignored
    pub fn handle_key(&mut self, key: Key) -> DialogChoice {
        let n = Self::OPTIONS.len();
        match key {
            Key::Left => {
                self.selected = (self.selected + n - 1) % n;
                DialogChoice::Pending
            }
            Key::Right => {
                self.selected = (self.selected + 1) % n;
                DialogChoice::Pending
            }
            Key::Return if self.selected == 0 => DialogChoice::Yes,
            Key::Return => DialogChoice::No,
            _ => DialogChoice::Pending,
        }
    }
}
