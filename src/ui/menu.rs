//! Main menu

use super::dialog::{ConfirmDialog, DialogChoice};
use crate::platform::Key;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    StartGame,
    ToggleSound,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 3] = [MenuOption::StartGame, MenuOption::ToggleSound, MenuOption::Quit];

    /// Menu text; the sound entry shows the current state
    pub fn label(&self, muted: bool) -> &'static str {
        match self {
            MenuOption::StartGame => "Start game",
            MenuOption::ToggleSound if muted => "Sound: off",
            MenuOption::ToggleSound => "Sound: on",
            MenuOption::Quit => "Quit",
        }
    }
}

/// What the app should do after a menu key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    StartGame,
    ToggleSound,
    Quit,
}

#[derive(Debug, Clone, Default)]
pub struct MainMenu {
    pub selected: usize,
    /// Quit confirmation, when open
    pub quit_dialog: Option<ConfirmDialog>,
}

impl MainMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected_option(&self) -> MenuOption {
        MenuOption::ALL[self.selected % MenuOption::ALL.len()]
    }

    pub fn handle_key(&mut self, key: Key) -> MenuAction {
        if let Some(dialog) = &mut self.quit_dialog {
            return match dialog.handle_key(key) {
                DialogChoice::Pending => MenuAction::None,
                DialogChoice::Yes => MenuAction::Quit,
                DialogChoice::No => {
                    self.quit_dialog = None;
                    MenuAction::None
                }
            };
        }

        let n = MenuOption::ALL.len();
        match key {
            Key::Up => {
                self.selected = (self.selected + n - 1) % n;
                MenuAction::None
            }
            Key::Down => {
                self.selected = (self.selected + 1) % n;
                MenuAction::None
            }
            Key::Return => match self.selected_option() {
                MenuOption::StartGame => MenuAction::StartGame,
                MenuOption::ToggleSound => MenuAction::ToggleSound,
                MenuOption::Quit => {
                    self.quit_dialog = Some(ConfirmDialog::new());
                    MenuAction::None
                }
            },
            Key::Escape => {
                self.quit_dialog = Some(ConfirmDialog::new());
                MenuAction::None
            }
            _ => MenuAction::None,
        }
    }
}
