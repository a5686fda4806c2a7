//! Menu and dialog navigation

pub mod dialog;
pub mod menu;

pub use dialog::{ConfirmDialog, DialogChoice};
pub use menu::{MainMenu, MenuAction, MenuOption};
