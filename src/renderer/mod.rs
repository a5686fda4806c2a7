//! Rendering module
//!
//! The game draws through a small immediate-mode [`Surface`]: filled and
//! outlined rectangles, filled circles and text. Rasterization and font
//! shaping belong to whatever implements it.

pub mod recording;
pub mod scene;

use glam::Vec2;

use crate::Rgb;
use crate::sim::Rect;

pub use recording::{DrawCommand, RecordingSurface};
pub use scene::{draw_game_over, draw_menu, draw_session};

/// Draw target for one frame
pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// Rectangle outline `width` pixels thick
    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    /// Text with its top-left corner at `pos`
    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb, size: f32);
    /// Flip the finished frame
    fn present(&mut self);
}
