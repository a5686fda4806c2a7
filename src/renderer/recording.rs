//! Surface that records draw calls instead of rasterizing them

use glam::Vec2;

use super::Surface;
use crate::Rgb;
use crate::sim::Rect;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Rgb),
    FillRect { rect: Rect, color: Rgb },
    StrokeRect { rect: Rect, color: Rgb, width: f32 },
    FillCircle { center: Vec2, radius: f32, color: Rgb },
    Text { text: String, pos: Vec2, color: Rgb, size: f32 },
}

/// Keeps the commands of the frame being drawn.
///
/// `clear` starts a new frame, so memory stays bounded over long runs.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
    /// Number of `present` calls so far
    pub frames_presented: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every text string drawn this frame
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }

    /// Colour a text containing `needle` was drawn in
    pub fn text_color(&self, needle: &str) -> Option<Rgb> {
        self.commands.iter().find_map(|c| match c {
            DrawCommand::Text { text, color, .. } if text.contains(needle) => Some(*color),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = (Vec2, f32, Rgb)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillCircle { center, radius, color } => Some((*center, *radius, *color)),
            _ => None,
        })
    }

    pub fn filled_rects(&self) -> impl Iterator<Item = (Rect, Rgb)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Rgb) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgb, width: f32) {
        self.commands.push(DrawCommand::StrokeRect { rect, color, width });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.commands.push(DrawCommand::FillCircle { center, radius, color });
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: Rgb, size: f32) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            pos,
            color,
            size,
        });
    }

    fn present(&mut self) {
        self.frames_presented += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, RED, WHITE};

    #[test]
    fn clear_starts_a_new_frame() {
        let mut surface = RecordingSurface::new();
        surface.clear(BLACK);
        surface.fill_circle(Vec2::new(1.0, 2.0), 3.0, RED);
        surface.present();
        surface.clear(BLACK);
        surface.draw_text("Score: 0", Vec2::ZERO, WHITE, 36.0);
        surface.present();

        assert_eq!(surface.frames_presented, 2);
        assert_eq!(surface.commands.len(), 2);
        assert_eq!(surface.circles().count(), 0);
        assert!(surface.has_text("Score"));
        assert_eq!(surface.text_color("Score"), Some(WHITE));
    }
}
