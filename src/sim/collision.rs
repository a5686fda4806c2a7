//! Collision detection primitives
//!
//! Ball/wall, ball/paddle, ball/tile and ball/pickup tests. Tiles are tested
//! against the ball's bounding square, not the circle, and there is no swept
//! test: a ball fast enough to cross a tile in one tick passes through it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Paddle};

/// Axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Strict overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

/// Reflect off the left, right and top walls. Returns true on contact.
///
/// The bottom edge is not a wall; see [`hits_floor`].
pub fn reflect_off_walls(ball: &mut Ball, screen_width: f32) -> bool {
    let mut hit = false;
    if ball.pos.x <= ball.radius || ball.pos.x >= screen_width - ball.radius {
        ball.vel.x = -ball.vel.x;
        hit = true;
    }
    if ball.pos.y <= ball.radius {
        ball.vel.y = -ball.vel.y;
        hit = true;
    }
    hit
}

/// Ball is over the paddle's span and has reached its top edge
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    let left = paddle.pos.x;
    let right = left + paddle.width();
    (left..=right).contains(&ball.pos.x) && ball.pos.y >= paddle.pos.y - ball.radius
}

/// Outgoing velocity after a paddle hit.
///
/// Horizontal speed depends on where the ball struck: dead centre sends it
/// straight up, the edges send it off at `±deflect_speed`. Vertical motion
/// is always upward with the incoming vertical speed.
pub fn paddle_deflection(ball_x: f32, paddle: &Paddle, incoming: Vec2, deflect_speed: f32) -> Vec2 {
    let half = paddle.width() / 2.0;
    let relative = (paddle.pos.x + half) - ball_x;
    let normalized = relative / half;
    Vec2::new(-normalized * deflect_speed, -incoming.y.abs())
}

/// Ball's bounding square overlaps the rectangle
pub fn ball_hits_rect(ball: &Ball, rect: &Rect) -> bool {
    ball.bounds().intersects(rect)
}

/// Two circles touch or overlap
pub fn circles_touch(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    a.distance(b) <= radius_a + radius_b
}

/// Ball has reached the bottom edge
pub fn hits_floor(ball: &Ball, screen_height: f32) -> bool {
    ball.pos.y >= screen_height - ball.radius
}
