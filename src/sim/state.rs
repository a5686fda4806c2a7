//! Game state and core simulation types
//!
//! One `GameState` owns everything mutable about a play-through.

use glam::Vec2;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::effects::{BonusText, Effect};
use super::powerup::{BonusKind, PowerUpTimers};
use crate::colors::{RAINBOW, WHITE};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::ui::ConfirmDialog;
use crate::Rgb;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Playing,
    /// Out of lives; waits for the restart key
    GameOver,
}

/// Modal layer over a running session. Both variants freeze the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Overlay {
    None,
    Paused,
    ExitConfirm(ConfirmDialog),
}

/// Things that happened during a tick, drained by the app layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PaddleHit,
    TileHit { index: usize },
    TileDestroyed { index: usize },
    PickupSpawned { pos: Vec2 },
    BonusActivated(BonusKind),
    BonusExpired(BonusKind),
    LifeLost { lives: u32 },
    GameOver { score: u64 },
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Top-left corner
    pub pos: Vec2,
    pub base_width: f32,
    pub height: f32,
    /// Pixels moved per input sample
    pub speed: f32,
    pub extended: bool,
    pub visible: bool,
    /// Bounce animation offset (pixels above rest position)
    pub jump: f32,
    pub color_index: usize,
    /// Clock time of the last colour change
    pub color_changed_at: u64,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        let mut paddle = Self {
            pos: Vec2::ZERO,
            base_width: tuning.paddle_width,
            height: tuning.paddle_height,
            speed: tuning.paddle_speed,
            extended: false,
            visible: true,
            jump: 0.0,
            color_index: 0,
            color_changed_at: 0,
        };
        paddle.reposition(tuning);
        paddle
    }

    /// Current width (base, or base × 1.5 while extended)
    pub fn width(&self) -> f32 {
        if self.extended {
            self.base_width * PADDLE_EXTEND_FACTOR
        } else {
            self.base_width
        }
    }

    pub fn center_x(&self) -> f32 {
        self.pos.x + self.width() / 2.0
    }

    /// Centre horizontally at the bottom of the screen
    pub fn reposition(&mut self, tuning: &Tuning) {
        self.pos = Vec2::new(
            (tuning.screen_width / 2.0 - self.width() / 2.0).floor(),
            tuning.screen_height - tuning.paddle_bottom_offset,
        );
    }

    pub fn move_left(&mut self, screen_width: f32) {
        self.pos.x -= self.speed;
        self.clamp(screen_width);
    }

    pub fn move_right(&mut self, screen_width: f32) {
        self.pos.x += self.speed;
        self.clamp(screen_width);
    }

    /// Keep the paddle within `[0, screen_width - width]`
    pub fn clamp(&mut self, screen_width: f32) {
        self.pos.x = self.pos.x.clamp(0.0, (screen_width - self.width()).max(0.0));
    }

    /// Start the bounce animation
    pub fn bounce(&mut self) {
        self.jump = PADDLE_JUMP;
    }

    /// Per-tick animation: decay the jump, cycle colour while extended
    pub fn animate(&mut self, now_ms: u64) {
        self.jump = (self.jump - 1.0).max(0.0);
        if self.extended && now_ms.saturating_sub(self.color_changed_at) > PADDLE_COLOR_PERIOD_MS {
            self.color_index = (self.color_index + 1) % RAINBOW.len();
            self.color_changed_at = now_ms;
        }
    }

    pub fn color(&self) -> Rgb {
        if self.extended {
            RAINBOW[self.color_index]
        } else {
            WHITE
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width(), self.height)
    }
}

/// A ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Pixels per tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Move one tick. Reflection is the collision pass's job.
    pub fn advance(&mut self) {
        self.pos += self.vel;
    }

    /// Axis-aligned bounding square
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.pos.x - self.radius,
            self.pos.y - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

/// A destructible tile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    pub rect: Rect,
    pub color: Rgb,
    pub hits: u32,
    pub active: bool,
}

impl Tile {
    pub fn new(rect: Rect, color: Rgb, hits: u32) -> Self {
        Self {
            rect,
            color,
            hits,
            active: true,
        }
    }

    /// Take one hit. Returns true when this hit used up the last one;
    /// the caller deactivates the tile and spawns the explosion.
    pub fn register_hit(&mut self) -> bool {
        self.hits = self.hits.saturating_sub(1);
        self.hits == 0
    }
}

/// The collectible bonus (single slot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub radius: f32,
    pub active: bool,
    /// Blink animation frame
    pub frame: u32,
}

impl Pickup {
    pub fn new(radius: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            radius,
            active: false,
            frame: 0,
        }
    }

    pub fn animate(&mut self) {
        if self.active {
            self.frame = (self.frame + 1) % PICKUP_BLINK_FRAMES;
        }
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub seed: u64,
    pub rng: Pcg32,
    pub score: u64,
    pub lives: u32,
    /// Index into `tuning.levels`
    pub level: usize,
    pub phase: GamePhase,
    pub overlay: Overlay,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// `balls[0]` is the primary ball that survives life loss
    pub balls: Vec<Ball>,
    pub tiles: Vec<Tile>,
    pub pickup: Pickup,
    pub timers: PowerUpTimers,
    pub explosions: Vec<Effect>,
    pub bonus_effects: Vec<Effect>,
    pub bonus_texts: Vec<BonusText>,
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a fresh session at level 0.
    ///
    /// Tuning that fails validation is replaced by the defaults.
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        let tuning = match tuning.validate() {
            Ok(()) => tuning,
            Err(err) => {
                log::warn!("Rejected tuning ({}), using defaults", err);
                Tuning::default()
            }
        };
        let paddle = Paddle::new(&tuning);
        let pickup = Pickup::new(tuning.pickup_radius);
        let mut state = Self {
            lives: tuning.starting_lives,
            tuning,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            score: 0,
            level: 0,
            phase: GamePhase::Playing,
            overlay: Overlay::None,
            time_ticks: 0,
            paddle,
            balls: Vec::new(),
            tiles: Vec::new(),
            pickup,
            timers: PowerUpTimers::default(),
            explosions: Vec::new(),
            bonus_effects: Vec::new(),
            bonus_texts: Vec::new(),
            events: Vec::new(),
        };
        state.reset();
        state
    }

    /// Start over: score, lives, level, tiles, balls, paddle, power-ups, effects
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.tuning.starting_lives;
        self.level = 0;
        self.phase = GamePhase::Playing;
        self.overlay = Overlay::None;
        self.timers = PowerUpTimers::default();
        self.paddle = Paddle::new(&self.tuning);
        self.pickup.active = false;
        self.explosions.clear();
        self.bonus_effects.clear();
        self.bonus_texts.clear();
        self.events.clear();
        self.tiles = self.create_tiles();
        self.balls.clear();
        self.balls.push(self.serve_ball());
        log::info!("Session reset (seed {})", self.seed);
    }

    /// Base ball velocity of the current level
    pub fn base_velocity(&self) -> Vec2 {
        Vec2::from_array(self.tuning.level(self.level).ball_velocity)
    }

    /// A ball at screen centre moving at the level's base velocity
    pub fn serve_ball(&self) -> Ball {
        Ball::new(self.screen_center(), self.base_velocity(), self.tuning.ball_radius)
    }

    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(
            (self.tuning.screen_width / 2.0).floor(),
            (self.tuning.screen_height / 2.0).floor(),
        )
    }

    /// Lay out the tile grid, picking each tile from the level's palette
    pub fn create_tiles(&mut self) -> Vec<Tile> {
        let tuning = &self.tuning;
        let palette = &tuning.level(self.level).tiles;
        let width = tuning.tile_width();
        let mut tiles = Vec::with_capacity(tuning.tile_rows * tuning.tile_cols);
        for row in 0..tuning.tile_rows {
            for col in 0..tuning.tile_cols {
                let Some(kind) = palette.choose(&mut self.rng) else {
                    continue;
                };
                let x = col as f32 * (width + tuning.tile_padding) + tuning.tile_padding;
                let y = row as f32 * (tuning.tile_height + tuning.tile_padding) + tuning.tile_offset_y;
                tiles.push(Tile::new(
                    Rect::new(x, y, width, tuning.tile_height),
                    kind.color,
                    kind.hits,
                ));
            }
        }
        tiles
    }

    /// Random pickup position in the upper-middle play area
    pub fn random_pickup_pos(&mut self) -> Vec2 {
        let max_x = (self.tuning.screen_width - PICKUP_MARGIN).max(PICKUP_MARGIN);
        let max_y = (self.tuning.screen_height - PICKUP_BOTTOM_CLEARANCE).max(PICKUP_MARGIN);
        Vec2::new(
            self.rng.random_range(PICKUP_MARGIN..=max_x).floor(),
            self.rng.random_range(PICKUP_MARGIN..=max_y).floor(),
        )
    }

    /// True while the simulation should not advance
    pub fn is_frozen(&self) -> bool {
        self.phase == GamePhase::GameOver || self.overlay != Overlay::None
    }

    pub fn active_tiles(&self) -> usize {
        self.tiles.iter().filter(|t| t.active).count()
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            score: self.score,
            lives: self.lives,
            level: self.level,
            phase: self.phase,
            ticks: self.time_ticks,
            balls: self.balls.len(),
            tiles_remaining: self.active_tiles(),
        }
    }
}

/// Compact snapshot for logs and the headless runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub score: u64,
    pub lives: u32,
    pub level: usize,
    pub phase: GamePhase,
    pub ticks: u64,
    pub balls: usize,
    pub tiles_remaining: usize,
}
