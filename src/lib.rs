//! Batty - a single-screen brick breaker
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, power-ups, particle effects)
//! - `app`: Top-level menu / game / game-over state machine
//! - `renderer`: Render surface abstraction and the draw pass
//! - `platform`: Clock, frame pacing and keyboard input
//! - `audio`: Named sound cues routed to a playback backend
//! - `tuning`: Data-driven game balance
//! - `settings`: Player preferences

pub mod app;
pub mod audio;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use app::{App, FrameOutcome};
pub use error::ConfigError;
pub use settings::Settings;
pub use tuning::Tuning;

/// 8-bit RGB colour
pub type Rgb = [u8; 3];

/// Named colours shared by tiles, HUD and overlays
pub mod colors {
    use super::Rgb;

    pub const BLACK: Rgb = [0, 0, 0];
    pub const WHITE: Rgb = [255, 255, 255];
    pub const GREY: Rgb = [128, 128, 128];
    pub const RED: Rgb = [255, 0, 0];
    pub const GREEN: Rgb = [0, 255, 0];
    pub const BLUE: Rgb = [0, 0, 255];
    pub const YELLOW: Rgb = [255, 255, 0];

    /// Paddle colour cycle while extended
    pub const RAINBOW: [Rgb; 7] = [
        [255, 0, 0],
        [255, 165, 0],
        [255, 255, 0],
        [0, 255, 0],
        [0, 0, 255],
        [75, 0, 130],
        [238, 130, 238],
    ];
}

/// Game configuration constants (defaults for `Tuning`)
pub mod consts {
    /// Target frame rate. All speeds below are pixels per tick at this rate.
    pub const FPS: u32 = 60;
    /// Maximum ticks the frame pacer will run for one wall-clock frame
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Distance from the paddle's top edge to the bottom of the screen
    pub const PADDLE_BOTTOM_OFFSET: f32 = 50.0;
    /// Width multiplier while the extend power-up is active
    pub const PADDLE_EXTEND_FACTOR: f32 = 1.5;
    /// Jump offset applied on a paddle hit (decays 1px per tick)
    pub const PADDLE_JUMP: f32 = 10.0;
    /// Colour cycle period while extended
    pub const PADDLE_COLOR_PERIOD_MS: u64 = 100;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Horizontal speed scale for paddle deflection
    pub const BALL_DEFLECT_SPEED: f32 = 5.0;
    /// Component speed of balls spawned by multi-ball
    pub const MULTI_BALL_SPEED: f32 = 5.0;

    /// Tile grid
    pub const TILE_ROWS: usize = 6;
    pub const TILE_COLS: usize = 8;
    pub const TILE_PADDING: f32 = 5.0;
    pub const TILE_HEIGHT: f32 = 20.0;
    pub const TILE_OFFSET_Y: f32 = 50.0;

    /// Pickup defaults
    pub const PICKUP_RADIUS: f32 = 15.0;
    /// One in N successful paddle hits spawns a pickup
    pub const PICKUP_ODDS: u32 = 10;
    pub const PICKUP_MARGIN: f32 = 50.0;
    /// Pickups never spawn lower than this distance above the bottom edge
    pub const PICKUP_BOTTOM_CLEARANCE: f32 = 200.0;
    pub const PICKUP_BLINK_FRAMES: u32 = 10;

    /// Power-up timing
    pub const POWERUP_DURATION_MS: u64 = 30_000;
    pub const BONUS_TEXT_MS: u64 = 2_000;

    /// Scoring
    pub const SCORE_PADDLE_HIT: u64 = 1;
    pub const SCORE_TILE_HIT: u64 = 10;
    pub const STARTING_LIVES: u32 = 3;

    /// Particle effects
    pub const BURST_PARTICLES: usize = 20;
    pub const BURST_LIFETIME: i32 = 30;
    pub const DISSOLVE_PARTICLES_PER_CHAR: usize = 10;
    pub const DISSOLVE_LIFETIME: i32 = 60;
    pub const DISSOLVE_SPREAD: f32 = 50.0;
    pub const PARTICLE_MAX_SPEED: f32 = 2.0;
    pub const PARTICLE_RADIUS: f32 = 3.0;

    /// Text sizes
    pub const FONT_SIZE: f32 = 36.0;
    pub const BONUS_FONT_SIZE: f32 = 30.0;
    pub const TILE_FONT_SIZE: f32 = 20.0;
    pub const PAUSE_FONT_SIZE: f32 = 50.0;

    /// Exit confirmation box
    pub const DIALOG_WIDTH: f32 = 400.0;
    pub const DIALOG_HEIGHT: f32 = 200.0;
}
