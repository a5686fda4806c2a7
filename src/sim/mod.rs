//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - One tick per frame, speeds in pixels per tick
//! - Seeded RNG only (tile palette, pickups, bonus kinds, particles)
//! - Stable iteration order (balls and tiles by index)
//! - No rendering or audio; the app layer reacts to drained [`GameEvent`]s

pub mod collision;
pub mod effects;
pub mod powerup;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use effects::{BonusText, Effect, EffectKind, Particle};
pub use powerup::{BonusKind, PowerUpTimers, activate_bonus, expire_bonus, expire_due};
pub use state::{Ball, GameEvent, GamePhase, GameState, Overlay, Paddle, Pickup, SessionSummary, Tile};
pub use tick::{KeyOutcome, TickInput, handle_key, run_collisions, tick};
