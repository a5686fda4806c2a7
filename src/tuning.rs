//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can override it.
//! Defaults come from [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::colors::{BLUE, GREEN, RED, YELLOW};
use crate::consts::*;
use crate::error::ConfigError;
use crate::Rgb;

/// One entry of a level's tile palette
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileKind {
    pub color: Rgb,
    pub hits: u32,
}

/// A level: the palette tiles are drawn from and the ball's base velocity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub tiles: Vec<TileKind>,
    /// Base ball velocity (pixels per tick)
    pub ball_velocity: [f32; 2],
}

fn default_levels() -> Vec<Level> {
    vec![
        Level {
            tiles: vec![
                TileKind { color: RED, hits: 1 },
                TileKind { color: GREEN, hits: 2 },
                TileKind { color: BLUE, hits: 3 },
            ],
            ball_velocity: [5.0, -5.0],
        },
        Level {
            tiles: vec![
                TileKind { color: YELLOW, hits: 1 },
                TileKind { color: BLUE, hits: 2 },
                TileKind { color: RED, hits: 3 },
            ],
            ball_velocity: [6.0, -6.0],
        },
    ]
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub screen_width: f32,
    pub screen_height: f32,
    pub fps: u32,

    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,
    pub paddle_bottom_offset: f32,

    pub ball_radius: f32,
    pub ball_deflect_speed: f32,
    pub multi_ball_speed: f32,

    pub tile_rows: usize,
    pub tile_cols: usize,
    pub tile_padding: f32,
    pub tile_height: f32,
    pub tile_offset_y: f32,

    pub pickup_radius: f32,
    pub pickup_odds: u32,

    pub powerup_duration_ms: u64,
    pub bonus_text_ms: u64,

    pub starting_lives: u32,

    pub levels: Vec<Level>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            fps: FPS,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            ball_radius: BALL_RADIUS,
            ball_deflect_speed: BALL_DEFLECT_SPEED,
            multi_ball_speed: MULTI_BALL_SPEED,

            tile_rows: TILE_ROWS,
            tile_cols: TILE_COLS,
            tile_padding: TILE_PADDING,
            tile_height: TILE_HEIGHT,
            tile_offset_y: TILE_OFFSET_Y,

            pickup_radius: PICKUP_RADIUS,
            pickup_odds: PICKUP_ODDS,

            powerup_duration_ms: POWERUP_DURATION_MS,
            bonus_text_ms: BONUS_TEXT_MS,

            starting_lives: STARTING_LIVES,

            levels: default_levels(),
        }
    }
}

impl Tuning {
    /// Tile width so that `tile_cols` tiles and their padding span the screen
    pub fn tile_width(&self) -> f32 {
        let gaps = (self.tile_cols + 1) as f32 * self.tile_padding;
        ((self.screen_width - gaps) / self.tile_cols as f32).floor()
    }

    /// Level definition, clamped to the last level.
    ///
    /// Panics on an empty level table; [`Tuning::validate`] rejects those.
    pub fn level(&self, index: usize) -> &Level {
        let last = self.levels.len().saturating_sub(1);
        &self.levels[index.min(last)]
    }

    /// Milliseconds per simulation tick
    pub fn tick_ms(&self) -> u64 {
        1000 / u64::from(self.fps.max(1))
    }

    /// Check the invariants the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(ConfigError::invalid("screen", "dimensions must be positive"));
        }
        if self.fps == 0 {
            return Err(ConfigError::invalid("fps", "must be at least 1"));
        }
        if self.paddle_width <= 0.0 || self.paddle_width * PADDLE_EXTEND_FACTOR > self.screen_width
        {
            return Err(ConfigError::invalid(
                "paddle_width",
                "must be positive and fit the screen when extended",
            ));
        }
        if self.ball_radius <= 0.0 {
            return Err(ConfigError::invalid("ball_radius", "must be positive"));
        }
        if self.tile_rows == 0 {
            return Err(ConfigError::invalid("tile_rows", "must be at least 1"));
        }
        if self.tile_cols == 0 || self.tile_width() <= 0.0 {
            return Err(ConfigError::invalid("tile_cols", "tiles do not fit the screen width"));
        }
        if self.pickup_odds == 0 {
            return Err(ConfigError::invalid("pickup_odds", "must be at least 1"));
        }
        if self.levels.is_empty() {
            return Err(ConfigError::invalid("levels", "must not be empty"));
        }
        for level in &self.levels {
            if level.tiles.is_empty() {
                return Err(ConfigError::invalid("levels.tiles", "every level needs a tile kind"));
            }
            if level.tiles.iter().any(|t| t.hits == 0) {
                return Err(ConfigError::invalid("levels.tiles.hits", "must be at least 1"));
            }
        }
        Ok(())
    }

    /// Parse tuning from a JSON string (missing fields take defaults, not validated)
    fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load and validate tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tuning.validate()?;
        log::info!("Loaded tuning from {} ({} levels)", path.display(), tuning.levels.len());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tile_width_matches_grid() {
        let tuning = Tuning::default();
        // (800 - 9 * 5) / 8 = 94.375 -> 94
        assert_eq!(tuning.tile_width(), 94.0);
        assert!(tuning.validate().is_ok());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let tuning = Tuning::from_json(r#"{ "paddle_speed": 12.0 }"#).unwrap();
        assert_eq!(tuning.paddle_speed, 12.0);
        assert_eq!(tuning.levels.len(), 2);
        assert_eq!(tuning.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn level_index_clamps_to_last() {
        let tuning = Tuning::default();
        assert_eq!(tuning.level(7).ball_velocity, [6.0, -6.0]);
    }

    #[test]
    fn rejects_empty_levels() {
        let tuning = Tuning {
            levels: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid { field: "levels", .. })
        ));
    }

    #[test]
    fn rejects_zero_hit_tiles() {
        let mut tuning = Tuning::default();
        tuning.levels[0].tiles[0].hits = 0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn rejects_empty_grid() {
        let tuning = Tuning {
            tile_rows: 0,
            ..Default::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(ConfigError::Invalid { field: "tile_rows", .. })
        ));
    }

    #[test]
    fn load_validates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning.json");
        std::fs::write(&path, r#"{ "fps": 30, "pickup_odds": 4 }"#).unwrap();
        let tuning = Tuning::load(&path).unwrap();
        assert_eq!(tuning.tick_ms(), 33);
        assert_eq!(tuning.pickup_odds, 4);

        std::fs::write(&path, r#"{ "pickup_odds": 0 }"#).unwrap();
        assert!(matches!(
            Tuning::load(&path),
            Err(ConfigError::Invalid { field: "pickup_odds", .. })
        ));

        std::fs::write(&path, r#"{ "levels": [] }"#).unwrap();
        assert!(matches!(
            Tuning::load(&path),
            Err(ConfigError::Invalid { field: "levels", .. })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Tuning::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
