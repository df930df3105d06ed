//! Every tunable of the game, fixed at startup and passed by reference.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{GridCoord, Rect, map::GridModel};

/// Largest accepted field dimension, in world units. Keeps every sum of a
/// position, a size and a velocity well inside `i32`.
pub const MAX_FIELD_EXTENT: i32 = 1 << 20;

/// Represents errors raised while loading or validating a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Game configuration. World distances are in world units, times in milliseconds.
///
/// Deserializing from a partial document keeps the default for every
/// missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub cell_size: i32,
    pub ship_width: i32,
    pub ship_height: i32,
    /// Player displacement per tick along each pressed axis.
    pub player_velocity: i32,
    /// Projectile displacement per tick, always to the right.
    pub projectile_velocity: i32,
    pub projectile_width: i32,
    pub projectile_height: i32,
    pub ai_move_interval_ms: u64,
    pub max_projectiles: usize,
    pub chaser_health: u32,
    pub tick_rate: u32,
    pub end_message_ms: u64,
    pub player_spawn: (i32, i32),
    pub chaser_spawn: (i32, i32),
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            field_width: 900,
            field_height: 500,
            cell_size: 50,
            ship_width: 40,
            ship_height: 40,
            player_velocity: 5,
            projectile_velocity: 7,
            projectile_width: 10,
            projectile_height: 5,
            ai_move_interval_ms: 500,
            max_projectiles: 5,
            chaser_health: 5,
            tick_rate: 60,
            end_message_ms: 3000,
            player_spawn: (100, 300),
            chaser_spawn: (700, 300),
        }
    }
}

impl GameConfig {
    /// Parses a TOML document and validates the result.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| -> Result<(), ConfigError> { Err(ConfigError::Invalid(msg)) };

        if self.cell_size <= 0 {
            return invalid(format!("cell_size must be positive, got {}", self.cell_size));
        }
        if self.tick_rate == 0 {
            return invalid("tick_rate must be positive".to_string());
        }
        if self.chaser_health == 0 {
            return invalid("chaser_health must be positive".to_string());
        }
        if self.field_width < self.cell_size || self.field_height < self.cell_size {
            return invalid(format!(
                "field {}x{} is smaller than one {} unit cell",
                self.field_width, self.field_height, self.cell_size
            ));
        }
        if self.field_width > MAX_FIELD_EXTENT || self.field_height > MAX_FIELD_EXTENT {
            return invalid(format!(
                "field {}x{} exceeds the {MAX_FIELD_EXTENT} unit limit",
                self.field_width, self.field_height
            ));
        }
        let shortest_side = self.field_width.min(self.field_height);
        for (name, value, limit) in [
            ("ship_width", self.ship_width, self.field_width),
            ("ship_height", self.ship_height, self.field_height),
            ("player_velocity", self.player_velocity, shortest_side),
            ("projectile_velocity", self.projectile_velocity, self.field_width),
            ("projectile_width", self.projectile_width, self.field_width),
            ("projectile_height", self.projectile_height, self.field_height),
        ] {
            if value <= 0 {
                return invalid(format!("{name} must be positive, got {value}"));
            }
            if value > limit {
                return invalid(format!("{name} {value} is larger than the field ({limit})"));
            }
        }

        // The chaser snaps to cell corners, so it must fit in the last cell.
        let grid = self.grid();
        let (last_x, last_y) = grid.to_world(GridCoord::new(grid.cols() - 1, grid.rows() - 1));
        if i64::from(last_x) + i64::from(self.ship_width) > i64::from(self.field_width)
            || i64::from(last_y) + i64::from(self.ship_height) > i64::from(self.field_height)
        {
            return invalid(format!(
                "a {}x{} ship does not fit in the last grid cell of a {}x{} field",
                self.ship_width, self.ship_height, self.field_width, self.field_height
            ));
        }

        for (name, rect) in [
            ("player_spawn", self.player_rect()),
            ("chaser_spawn", self.chaser_rect()),
        ] {
            if !rect.within(self.field_width, self.field_height) {
                return invalid(format!("{name} {:?} is outside the field", (rect.x, rect.y)));
            }
        }
        Ok(())
    }

    pub fn grid(&self) -> GridModel {
        GridModel::new(self.field_width, self.field_height, self.cell_size)
    }

    /// Wall-clock period of one tick at the configured rate.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.tick_rate.max(1)
    }

    pub fn ai_move_interval(&self) -> Duration {
        Duration::from_millis(self.ai_move_interval_ms)
    }

    pub fn end_message_duration(&self) -> Duration {
        Duration::from_millis(self.end_message_ms)
    }

    /// The playfield as a rectangle anchored at the origin.
    pub fn field_bounds(&self) -> Rect {
        Rect::new(0, 0, self.field_width, self.field_height)
    }

    pub fn player_rect(&self) -> Rect {
        let (x, y) = self.player_spawn;
        Rect::new(x, y, self.ship_width, self.ship_height)
    }

    pub fn chaser_rect(&self) -> Rect {
        let (x, y) = self.chaser_spawn;
        Rect::new(x, y, self.ship_width, self.ship_height)
    }
}
