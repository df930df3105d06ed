use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{GridCoord, Rect, config::GameConfig, map::GridModel, pathfinder::find_path};

/// Movement keys held down during a tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// The player-controlled ship.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub rect: Rect,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Player {
            rect: config.player_rect(),
        }
    }

    /// Applies one tick of held-key movement.
    ///
    /// Each axis is checked on its own, so two keys move diagonally. A step
    /// is taken only if the ship then stays strictly inside the field;
    /// otherwise that direction is skipped for this tick.
    pub fn apply_input(&mut self, keys: HeldKeys, config: &GameConfig) {
        // Bounds are tested in i64 so no configuration can overflow them.
        let vel = i64::from(config.player_velocity);
        let (field_w, field_h) = (i64::from(config.field_width), i64::from(config.field_height));
        let rect = &mut self.rect;
        let (x, y) = (i64::from(rect.x), i64::from(rect.y));
        if keys.left && x - vel > 0 {
            rect.x -= config.player_velocity;
        }
        if keys.right && x + vel + i64::from(rect.width) < field_w {
            rect.x += config.player_velocity;
        }
        if keys.up && y - vel > 0 {
            rect.y -= config.player_velocity;
        }
        if keys.down && y + vel + i64::from(rect.height) < field_h {
            rect.y += config.player_velocity;
        }
    }
}

/// The AI-controlled opponent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chaser {
    pub rect: Rect,
    health: u32,
}

impl Chaser {
    pub fn new(config: &GameConfig) -> Self {
        Chaser {
            rect: config.chaser_rect(),
            health: config.chaser_health,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// Registers one projectile hit. Health never drops below zero.
    pub fn take_hit(&mut self) {
        self.health = self.health.saturating_sub(1);
    }

    /// Re-plans toward `target` and takes the first step of the new path.
    ///
    /// The chaser snaps to the top-left corner of the next cell. Returns the
    /// cell moved to, or `None` when the path is shorter than two cells.
    pub fn plan_and_step(&mut self, target: &Rect, grid: &GridModel) -> Option<GridCoord> {
        let from = grid.to_grid(self.rect.x, self.rect.y);
        let to = grid.to_grid(target.x, target.y);
        let path = find_path(grid, from, to);
        debug!(?from, ?to, path_len = path.len(), "chaser re-planned");

        let next = *path.get(1)?;
        let (x, y) = grid.to_world(next);
        self.rect.x = x;
        self.rect.y = y;
        Some(next)
    }
}
