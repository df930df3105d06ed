use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{Rect, config::GameConfig};

/// A live projectile travelling right at a constant speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Projectile {
    pub rect: Rect,
}

/// Owns every in-flight projectile.
#[derive(Debug, Clone)]
pub struct ProjectileSystem {
    live: Vec<Projectile>,
    max_live: usize,
    velocity: i32,
    width: i32,
    height: i32,
    field_width: i32,
}

impl ProjectileSystem {
    pub fn new(config: &GameConfig) -> Self {
        ProjectileSystem {
            live: Vec::with_capacity(config.max_projectiles),
            max_live: config.max_projectiles,
            velocity: config.projectile_velocity,
            width: config.projectile_width,
            height: config.projectile_height,
            field_width: config.field_width,
        }
    }

    pub fn live(&self) -> &[Projectile] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Fires from the shooter's right edge, vertically centered on it.
    ///
    /// Returns `None` without side effects when the live cap is reached.
    pub fn fire(&mut self, shooter: &Rect) -> Option<Projectile> {
        if self.live.len() >= self.max_live {
            debug!(live = self.live.len(), "fire request dropped at cap");
            return None;
        }
        let projectile = Projectile {
            rect: Rect::new(
                shooter.right(),
                shooter.y + shooter.height / 2 - self.height / 2,
                self.width,
                self.height,
            ),
        };
        self.live.push(projectile);
        Some(projectile)
    }

    /// Moves every projectile one tick and resolves collisions with `target`.
    ///
    /// Scanning stops at the first hit, so at most one hit is reported per
    /// tick and projectiles after it keep their position until next tick.
    /// Projectiles past the right edge of the field are dropped.
    pub fn advance(&mut self, target: &Rect) -> bool {
        let mut spent = Vec::new();
        let mut hit = false;

        for (index, projectile) in self.live.iter_mut().enumerate() {
            projectile.rect.x += self.velocity;
            if projectile.rect.overlaps(target) {
                spent.push(index);
                hit = true;
                break;
            } else if projectile.rect.x > self.field_width {
                trace!(index, "projectile left the field");
                spent.push(index);
            }
        }

        // Indices were collected in ascending order.
        for index in spent.into_iter().rev() {
            self.live.remove(index);
        }
        hit
    }
}
