use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::{
    Rect,
    config::GameConfig,
    entities::{Chaser, HeldKeys, Player},
    map::GridModel,
    projectiles::{Projectile, ProjectileSystem},
};

/// Represents whether the round is still being played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    Running,
    /// The chaser has been destroyed. Terminal.
    Won,
}

/// Input drained for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFrame {
    pub quit: bool,
    /// Fire key presses since the previous tick. Key repeats are not counted.
    pub fire_requests: u32,
    pub held: HeldKeys,
}

/// Represents the outcome of simulating one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Continue,
    Quit,
    Won,
}

/// Running counters for the round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub ticks: u64,
    pub shots_fired: u32,
    pub shots_dropped: u32,
    pub hits: u32,
    pub replans: u32,
}

/// Read-only view of everything the presentation layer draws.
#[derive(Debug, Clone, Copy)]
pub struct FrameSnapshot<'a> {
    pub field: Rect,
    pub player: &'a Rect,
    pub chaser: &'a Rect,
    pub projectiles: &'a [Projectile],
    pub chaser_health: u32,
    pub stats: &'a GameStats,
}

/// The whole simulation: both ships, the projectiles and the AI timer.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    grid: GridModel,
    player: Player,
    chaser: Chaser,
    projectiles: ProjectileSystem,
    state: GameState,
    last_plan: Duration,
    stats: GameStats,
}

impl Game {
    /// Creates a fresh round. The AI timer starts at time zero.
    pub fn new(config: &GameConfig) -> Self {
        Game {
            config: config.clone(),
            grid: config.grid(),
            player: Player::new(config),
            chaser: Chaser::new(config),
            projectiles: ProjectileSystem::new(config),
            state: GameState::Running,
            last_plan: Duration::ZERO,
            stats: GameStats::default(),
        }
    }

    /// Advances the simulation to time `now`.
    ///
    /// Order within a tick: quit, fire requests, player movement, AI
    /// re-plan (when the interval has elapsed), projectiles and hits, win
    /// check. Once the round is won this does nothing and returns `Won`.
    pub fn tick(&mut self, now: Duration, input: &InputFrame) -> TickOutcome {
        if self.state == GameState::Won {
            return TickOutcome::Won;
        }
        if input.quit {
            info!(ticks = self.stats.ticks, "quit requested");
            return TickOutcome::Quit;
        }
        self.stats.ticks += 1;

        for _ in 0..input.fire_requests {
            if self.projectiles.fire(&self.player.rect).is_some() {
                self.stats.shots_fired += 1;
            } else {
                self.stats.shots_dropped += 1;
            }
        }

        self.player.apply_input(input.held, &self.config);

        if now.saturating_sub(self.last_plan) >= self.config.ai_move_interval() {
            self.chaser.plan_and_step(&self.player.rect, &self.grid);
            self.last_plan = now;
            self.stats.replans += 1;
        }

        if self.projectiles.advance(&self.chaser.rect) {
            self.chaser.take_hit();
            self.stats.hits += 1;
            info!(health = self.chaser.health(), "chaser hit");
        }

        if self.chaser.is_destroyed() {
            self.state = GameState::Won;
            info!(stats = ?self.stats, "chaser destroyed, player wins");
            return TickOutcome::Won;
        }

        trace!(tick = self.stats.ticks, live = self.projectiles.len(), "tick done");
        TickOutcome::Continue
    }

    pub fn snapshot(&self) -> FrameSnapshot<'_> {
        FrameSnapshot {
            field: self.config.field_bounds(),
            player: &self.player.rect,
            chaser: &self.chaser.rect,
            projectiles: self.projectiles.live(),
            chaser_health: self.chaser.health(),
            stats: &self.stats,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }
    pub fn grid(&self) -> &GridModel {
        &self.grid
    }
    pub fn player(&self) -> &Player {
        &self.player
    }
    pub fn chaser(&self) -> &Chaser {
        &self.chaser
    }
    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }
    pub fn state(&self) -> GameState {
        self.state
    }
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }
}
