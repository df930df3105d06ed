//! The fixed-rate loop tying the simulation to its collaborators.
//!
//! Everything runs on the calling thread. The only suspension points are
//! the frame cap and the end-of-round message, both through [`Clock::sleep`].

use std::{
    error::Error,
    time::{Duration, Instant},
};

use tracing::info;

use crate::{
    config::{ConfigError, GameConfig},
    game::{FrameSnapshot, Game, InputFrame, TickOutcome},
};

/// Message shown when the chaser is destroyed.
pub const WIN_MESSAGE: &str = "You Win!";

type BoxError = Box<dyn Error + Send + Sync>;

/// Represents failures that end the loop early.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("renderer failed")]
    Render(#[source] BoxError),
    #[error("input source failed")]
    Input(#[source] BoxError),
}

/// Draws frames. How pixels (or terminal cells) are produced is up to the implementor.
pub trait Renderer {
    type Error: Error + Send + Sync + 'static;

    fn draw_frame(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), Self::Error>;

    fn draw_end_message(&mut self, text: &str) -> Result<(), Self::Error>;
}

/// Supplies the input gathered since the previous poll.
pub trait InputSource {
    type Error: Error + Send + Sync + 'static;

    fn poll(&mut self) -> Result<InputFrame, Self::Error>;
}

/// Monotonic time source that can also block.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by [`Instant`] and [`std::thread::sleep`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// How a finished loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Quit,
    Won,
}

/// Owns one round of the game plus the collaborators it talks to.
pub struct GameLoop<R, I, C> {
    game: Game,
    renderer: R,
    input: I,
    clock: C,
}

impl<R, I, C> GameLoop<R, I, C>
where
    R: Renderer,
    I: InputSource,
    C: Clock,
{
    /// Validates `config` and sets up a fresh round.
    pub fn new(config: &GameConfig, renderer: R, input: I, clock: C) -> Result<Self, GameError> {
        config.validate()?;
        Ok(GameLoop {
            game: Game::new(config),
            renderer,
            input,
            clock,
        })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Runs ticks until the player quits or wins.
    ///
    /// On a win the end message is drawn and held for the configured
    /// duration before returning.
    pub fn run(&mut self) -> Result<RunOutcome, GameError> {
        let tick = self.game.config().tick_duration();
        info!(?tick, "game loop started");

        loop {
            let tick_start = self.clock.now();
            let input = self.input.poll().map_err(|e| GameError::Input(Box::new(e)))?;

            match self.game.tick(tick_start, &input) {
                TickOutcome::Continue => {
                    self.renderer
                        .draw_frame(&self.game.snapshot())
                        .map_err(|e| GameError::Render(Box::new(e)))?;
                }
                TickOutcome::Quit => return Ok(RunOutcome::Quit),
                TickOutcome::Won => {
                    self.renderer
                        .draw_end_message(WIN_MESSAGE)
                        .map_err(|e| GameError::Render(Box::new(e)))?;
                    self.clock.sleep(self.game.config().end_message_duration());
                    return Ok(RunOutcome::Won);
                }
            }

            let elapsed = self.clock.now().saturating_sub(tick_start);
            if elapsed < tick {
                self.clock.sleep(tick - elapsed);
            }
        }
    }
}
