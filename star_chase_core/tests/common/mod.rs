#![allow(dead_code)]

use std::{collections::VecDeque, convert::Infallible, io, time::Duration};

use star_chase_core::{
    Rect,
    config::GameConfig,
    game::{FrameSnapshot, InputFrame},
    game_loop::{Clock, InputSource, Renderer},
};

/// Default config with the chaser parked right in front of the player's gun,
/// so every projectile hits on the tick it is fired.
pub fn point_blank_config() -> GameConfig {
    GameConfig {
        chaser_spawn: (150, 300),
        ..GameConfig::default()
    }
}

pub fn fire() -> InputFrame {
    InputFrame {
        fire_requests: 1,
        ..InputFrame::default()
    }
}

pub fn quit() -> InputFrame {
    InputFrame {
        quit: true,
        ..InputFrame::default()
    }
}

/// Clock that only moves when slept on.
#[derive(Debug, Default)]
pub struct ManualClock {
    pub now: Duration,
    pub sleeps: Vec<Duration>,
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.sleeps.push(duration);
    }
}

/// Plays back a fixed list of frames, then asks to quit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<InputFrame>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = InputFrame>) -> Self {
        ScriptedInput {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    type Error = Infallible;

    fn poll(&mut self) -> Result<InputFrame, Self::Error> {
        Ok(self.frames.pop_front().unwrap_or_else(quit))
    }
}

/// What the renderer was asked to draw on one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnFrame {
    pub player: Rect,
    pub chaser: Rect,
    pub projectiles: usize,
    pub chaser_health: u32,
}

#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<DrawnFrame>,
    pub end_messages: Vec<String>,
}

impl Renderer for RecordingRenderer {
    type Error = Infallible;

    fn draw_frame(&mut self, frame: &FrameSnapshot<'_>) -> Result<(), Self::Error> {
        self.frames.push(DrawnFrame {
            player: *frame.player,
            chaser: *frame.chaser,
            projectiles: frame.projectiles.len(),
            chaser_health: frame.chaser_health,
        });
        Ok(())
    }

    fn draw_end_message(&mut self, text: &str) -> Result<(), Self::Error> {
        self.end_messages.push(text.to_string());
        Ok(())
    }
}

/// Fails on the first frame.
#[derive(Debug, Default)]
pub struct BrokenRenderer;

impl Renderer for BrokenRenderer {
    type Error = io::Error;

    fn draw_frame(&mut self, _frame: &FrameSnapshot<'_>) -> Result<(), Self::Error> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "display went away"))
    }

    fn draw_end_message(&mut self, _text: &str) -> Result<(), Self::Error> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "display went away"))
    }
}
