mod input;
mod render;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::{
    crossterm::{
        execute,
        event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
        terminal::{
            EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
            supports_keyboard_enhancement,
        },
    },
    prelude::*,
};
use star_chase_core::{
    config::GameConfig,
    game_loop::{GameLoop, RunOutcome, SystemClock},
};
use std::{
    fs::File,
    io::{self, Stdout},
    path::{Path, PathBuf},
    sync::Mutex,
};
use tracing::{info, warn};

use crate::{input::TerminalInput, render::TuiRenderer};

#[derive(Parser, Debug)]
#[command(version, about = "Dodge and shoot down a BFS-driven chaser", long_about = None)]
struct Args {
    /// TOML file overriding the default game constants
    #[arg(short, long, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Seed for the background starfield
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Write log lines to this file
    #[arg(long, value_name = "LOG_FILE")]
    log: Option<PathBuf>,

    /// Maximum level written to the log file
    #[arg(long, default_value = "info")]
    log_level: tracing::Level,
}

/// Terminal plus whether keyboard enhancement was pushed onto it.
struct Session {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.log {
        init_logging(path, args.log_level)?;
    }

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GameConfig::default(),
    };

    // Set up the terminal
    let mut session = setup_terminal()?;

    let result = run_game(&mut session, &config, args.seed);

    // Restore the terminal even if the game failed
    restore_terminal(&mut session)?;

    match result? {
        RunOutcome::Won => info!("round finished: player won"),
        RunOutcome::Quit => info!("round finished: player quit"),
    }
    Ok(())
}

/// Sends `tracing` output to `path`; the terminal itself belongs to the game.
fn init_logging(path: &Path, level: tracing::Level) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

fn load_config(path: &Path) -> Result<GameConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    GameConfig::from_toml_str(&source)
        .with_context(|| format!("Failed to load config file: {}", path.display()))
}

fn run_game(session: &mut Session, config: &GameConfig, seed: u64) -> Result<RunOutcome> {
    let renderer = TuiRenderer::new(&mut session.terminal, seed)?;
    let input = TerminalInput::new(session.keyboard_enhanced);
    let mut game_loop = GameLoop::new(config, renderer, input, SystemClock::new())?;
    let outcome = game_loop.run()?;
    info!(stats = ?game_loop.game().stats(), "final stats");
    Ok(outcome)
}

/// Configures the terminal for TUI interaction.
fn setup_terminal() -> Result<Session> {
    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    // Release events let held keys end exactly when the key comes up.
    let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false)
        && execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;
    Ok(Session {
        terminal,
        keyboard_enhanced,
    })
}

/// Restores the terminal to its original state.
fn restore_terminal(session: &mut Session) -> Result<()> {
    if session.keyboard_enhanced {
        // Keep restoring the rest of the terminal even if this fails.
        if let Err(err) = execute!(session.terminal.backend_mut(), PopKeyboardEnhancementFlags) {
            warn!(%err, "failed to pop keyboard enhancement flags");
        }
    }
    disable_raw_mode()?;
    execute!(session.terminal.backend_mut(), LeaveAlternateScreen)?;
    session.terminal.show_cursor()?;
    Ok(())
}
