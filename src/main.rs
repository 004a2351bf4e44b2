use std::fs::File;
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{self, Event};
use log::{LevelFilter, error, info};
use simplelog::{Config, WriteLogger};
use sprite_snake::app::{App, Control};
use sprite_snake::config::{FRAME_INTERVAL_MS, GridSize, Settings};
use sprite_snake::error::{ConfigError, GeometryError};
use sprite_snake::input::translate_key;
use sprite_snake::terminal_runtime::{TerminalSession, restore_terminal};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Board width in cells, wall ring included.
    #[arg(long)]
    width: Option<u16>,

    /// Board height in cells, wall ring included.
    #[arg(long)]
    height: Option<u16>,

    /// Milliseconds between simulation ticks.
    #[arg(long = "tick-ms")]
    tick_ms: Option<u64>,

    /// Seed for reproducible apple placement.
    #[arg(long)]
    seed: Option<u64>,

    /// JSON settings file; flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where to write the log (the terminal is taken by the game).
    #[arg(long = "log-file")]
    log_file: Option<PathBuf>,

    /// Log verbosity: off, error, warn, info, debug or trace.
    #[arg(long = "log-level", default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

impl Cli {
    fn overrides(&self) -> Settings {
        Settings {
            width: self.width,
            height: self.height,
            tick_interval_ms: self.tick_ms,
            seed: self.seed,
            log_file: self.log_file.clone(),
        }
    }
}

#[derive(Debug, Error)]
enum RunError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("corrupt snake geometry: {0}")]
    Geometry(#[from] GeometryError),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (settings, bounds) = match resolve_settings(&cli) {
        Ok(resolved) => resolved,
        Err(error) => {
            eprintln!("error: {error}");
            return ExitCode::FAILURE;
        }
    };

    let log_file = settings.log_file();
    if let Err(error) = init_logging(&log_file, cli.log_level) {
        eprintln!("warning: logging to {} disabled: {error}", log_file.display());
    }

    install_panic_hook();

    let app = App::new(bounds, settings.tick_interval(), settings.seed);
    info!(
        "starting {}x{} board, tick {:?}, seed {:?}",
        bounds.width(),
        bounds.height(),
        app.tick_interval(),
        settings.seed
    );

    match run(app) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn resolve_settings(cli: &Cli) -> Result<(Settings, GridSize), ConfigError> {
    let base = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let settings = base.overlay(cli.overrides());
    let bounds = settings.grid_size()?;
    Ok((settings, bounds))
}

fn init_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file).map_err(io::Error::other)
}

fn run(mut app: App) -> Result<(), RunError> {
    let mut session = TerminalSession::enter()?;
    let mut last_tick = Instant::now();

    loop {
        session.draw(&app)?;

        while event::poll(Duration::ZERO)? {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            let Some(input) = translate_key(key) else {
                continue;
            };
            if app.handle_input(input) == Control::Quit {
                return Ok(());
            }
        }

        if last_tick.elapsed() >= app.tick_interval() {
            if !app.state().is_game_over() {
                app.step()?;
            }
            last_tick = Instant::now();
        }

        thread::sleep(Duration::from_millis(FRAME_INTERVAL_MS));
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        default_hook(panic_info);
    }));
}
