mod input;
mod term;

use std::fs::File;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use simplelog::{Config, LevelFilter, WriteLogger};

use snake::game::Game;
use snake::runner::Runner;
use snake::settings::{self, GameSettings};

use crate::input::Keyboard;
use crate::term::{board_footprint, TermManager, TermView};

/// Terminal snake. Eat, grow, don't hit the walls or yourself.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Grid width in cells.
    #[arg(long, default_value_t = settings::DEFAULT_WIDTH, value_parser = clap::value_parser!(u16).range(1..=500))]
    width: u16,
    /// Grid height in cells.
    #[arg(long, default_value_t = settings::DEFAULT_HEIGHT, value_parser = clap::value_parser!(u16).range(1..=500))]
    height: u16,
    /// Milliseconds between steps at the start of a round.
    #[arg(
        long = "initial-interval-ms",
        value_name = "MILLISECONDS",
        default_value_t = settings::DEFAULT_INITIAL_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    initial_interval_ms: u64,
    /// Floor for the step interval as the game speeds up.
    #[arg(
        long = "min-interval-ms",
        value_name = "MILLISECONDS",
        default_value_t = settings::DEFAULT_MIN_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..=60_000)
    )]
    min_interval_ms: u64,
    /// Points between speed-ups.
    #[arg(long = "speed-step", value_name = "POINTS", default_value_t = settings::DEFAULT_SPEED_STEP)]
    speed_step: u32,
    /// Factor applied to the step interval on every speed-up, in (0, 1].
    #[arg(long = "speed-factor", value_name = "FACTOR", default_value_t = settings::DEFAULT_SPEED_FACTOR)]
    speed_factor: f64,
    /// Number of segments the snake starts with.
    #[arg(long = "initial-length", value_name = "SEGMENTS", default_value_t = settings::DEFAULT_INITIAL_LENGTH)]
    initial_length: usize,
    /// Seed for food placement, for reproducible games.
    #[arg(long)]
    seed: Option<u64>,
    /// Where to write the log. The terminal itself is taken by the game.
    #[arg(long = "log-file", value_name = "PATH", default_value = "snake.log")]
    log_file: PathBuf,
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

impl CliArgs {
    fn settings(&self) -> GameSettings {
        GameSettings {
            width: self.width,
            height: self.height,
            initial_game_speed_ms: self.initial_interval_ms,
            max_game_speed_ms: self.min_interval_ms,
            speed_increase_interval: self.speed_step,
            speed_increase_factor: self.speed_factor,
            initial_snake_length: self.initial_length,
        }
    }
}

fn init_logging(args: &CliArgs) -> Result<()> {
    if args.log_level == LogLevel::Off {
        return Ok(());
    }

    let file = File::create(&args.log_file)
        .with_context(|| format!("cannot create log file {}", args.log_file.display()))?;
    WriteLogger::init(args.log_level.into(), Config::default(), file).context("logger already set")?;
    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(&args)?;

    let settings = args.settings();
    let game = match args.seed {
        Some(seed) => Game::with_seed(settings, seed),
        None => Game::new(settings),
    }
    .context("invalid game settings")?;
    let grid = (game.settings().width, game.settings().height);

    let mut term = TermManager::new().context("cannot read terminal size")?;
    let (need_w, need_h) = board_footprint(grid.0, grid.1);
    let (have_w, have_h) = term.get_terminal_size();
    if need_w > have_w || need_h > have_h {
        bail!(
            "a {}x{} grid needs a {}x{} terminal, this one is {}x{}",
            grid.0, grid.1, need_w, need_h, have_w, have_h
        );
    }

    term.setup().context("cannot set up terminal")?;
    info!("starting snake on a {}x{} grid", grid.0, grid.1);

    let mut runner = Runner::new(game, TermView::new(term, grid), Keyboard);
    let result = runner.run();

    // Always hand the terminal back before reporting anything.
    let (game, mut view, _) = runner.into_parts();
    view.restore().context("cannot restore terminal")?;
    result.context("terminal I/O failed")?;

    info!("exiting, high score {}", game.high_score());
    println!("High score: {}", game.high_score());
    Ok(())
}
