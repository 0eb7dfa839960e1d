use thiserror::Error;

use crate::game::Status;

/// Failures inside the simulation. None of them are fatal: an inapplicable command
/// leaves the game untouched and an exhausted grid ends the round.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("`{command}` is not valid while the game is {status}")]
    InvalidCommand { command: &'static str, status: Status },
    #[error("no free cell left for food on the {width}x{height} grid")]
    GridExhausted { width: u16, height: u16 },
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("grid must have at least two cells, got {width}x{height}")]
    GridTooSmall { width: u16, height: u16 },
    #[error("tick intervals must be positive")]
    ZeroInterval,
    #[error("minimum tick interval {min_ms}ms is above the initial interval {initial_ms}ms")]
    MinimumAboveInitial { min_ms: u64, initial_ms: u64 },
    #[error("points per speed increase must be positive")]
    ZeroSpeedStep,
    #[error("speed factor must be in (0, 1], got {0}")]
    SpeedFactorOutOfRange(f64),
    #[error("initial snake length {length} does not fit in a row of {width} cells from the centre")]
    InitialLengthOutOfRange { length: usize, width: u16 },
}
