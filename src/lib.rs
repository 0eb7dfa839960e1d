//! Grid snake: a deterministic simulation core plus the timing loop that drives it.
//!
//! The simulation never draws and never sleeps. A [`runner::Runner`] owns the
//! [`game::Game`], fires it through a [`scheduler::TickScheduler`] and hands every
//! resulting [`game::Snapshot`] to whatever [`runner::Renderer`] the front-end provides.

pub mod error;
pub mod game;
pub mod runner;
pub mod scheduler;
pub mod settings;
pub mod snake;

use snake::Direction;

pub type GridInt = i32;

/// A cell on the grid. Values outside the grid are representable so that a head
/// about to leave the board can be inspected before it is rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: GridInt,
    pub y: GridInt,
}

impl Position {
    pub const fn new(x: GridInt, y: GridInt) -> Self {
        Position { x, y }
    }

    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position::new(self.x + dx, self.y + dy)
    }

    pub fn is_within(self, width: u16, height: u16) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < GridInt::from(width) && self.y < GridInt::from(height)
    }
}
