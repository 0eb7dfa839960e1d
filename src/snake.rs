use std::collections::VecDeque;

use crate::{GridInt, Position};
use Direction::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn delta(self) -> (GridInt, GridInt) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The snake's body, head first.
///
/// `direction` is what the player last asked for and may change any number of
/// times between moves. `last_moved` is the direction of the last completed move;
/// reversal checks run against it, so two quick turns cannot fold the head back
/// onto the neck.
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    last_moved: Direction,
}

impl Snake {
    /// Lays out `size` segments ending at `head`, trailing away from `direction`.
    pub fn new(head: Position, size: usize, direction: Direction) -> Self {
        let behind = direction.opposite();
        let mut body = VecDeque::with_capacity(size.max(1));
        let mut pos = head;

        for _ in 0..size.max(1) {
            body.push_back(pos);
            pos = pos.offset(behind);
        }

        Snake { body, direction, last_moved: direction }
    }

    pub fn from_body<I>(segments: I, direction: Direction) -> Option<Self>
    where
        I: IntoIterator<Item = Position>,
    {
        let body: VecDeque<Position> = segments.into_iter().collect();
        if body.is_empty() {
            return None;
        }

        Some(Snake { body, direction, last_moved: direction })
    }

    pub fn body(&self) -> impl ExactSizeIterator<Item = &Position> + '_ {
        self.body.iter()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn last_moved_direction(&self) -> Direction {
        self.last_moved
    }

    /// Returns false when the request would reverse the last move and was dropped.
    pub fn change_direction(&mut self, new_direction: Direction) -> bool {
        if new_direction == self.last_moved.opposite() {
            return false;
        }

        self.direction = new_direction;
        true
    }

    pub fn next_head_position(&self) -> Position {
        self.head().offset(self.direction)
    }

    pub fn move_step(&mut self, grow: bool) {
        let new_head = self.next_head_position();
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }

        self.last_moved = self.direction;
    }

    /// Hit test against everything but the head.
    pub fn collides_with(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|segment| *segment == pos)
    }

    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }
}
