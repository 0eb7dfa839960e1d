use std::io::{stdout, Stdout, Write};

use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};

use snake::game::{GameOverReason, Snapshot, Status};
use snake::runner::Renderer;
use snake::Position;

pub type TermInt = u16;
pub type Coords = (TermInt, TermInt);

const SNAKE_HEAD: &str = "██";
const SNAKE_BODY: &str = "▓▓";
const DEAD_SNAKE: &str = "XX";
const FOOD: &str = "()";
const EMPTY: &str = "  ";

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: TermInt = 2;

pub struct TermManager {
    width: TermInt,
    height: TermInt,
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> crossterm::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen, cursor::Hide, cursor::DisableBlinking)?;
        terminal::enable_raw_mode()?;
        self.clear()
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
    }

    pub fn get_terminal_size(&self) -> Coords {
        (self.width, self.height)
    }

    /// Re-reads the terminal size; returns true if it changed since the last read.
    pub fn refresh_size(&mut self) -> crossterm::Result<bool> {
        let size = terminal::size()?;
        let changed = size != (self.width, self.height);
        self.width = size.0;
        self.height = size.1;
        Ok(changed)
    }

    pub fn draw_box(&mut self, top_left: Coords, size: Coords) -> crossterm::Result<()> {
        let (left, top) = top_left;
        let (width, height) = size;
        let right = left + width - 1;
        let bottom = top + height - 1;

        for x in left..=right {
            let ch = if x == left || x == right {'+'} else {'-'};
            self.print_at((x, top), ch)?;
            self.print_at((x, bottom), ch)?;
        }

        for y in top + 1..bottom {
            self.print_at((left, y), '|')?;
            self.print_at((right, y), '|')?;
        }

        Ok(())
    }

    /// Draws a padded box of centred lines over whatever is on screen.
    pub fn show_message(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        let longest = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        let msg_width = (longest as TermInt + 2).min(self.width);
        let msg_height = (lines.len() as TermInt + 2).min(self.height);
        let left = (self.width - msg_width) / 2;
        let top = (self.height - msg_height) / 2;

        let blank = " ".repeat(msg_width as usize);
        self.print_str_at((left, top), &blank)?;
        self.print_str_at((left, top + msg_height - 1), &blank)?;

        for (i, line) in lines.iter().enumerate().take(msg_height.saturating_sub(2) as usize) {
            let padded: String = format!("{line: ^width$}", line = line, width = msg_width as usize)
                .chars()
                .take(msg_width as usize)
                .collect();
            self.print_str_at((left, top + i as TermInt + 1), &padded)?;
        }

        Ok(())
    }

    pub fn print_at(&mut self, pos: Coords, ch: char) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(ch))
    }

    pub fn print_str_at(&mut self, pos: Coords, s: &str) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), Print(s))
    }

    pub fn print_colored_at(&mut self, pos: Coords, s: &str, color: Color) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), SetForegroundColor(color), Print(s), ResetColor)
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}

/// Terminal columns and rows a `width` x `height` grid needs, border and status
/// line included.
pub fn board_footprint(width: u16, height: u16) -> Coords {
    (width * CELL_WIDTH + 2, height + 3)
}

/// Where the board goes to sit in the middle of the screen.
pub fn centred_top_left(screen: Coords, board: Coords) -> Coords {
    (screen.0.saturating_sub(board.0) / 2, screen.1.saturating_sub(board.1) / 2)
}

/// Draws snapshots centred on the terminal, re-centring after a resize.
pub struct TermView {
    term: TermManager,
    board: Coords,
    top_left: Coords,
}

impl TermView {
    pub fn new(term: TermManager, grid: Coords) -> Self {
        let board = board_footprint(grid.0, grid.1);
        let top_left = centred_top_left(term.get_terminal_size(), board);
        TermView { term, board, top_left }
    }

    fn relayout(&mut self) -> crossterm::Result<()> {
        if self.term.refresh_size()? {
            self.term.clear()?;
            self.top_left = centred_top_left(self.term.get_terminal_size(), self.board);
        }

        Ok(())
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        self.term.restore()
    }

    fn cell_coords(&self, pos: Position) -> Coords {
        // Positions in a snapshot are always on the grid.
        let (x, y) = (pos.x as TermInt, pos.y as TermInt);
        (self.top_left.0 + 1 + x * CELL_WIDTH, self.top_left.1 + 1 + y)
    }

    fn draw_board(&mut self, snapshot: &Snapshot) -> crossterm::Result<()> {
        let (board_w, _) = board_footprint(snapshot.width, snapshot.height);
        self.term.draw_box(self.top_left, (board_w, snapshot.height + 2))?;

        let blank_row = EMPTY.repeat(snapshot.width as usize);
        for y in 0..snapshot.height {
            let row_start = (self.top_left.0 + 1, self.top_left.1 + 1 + y);
            self.term.print_str_at(row_start, &blank_row)?;
        }

        if let Some(food) = snapshot.food {
            let at = self.cell_coords(food);
            self.term.print_colored_at(at, FOOD, Color::Red)?;
        }

        let dead = matches!(
            snapshot.game_over_reason,
            Some(GameOverReason::Wall) | Some(GameOverReason::SelfCollision)
        );
        for (i, pos) in snapshot.body.iter().enumerate() {
            let (glyph, color) = match (dead, i) {
                (true, _) => (DEAD_SNAKE, Color::DarkRed),
                (false, 0) => (SNAKE_HEAD, Color::Green),
                (false, _) => (SNAKE_BODY, Color::DarkGreen),
            };
            let at = self.cell_coords(*pos);
            self.term.print_colored_at(at, glyph, color)?;
        }

        Ok(())
    }

    fn draw_status_line(&mut self, snapshot: &Snapshot) -> crossterm::Result<()> {
        let (board_w, _) = board_footprint(snapshot.width, snapshot.height);
        let line = format!(
            "Score: {} | High Score: {} | {}ms",
            snapshot.score,
            snapshot.high_score,
            snapshot.tick_interval.as_millis()
        );
        let padded: String = format!("{: <width$}", line, width = board_w as usize)
            .chars()
            .take(board_w as usize)
            .collect();
        let at = (self.top_left.0, self.top_left.1 + snapshot.height + 2);
        self.term.print_str_at(at, &padded)
    }

    fn draw_overlay(&mut self, snapshot: &Snapshot) -> crossterm::Result<()> {
        match snapshot.status {
            Status::Running => Ok(()),
            Status::NotStarted => self.term.show_message(&[
                "SNAKE",
                "",
                "Arrow keys or WASD to move",
                "Space to start or pause",
                "R to restart, Esc or Q to quit",
            ]),
            Status::Paused => self.term.show_message(&["Paused", "Press Space to resume"]),
            Status::GameOver => {
                let title = match snapshot.game_over_reason {
                    Some(GameOverReason::GridExhausted) => "Board cleared!",
                    _ => "Game over!",
                };
                let score = format!("Score: {}", snapshot.score);
                let high = format!("High score: {}", snapshot.high_score);
                self.term.show_message(&[title, &score, &high, "", "Space to play again"])
            }
        }
    }
}

impl Renderer for TermView {
    type Error = crossterm::ErrorKind;

    fn render(&mut self, snapshot: &Snapshot) -> crossterm::Result<()> {
        self.relayout()?;
        self.draw_board(snapshot)?;
        self.draw_status_line(snapshot)?;
        self.draw_overlay(snapshot)?;
        self.term.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn footprint_includes_border_and_status_line() {
        assert_eq!(board_footprint(40, 20), (82, 23));
        assert_eq!(board_footprint(5, 5), (12, 8));
    }

    #[test]
    fn board_is_centred_and_never_negative() {
        assert_eq!(centred_top_left((100, 30), (82, 23)), (9, 3));
        assert_eq!(centred_top_left((120, 40), (82, 23)), (19, 8));
        assert_eq!(centred_top_left((60, 10), (82, 23)), (0, 0));
    }
}
