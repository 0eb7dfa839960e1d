use std::{fmt, time::Duration};

use log::{debug, info, warn};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::error::{GameError, SettingsError};
use crate::settings::GameSettings;
use crate::snake::{Direction, Snake};
use crate::{GridInt, Position};

/// Random draws per grid cell before food placement falls back to scanning the grid.
const FOOD_ATTEMPTS_PER_CELL: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::NotStarted => "not started",
            Status::Running => "running",
            Status::Paused => "paused",
            Status::GameOver => "over",
        };
        f.write_str(s)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    Wall,
    SelfCollision,
    /// The snake filled every cell, there is nowhere left to put food.
    GridExhausted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    GameOver(GameOverReason),
}

/// Everything a front-end can ask the simulation to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    TogglePause,
    /// Start when no round is in progress, otherwise pause or resume.
    StartOrTogglePause,
    ChangeDirection(Direction),
    Restart,
}

/// Read-only copy of the simulation handed to renderers after every change.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub width: u16,
    pub height: u16,
    pub body: Vec<Position>,
    pub food: Option<Position>,
    pub score: u32,
    pub high_score: u32,
    pub status: Status,
    pub tick_interval: Duration,
    pub game_over_reason: Option<GameOverReason>,
}

pub struct Game {
    settings: GameSettings,
    rng: StdRng,
    snake: Snake,
    food: Option<Position>,
    score: u32,
    high_score: u32,
    status: Status,
    tick_interval: Duration,
    game_over_reason: Option<GameOverReason>,
}

impl Game {
    pub fn new(settings: GameSettings) -> Result<Self, SettingsError> {
        Self::with_rng(settings, StdRng::from_entropy())
    }

    /// Same as [`Game::new`] but with reproducible food placement.
    pub fn with_seed(settings: GameSettings, seed: u64) -> Result<Self, SettingsError> {
        Self::with_rng(settings, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: GameSettings, rng: StdRng) -> Result<Self, SettingsError> {
        settings.validate()?;

        let snake = spawn_snake(&settings);
        let tick_interval = settings.initial_interval();
        let mut game = Game {
            settings,
            rng,
            snake,
            food: None,
            score: 0,
            high_score: 0,
            status: Status::NotStarted,
            tick_interval,
            game_over_reason: None,
        };

        // Validation guarantees at least one free cell here.
        game.food = game.place_food(None).ok();
        Ok(game)
    }

    ///////////////////////////////////////////////////////////////////////////

    pub fn start(&mut self) -> Result<(), GameError> {
        match self.status {
            Status::NotStarted | Status::GameOver => {}
            _ => return Err(self.invalid("start")),
        }

        self.score = 0;
        self.snake = spawn_snake(&self.settings);
        self.tick_interval = self.settings.initial_interval();
        self.game_over_reason = None;
        self.status = Status::Running;
        info!("round started on a {}x{} grid", self.settings.width, self.settings.height);

        match self.place_food(None) {
            Ok(food) => self.food = Some(food),
            Err(err) => {
                warn!("{}", err);
                self.food = None;
                self.game_over(GameOverReason::GridExhausted);
            }
        }

        Ok(())
    }

    /// Advances the round by one tick: collision check, then score and food, then
    /// the move itself.
    pub fn step(&mut self) -> Result<StepOutcome, GameError> {
        if self.status != Status::Running {
            return Err(self.invalid("step"));
        }

        let next_head = self.snake.next_head_position();

        if !next_head.is_within(self.settings.width, self.settings.height) {
            return Ok(self.game_over(GameOverReason::Wall));
        }

        if self.snake.collides_with(next_head) {
            return Ok(self.game_over(GameOverReason::SelfCollision));
        }

        let grow = self.food == Some(next_head);
        if !grow {
            self.snake.move_step(false);
            return Ok(StepOutcome::Moved);
        }

        self.score += 1;
        self.high_score = self.high_score.max(self.score);
        self.adjust_speed();
        debug!("ate food at {:?}, score {}", next_head, self.score);

        // The head is about to enter `next_head`, so it counts as taken.
        let placed = self.place_food(Some(next_head));
        self.snake.move_step(true);

        match placed {
            Ok(food) => {
                self.food = Some(food);
                Ok(StepOutcome::Ate)
            }
            Err(err) => {
                warn!("{}", err);
                self.food = None;
                Ok(self.game_over(GameOverReason::GridExhausted))
            }
        }
    }

    /// Pausing an already paused game is a no-op.
    pub fn pause(&mut self) -> Result<(), GameError> {
        match self.status {
            Status::Running => {
                self.status = Status::Paused;
                info!("paused");
                Ok(())
            }
            Status::Paused => Ok(()),
            _ => Err(self.invalid("pause")),
        }
    }

    pub fn resume(&mut self) -> Result<(), GameError> {
        match self.status {
            Status::Paused => {
                self.status = Status::Running;
                info!("resumed");
                Ok(())
            }
            Status::Running => Ok(()),
            _ => Err(self.invalid("resume")),
        }
    }

    pub fn toggle_pause(&mut self) -> Result<(), GameError> {
        match self.status {
            Status::Running => self.pause(),
            Status::Paused => self.resume(),
            _ => Err(self.invalid("toggle pause")),
        }
    }

    pub fn start_or_toggle_pause(&mut self) -> Result<(), GameError> {
        match self.status {
            Status::NotStarted | Status::GameOver => self.start(),
            _ => self.toggle_pause(),
        }
    }

    /// Queues a turn for the next step. Reversals are dropped silently.
    pub fn change_direction(&mut self, direction: Direction) -> Result<(), GameError> {
        if self.status != Status::Running {
            return Err(self.invalid("change direction"));
        }

        if !self.snake.change_direction(direction) {
            debug!("ignored reversal to {:?}", direction);
        }

        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), GameError> {
        self.status = Status::NotStarted;
        self.start()
    }

    /// Front-end entry point. Commands that don't apply to the current state are
    /// logged and dropped.
    pub fn apply(&mut self, command: Command) {
        let res = match command {
            Command::Start => self.start(),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => self.toggle_pause(),
            Command::StartOrTogglePause => self.start_or_toggle_pause(),
            Command::ChangeDirection(dir) => self.change_direction(dir),
            Command::Restart => self.restart(),
        };

        if let Err(err) = res {
            debug!("{}", err);
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.settings.width,
            height: self.settings.height,
            body: self.snake.body().copied().collect(),
            food: self.food,
            score: self.score,
            high_score: self.high_score,
            status: self.status,
            tick_interval: self.tick_interval,
            game_over_reason: self.game_over_reason,
        }
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Option<Position> {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn game_over_reason(&self) -> Option<GameOverReason> {
        self.game_over_reason
    }

    #[doc(hidden)]
    pub fn debug_set_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }

    #[doc(hidden)]
    pub fn debug_set_food(&mut self, food: Position) {
        self.food = Some(food);
    }

    ///////////////////////////////////////////////////////////////////////////

    fn game_over(&mut self, reason: GameOverReason) -> StepOutcome {
        self.status = Status::GameOver;
        self.game_over_reason = Some(reason);
        info!("game over ({:?}), score {}, high score {}", reason, self.score, self.high_score);
        StepOutcome::GameOver(reason)
    }

    fn adjust_speed(&mut self) {
        if self.score == 0 || self.score % self.settings.speed_increase_interval != 0 {
            return;
        }

        let nanos = self.tick_interval.as_nanos() as f64 * self.settings.speed_increase_factor;
        let faster = Duration::from_nanos(nanos.round() as u64);
        self.tick_interval = faster.max(self.settings.min_interval());
        debug!("tick interval now {:?}", self.tick_interval);
    }

    fn place_food(&mut self, reserved: Option<Position>) -> Result<Position, GameError> {
        let attempts = self.settings.cell_count() * FOOD_ATTEMPTS_PER_CELL;
        self.place_food_within(reserved, attempts)
    }

    /// Rejection sampling over the whole grid. If every draw lands on the snake the
    /// free cells are enumerated instead, so only a truly full grid fails.
    fn place_food_within(
        &mut self,
        reserved: Option<Position>,
        attempts: usize,
    ) -> Result<Position, GameError> {
        let (width, height) = (self.settings.width, self.settings.height);
        let (w, h) = (GridInt::from(width), GridInt::from(height));
        let snake = &self.snake;
        let rng = &mut self.rng;
        let is_free = |pos: Position| !snake.occupies(pos) && Some(pos) != reserved;

        for _ in 0..attempts {
            let pos = Position::new(rng.gen_range(0..w), rng.gen_range(0..h));
            if is_free(pos) {
                return Ok(pos);
            }
        }

        let choices: Vec<Position> = (0..h)
            .flat_map(|y| (0..w).map(move |x| Position::new(x, y)))
            .filter(|pos| is_free(*pos))
            .collect();

        choices.choose(rng).copied().ok_or(GameError::GridExhausted { width, height })
    }

    fn invalid(&self, command: &'static str) -> GameError {
        GameError::InvalidCommand { command, status: self.status }
    }
}

fn spawn_snake(settings: &GameSettings) -> Snake {
    let center = Position::new(
        GridInt::from(settings.width / 2),
        GridInt::from(settings.height / 2),
    );
    Snake::new(center, settings.initial_snake_length, Direction::Right)
}
