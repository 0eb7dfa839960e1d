use std::time::{Duration, Instant};

use log::info;

use crate::game::{Command, Game, Snapshot, Status, StepOutcome};
use crate::scheduler::TickScheduler;

/// How long to wait for input when no tick is pending (not started, paused, over).
const IDLE_POLL: Duration = Duration::from_millis(250);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Command(Command),
    /// Nothing changed in the game but the front-end wants a fresh frame.
    Redraw,
    Quit,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub trait Renderer {
    type Error;

    fn render(&mut self, snapshot: &Snapshot) -> Result<(), Self::Error>;
}

pub trait InputSource {
    type Error;

    /// Blocks for at most `timeout` and returns every event that arrived.
    fn poll(&mut self, timeout: Duration) -> Result<Vec<InputEvent>, Self::Error>;
}

/// Cooperative loop: the only place where the game is mutated. Input is applied
/// between ticks, never during one.
pub struct Runner<R, I> {
    game: Game,
    scheduler: TickScheduler,
    renderer: R,
    input: I,
}

impl<R, I, E> Runner<R, I>
where
    R: Renderer<Error = E>,
    I: InputSource<Error = E>,
{
    pub fn new(game: Game, renderer: R, input: I) -> Self {
        Runner { game, scheduler: TickScheduler::new(), renderer, input }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (Game, R, I) {
        (self.game, self.renderer, self.input)
    }

    pub fn handle(&mut self, event: InputEvent, now: Instant) -> Control {
        let command = match event {
            InputEvent::Quit => return Control::Quit,
            InputEvent::Redraw => return Control::Continue,
            InputEvent::Command(command) => command,
        };

        let before = self.game.status();
        self.game.apply(command);

        match self.game.status() {
            // A restart mid-round begins a fresh timer as well.
            Status::Running if before != Status::Running || command == Command::Restart => {
                self.scheduler.arm(now, self.game.tick_interval());
            }
            Status::Running => {}
            _ => self.scheduler.disarm(),
        }

        Control::Continue
    }

    /// Steps the game if a tick is due. The next tick is armed with whatever
    /// interval the step left behind.
    pub fn tick(&mut self, now: Instant) -> Option<StepOutcome> {
        if !self.scheduler.fire(now) {
            return None;
        }

        let outcome = self.game.step().ok();

        if self.game.status() == Status::Running {
            self.scheduler.arm(now, self.game.tick_interval());
        }

        outcome
    }

    pub fn render(&mut self) -> Result<(), E> {
        let snapshot = self.game.snapshot();
        self.renderer.render(&snapshot)
    }

    pub fn run(&mut self) -> Result<(), E> {
        self.render()?;

        loop {
            let wait = self.scheduler.time_until_next(Instant::now()).unwrap_or(IDLE_POLL);
            let events = self.input.poll(wait)?;
            let mut dirty = !events.is_empty();

            for event in events {
                if self.handle(event, Instant::now()) == Control::Quit {
                    info!("quit requested");
                    return Ok(());
                }
            }

            if self.tick(Instant::now()).is_some() {
                dirty = true;
            }

            if dirty {
                self.render()?;
            }
        }
    }
}
