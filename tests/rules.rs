use std::time::Duration;

use snake::game::{Command, Game, GameOverReason, Status, StepOutcome};
use snake::settings::GameSettings;
use snake::snake::{Direction, Snake};
use snake::Position;

fn started(settings: GameSettings, seed: u64) -> Game {
    let mut game = Game::with_seed(settings, seed).unwrap();
    game.start().unwrap();
    game
}

#[test]
fn eating_food_grows_snake_and_scores() {
    let mut game = started(GameSettings::with_grid(5, 5), 1);
    assert_eq!(game.snake().head(), Position::new(2, 2));
    assert_eq!(game.snake().direction(), Direction::Right);
    game.debug_set_food(Position::new(4, 2));

    assert_eq!(game.step(), Ok(StepOutcome::Moved));
    assert_eq!(game.step(), Ok(StepOutcome::Ate));

    assert_eq!(game.snake().head(), Position::new(4, 2));
    assert_eq!(game.score(), 1);
    assert_eq!(game.snake().len(), 2);
    assert_ne!(game.food(), Some(Position::new(4, 2)));
}

#[test]
fn moving_to_top_row_is_not_a_collision() {
    let mut game = started(GameSettings::with_grid(5, 5), 2);
    game.debug_set_snake(
        Snake::from_body(vec![Position::new(1, 1), Position::new(1, 2)], Direction::Up).unwrap(),
    );
    game.debug_set_food(Position::new(4, 4));

    assert_eq!(game.step(), Ok(StepOutcome::Moved));
    assert_eq!(game.status(), Status::Running);
    assert_eq!(game.snapshot().body, vec![Position::new(1, 0), Position::new(1, 1)]);
}

#[test]
fn wall_collision_should_end_round() {
    let mut game = started(GameSettings::with_grid(6, 5), 3);
    game.debug_set_snake(Snake::from_body(vec![Position::new(0, 2)], Direction::Left).unwrap());

    assert_eq!(game.step(), Ok(StepOutcome::GameOver(GameOverReason::Wall)));
    assert_eq!(game.status(), Status::GameOver);
    assert_eq!(game.snapshot().body, vec![Position::new(0, 2)]);
}

#[test]
fn speed_increases_when_score_hits_step() {
    let mut game = started(GameSettings::with_grid(20, 5), 4);
    // Head starts at (10, 2) facing right.
    for x in 11..16 {
        assert_eq!(game.tick_interval(), Duration::from_millis(100));
        game.debug_set_food(Position::new(x, 2));
        assert_eq!(game.step(), Ok(StepOutcome::Ate));
    }

    assert_eq!(game.score(), 5);
    assert_eq!(game.tick_interval(), Duration::from_millis(90));
}

#[test]
fn pause_twice_is_same_as_once() {
    let mut game = started(GameSettings::default(), 5);
    game.apply(Command::Pause);
    let once = game.snapshot();
    game.apply(Command::Pause);

    assert_eq!(game.status(), Status::Paused);
    assert_eq!(game.snapshot(), once);
}

#[test]
fn reversal_never_changes_direction() {
    let mut game = started(GameSettings::default(), 6);
    game.apply(Command::ChangeDirection(Direction::Left));
    assert_eq!(game.snake().direction(), Direction::Right);

    // Queue two quick turns: the second would reverse the committed direction.
    game.apply(Command::ChangeDirection(Direction::Up));
    game.apply(Command::ChangeDirection(Direction::Left));
    assert_eq!(game.snake().direction(), Direction::Up);
}

#[test]
fn high_score_never_decreases() {
    let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];
    let mut game = started(GameSettings::with_grid(8, 6), 7);
    let mut best = 0;

    for round in 0..30u32 {
        for i in 0..200usize {
            if i % 3 == 0 {
                let turn = turns[(i / 3 + round as usize) % turns.len()];
                game.apply(Command::ChangeDirection(turn));
            }
            if game.step().is_err() {
                break;
            }

            assert!(game.high_score() >= best);
            assert!(game.high_score() >= game.score());
            best = game.high_score();

            let snapshot = game.snapshot();
            if let Some(food) = snapshot.food {
                assert!(!snapshot.body.contains(&food));
            }
        }

        game.apply(Command::Restart);
        assert_eq!(game.score(), 0);
        assert_eq!(game.high_score(), best);
    }
}

#[test]
fn same_seed_same_game() {
    let play = |seed| {
        let mut game = started(GameSettings::with_grid(10, 10), seed);
        let mut foods = vec![game.food()];
        for _ in 0..20 {
            if game.step().is_err() {
                break;
            }
            foods.push(game.food());
        }
        foods
    };

    assert_eq!(play(42), play(42));
}
