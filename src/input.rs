use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyCode, KeyEvent, KeyModifiers};

use snake::game::Command;
use snake::runner::{InputEvent, InputSource};
use snake::snake::Direction::*;

pub struct Keyboard;

impl InputSource for Keyboard {
    type Error = crossterm::ErrorKind;

    fn poll(&mut self, timeout: Duration) -> crossterm::Result<Vec<InputEvent>> {
        let mut events = vec![];

        if !poll(timeout)? {
            return Ok(events);
        }

        loop {
            match read()? {
                Event::Key(key) => events.extend(map_key(&key)),
                Event::Resize(..) => events.push(InputEvent::Redraw),
                _ => {}
            }

            if !poll(Duration::from_millis(0))? {
                break;
            }
        }

        Ok(events)
    }
}

pub fn map_key(key: &KeyEvent) -> Option<InputEvent> {
    if is_ctrl_c(key) {
        return Some(InputEvent::Quit);
    }

    let command = match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Command::ChangeDirection(Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Command::ChangeDirection(Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Command::ChangeDirection(Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Command::ChangeDirection(Right),
        KeyCode::Char(' ') => Command::StartOrTogglePause,
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(InputEvent::Quit),
        _ => return None,
    };

    Some(InputEvent::Command(command))
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent { code, modifiers: KeyModifiers::NONE }
    }

    #[test]
    fn arrows_and_wasd_turn() {
        assert_eq!(map_key(&key(KeyCode::Up)), Some(InputEvent::Command(Command::ChangeDirection(Up))));
        assert_eq!(map_key(&key(KeyCode::Char('a'))), Some(InputEvent::Command(Command::ChangeDirection(Left))));
        assert_eq!(map_key(&key(KeyCode::Char('S'))), Some(InputEvent::Command(Command::ChangeDirection(Down))));
        assert_eq!(map_key(&key(KeyCode::Right)), Some(InputEvent::Command(Command::ChangeDirection(Right))));
    }

    #[test]
    fn control_keys() {
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(InputEvent::Command(Command::StartOrTogglePause)));
        assert_eq!(map_key(&key(KeyCode::Char('r'))), Some(InputEvent::Command(Command::Restart)));
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(InputEvent::Quit));
        assert_eq!(
            map_key(&KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }),
            Some(InputEvent::Quit)
        );
        assert_eq!(map_key(&key(KeyCode::Char('c'))), None);
        assert_eq!(map_key(&key(KeyCode::Tab)), None);
    }
}
