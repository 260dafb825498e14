use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key press asks the play mode to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Turn the snake
    Steer(Direction),
    /// Start a new game once the current one is over
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        if let Some(direction) = direction_for(key.code) {
            return KeyAction::Steer(direction);
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Restart,
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Arrow keys, or WASD in either case
fn direction_for(code: KeyCode) -> Option<Direction> {
    let direction = match code {
        KeyCode::Up => Direction::Up,
        KeyCode::Down => Direction::Down,
        KeyCode::Left => Direction::Left,
        KeyCode::Right => Direction::Right,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Direction::Up,
            's' => Direction::Down,
            'a' => Direction::Left,
            'd' => Direction::Right,
            _ => return None,
        },
        _ => return None,
    };
    Some(direction)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_arrow_keys() {
        let cases = [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Right, Direction::Right),
        ];
        for (code, direction) in cases {
            assert_eq!(press(code, KeyModifiers::NONE), KeyAction::Steer(direction));
        }
    }

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            press(KeyCode::Char('w'), KeyModifiers::NONE),
            KeyAction::Steer(Direction::Up)
        );
        assert_eq!(
            press(KeyCode::Char('a'), KeyModifiers::NONE),
            KeyAction::Steer(Direction::Left)
        );
        assert_eq!(
            press(KeyCode::Char('S'), KeyModifiers::SHIFT),
            KeyAction::Steer(Direction::Down)
        );
        assert_eq!(
            press(KeyCode::Char('D'), KeyModifiers::SHIFT),
            KeyAction::Steer(Direction::Right)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q'), KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('Q'), KeyModifiers::SHIFT), KeyAction::Quit);
        assert_eq!(press(KeyCode::Esc, KeyModifiers::NONE), KeyAction::Quit);
        assert_eq!(
            press(KeyCode::Char('c'), KeyModifiers::CONTROL),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_restart_key() {
        assert_eq!(press(KeyCode::Char('r'), KeyModifiers::NONE), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('R'), KeyModifiers::SHIFT), KeyAction::Restart);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x'), KeyModifiers::NONE), KeyAction::None);
        assert_eq!(press(KeyCode::Enter, KeyModifiers::NONE), KeyAction::None);
    }
}
