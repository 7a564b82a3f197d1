use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Direction, GameStatus, Intent};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    Game(Intent),
    Restart,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    /// Translate a key press given the current game status
    pub fn handle_key_event(&self, key: KeyEvent, status: GameStatus) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
            _ => {}
        }

        match status {
            // Any other key starts a fresh game
            GameStatus::NotStarted => KeyAction::Game(Intent::Start),
            GameStatus::Over => match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') | KeyCode::Enter => KeyAction::Restart,
                _ => KeyAction::None,
            },
            GameStatus::Running | GameStatus::Paused => Self::in_game(key.code),
        }
    }

    fn in_game(code: KeyCode) -> KeyAction {
        let direction = match code {
            // Movement - Arrow keys
            KeyCode::Up => Direction::Up,
            KeyCode::Down => Direction::Down,
            KeyCode::Left => Direction::Left,
            KeyCode::Right => Direction::Right,

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Direction::Up,
            KeyCode::Char('s') | KeyCode::Char('S') => Direction::Down,
            KeyCode::Char('a') | KeyCode::Char('A') => Direction::Left,
            KeyCode::Char('d') | KeyCode::Char('D') => Direction::Right,

            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                return KeyAction::Game(Intent::TogglePause);
            }
            _ => return KeyAction::None,
        };

        KeyAction::Game(Intent::Direction(direction))
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), GameStatus::Running),
            KeyAction::Game(Intent::Direction(Direction::Up))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Down), GameStatus::Running),
            KeyAction::Game(Intent::Direction(Direction::Down))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left), GameStatus::Running),
            KeyAction::Game(Intent::Direction(Direction::Left))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Right), GameStatus::Running),
            KeyAction::Game(Intent::Direction(Direction::Right))
        );
    }

    #[test]
    fn test_wasd_keys() {
        let handler = InputHandler::new();

        let w_upper = KeyEvent::new(KeyCode::Char('W'), KeyModifiers::SHIFT);
        assert_eq!(
            handler.handle_key_event(w_upper, GameStatus::Running),
            KeyAction::Game(Intent::Direction(Direction::Up))
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('a')), GameStatus::Paused),
            KeyAction::Game(Intent::Direction(Direction::Left))
        );
    }

    #[test]
    fn test_pause_keys() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char(' ')), GameStatus::Running),
            KeyAction::Game(Intent::TogglePause)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('p')), GameStatus::Paused),
            KeyAction::Game(Intent::TogglePause)
        );
    }

    #[test]
    fn test_any_key_starts() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('x')), GameStatus::NotStarted),
            KeyAction::Game(Intent::Start)
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Left), GameStatus::NotStarted),
            KeyAction::Game(Intent::Start)
        );
    }

    #[test]
    fn test_restart_only_after_game_over() {
        let handler = InputHandler::new();

        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r')), GameStatus::Over),
            KeyAction::Restart
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Char('r')), GameStatus::Running),
            KeyAction::None
        );
        assert_eq!(
            handler.handle_key_event(press(KeyCode::Up), GameStatus::Over),
            KeyAction::None
        );
    }

    #[test]
    fn test_quit_keys() {
        let handler = InputHandler::new();

        for status in [GameStatus::NotStarted, GameStatus::Running, GameStatus::Over] {
            assert_eq!(handler.handle_key_event(press(KeyCode::Char('q')), status), KeyAction::Quit);
            assert_eq!(handler.handle_key_event(press(KeyCode::Esc), status), KeyAction::Quit);
        }

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handler.handle_key_event(ctrl_c, GameStatus::Running), KeyAction::Quit);
    }
}
