use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// What a key does in the terminal simulator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Hold a direction button until the next tick samples it
    Press(Direction),
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => KeyAction::Press(Direction::Up),
            KeyCode::Down => KeyAction::Press(Direction::Down),
            KeyCode::Left => KeyAction::Press(Direction::Left),
            KeyCode::Right => KeyAction::Press(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => KeyAction::Press(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => KeyAction::Press(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => KeyAction::Press(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => KeyAction::Press(Direction::Right),

            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
