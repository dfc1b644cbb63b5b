use crate::game::GameState;
use crate::game::state::{COLS, ROWS};

/// One image on the matrix: bit `c` of `rows[r]` lights the LED at `(r, c)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Frame {
    rows: [u8; ROWS as usize],
}

impl Frame {
    pub const fn blank() -> Self {
        Self {
            rows: [0; ROWS as usize],
        }
    }

    /// Every LED on
    pub const fn full() -> Self {
        Self {
            rows: [u8::MAX; ROWS as usize],
        }
    }

    /// Snake segments and food
    pub fn from_state(state: &GameState) -> Self {
        let mut frame = Self::blank();
        for segment in state.board.segments() {
            frame.set(segment.row, segment.col);
        }
        if let Some(food) = state.food {
            frame.set(food.row, food.col);
        }
        frame
    }

    pub fn set(&mut self, row: u8, col: u8) {
        debug_assert!(row < ROWS && col < COLS);
        self.rows[row as usize] |= 1 << col;
    }

    pub fn is_lit(&self, row: u8, col: u8) -> bool {
        self.rows[row as usize] & (1 << col) != 0
    }

    pub fn lit_count(&self) -> usize {
        self.rows.iter().map(|bits| bits.count_ones() as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Direction, Position};

    #[test]
    fn test_full_and_blank() {
        assert_eq!(Frame::full().lit_count(), 64);
        assert_eq!(Frame::blank().lit_count(), 0);
        assert!(Frame::full().is_lit(7, 7));
    }

    #[test]
    fn test_from_state_lights_snake_and_food() {
        let state = GameState::new(Board::initial(), Direction::Right, Some(Position::new(0, 6)));
        let frame = Frame::from_state(&state);

        assert_eq!(frame.lit_count(), 4);
        assert!(frame.is_lit(3, 3));
        assert!(frame.is_lit(3, 4));
        assert!(frame.is_lit(3, 5));
        assert!(frame.is_lit(0, 6));
        assert!(!frame.is_lit(3, 6));
    }
}
