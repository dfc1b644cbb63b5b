use super::action::Direction;
use super::board::Board;

/// Rows on the matrix
pub const ROWS: u8 = 8;
/// Columns on the matrix
pub const COLS: u8 = 8;
/// Number of cells on the matrix
pub const CELLS: usize = (ROWS as usize) * (COLS as usize);

/// A cell on the 8x8 matrix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub fn new(row: u8, col: u8) -> Self {
        debug_assert!(row < ROWS && col < COLS, "({row}, {col}) is off the matrix");
        Self { row, col }
    }

    /// Position for a row-major cell index in `0..CELLS`
    pub fn from_index(index: usize) -> Self {
        Self::new((index / COLS as usize) as u8, (index % COLS as usize) as u8)
    }

    /// Row-major index of this cell
    pub fn index(&self) -> usize {
        self.row as usize * COLS as usize + self.col as usize
    }

    /// Move position by delta, wrapping around both edges
    pub fn wrapped_by(&self, d_row: i8, d_col: i8) -> Self {
        let row = (self.row as i16 + d_row as i16).rem_euclid(ROWS as i16);
        let col = (self.col as i16 + d_col as i16).rem_euclid(COLS as i16);
        Self::new(row as u8, col as u8)
    }

    /// Neighbouring cell in a direction on the torus
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (d_row, d_col) = direction.delta();
        self.wrapped_by(d_row, d_col)
    }

    /// True if `other` is one step away on the torus
    pub fn is_adjacent(&self, other: Position) -> bool {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
            .into_iter()
            .any(|d| self.moved_in_direction(d) == other)
    }
}

/// Complete game state, owned by the loop and handed to each phase by `&mut`
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub board: Board,
    pub direction: Direction,
    /// `None` only once the snake covers every cell
    pub food: Option<Position>,
    pub ticks: u64,
}

impl GameState {
    /// Create a new game state
    pub fn new(board: Board, direction: Direction, food: Option<Position>) -> Self {
        Self {
            board,
            direction,
            food,
            ticks: 0,
        }
    }

    /// Current snake length
    pub fn length(&self) -> usize {
        self.board.len()
    }

    pub fn is_food(&self, pos: Position) -> bool {
        self.food == Some(pos)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.board.is_occupied(pos)
    }
}
