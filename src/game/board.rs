//! Snake body on the 8x8 matrix.
//!
//! The body is kept as a deque of positions with the head at the front and an
//! occupancy mask alongside it. A cell's age (1 for the head, `len()` for the
//! tail, 0 when empty) is derived from its place in the deque, so pushing a new
//! head ages every other segment by one without touching them.

use std::collections::VecDeque;

use thiserror::Error;

use super::state::{CELLS, COLS, Position, ROWS};

/// Row, first column and length of the snake a round starts with
const INITIAL_ROW: u8 = 3;
const INITIAL_TAIL_COL: u8 = 3;
pub const INITIAL_LENGTH: usize = 3;

/// Ways an age grid can fail to describe a single snake
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("no cell has age 1")]
    NoHead,
    #[error("{count} cells have age {age}")]
    DuplicateAge { age: u8, count: usize },
    #[error("age {missing} is missing from a snake of {occupied} cells")]
    Gap { missing: u8, occupied: usize },
    #[error("segment of age {age} at {pos:?} is not adjacent to the previous segment")]
    Disconnected { age: u8, pos: Position },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    body: VecDeque<Position>,
    occupied: u64,
}

impl Board {
    /// The three-segment snake on row 3, head at column 5
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for col in INITIAL_TAIL_COL..INITIAL_TAIL_COL + INITIAL_LENGTH as u8 {
            board.advance(Position::new(INITIAL_ROW, col), true);
        }
        board
    }

    fn empty() -> Self {
        Self {
            body: VecDeque::with_capacity(CELLS),
            occupied: 0,
        }
    }

    /// Build a board from an age grid, rejecting anything that is not one
    /// contiguous snake with ages `1..=n`.
    pub fn from_ages(ages: &[[u8; COLS as usize]; ROWS as usize]) -> Result<Self, BoardError> {
        let mut by_age: Vec<Vec<Position>> = vec![Vec::new(); CELLS + 1];
        let mut occupied = 0;
        for (row, cells) in ages.iter().enumerate() {
            for (col, &age) in cells.iter().enumerate() {
                if age > 0 {
                    occupied += 1;
                    if (age as usize) <= CELLS {
                        by_age[age as usize].push(Position::new(row as u8, col as u8));
                    }
                }
            }
        }

        if by_age[1].is_empty() {
            return Err(BoardError::NoHead);
        }

        let mut board = Self::empty();
        for age in 1..=occupied {
            let cells = &by_age[age];
            match cells.len() {
                0 => {
                    return Err(BoardError::Gap {
                        missing: age as u8,
                        occupied,
                    });
                }
                1 => {}
                count => {
                    return Err(BoardError::DuplicateAge {
                        age: age as u8,
                        count,
                    });
                }
            }
            let pos = cells[0];
            if let Some(&prev) = board.body.back() {
                if !prev.is_adjacent(pos) {
                    return Err(BoardError::Disconnected {
                        age: age as u8,
                        pos,
                    });
                }
            }
            board.body.push_back(pos);
            board.occupied |= 1u64 << pos.index();
        }
        Ok(board)
    }

    pub fn head(&self) -> Position {
        self.body[0]
    }

    #[cfg(test)]
    pub(crate) fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.body.len() == CELLS
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.occupied & (1u64 << pos.index()) != 0
    }

    /// Segments from head to tail
    pub fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Ticks since `pos` became the head, or 0 if the cell is empty
    pub fn age(&self, pos: Position) -> u8 {
        if !self.is_occupied(pos) {
            return 0;
        }
        self.body
            .iter()
            .position(|&segment| segment == pos)
            .map_or(0, |index| index as u8 + 1)
    }

    /// Age of every cell, row-major
    pub fn ages(&self) -> [[u8; COLS as usize]; ROWS as usize] {
        let mut grid = [[0; COLS as usize]; ROWS as usize];
        for (index, pos) in self.body.iter().enumerate() {
            grid[pos.row as usize][pos.col as usize] = index as u8 + 1;
        }
        grid
    }

    /// Place a new head. Without `grow` the tail cell is vacated, so the
    /// snake slides forward and keeps its length.
    pub fn advance(&mut self, head: Position, grow: bool) {
        if !grow {
            if let Some(tail) = self.body.pop_back() {
                self.occupied &= !(1u64 << tail.index());
            }
        }
        self.body.push_front(head);
        self.occupied |= 1u64 << head.index();
        self.debug_check();
    }

    fn debug_check(&self) {
        debug_assert_eq!(
            self.occupied.count_ones() as usize,
            self.body.len(),
            "occupancy mask disagrees with body: the head overlapped a segment"
        );
        debug_assert!(
            self.body
                .iter()
                .zip(self.body.iter().skip(1))
                .all(|(a, b)| a.is_adjacent(*b)),
            "snake body is not contiguous"
        );
    }
}
