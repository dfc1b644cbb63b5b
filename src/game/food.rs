use rand::Rng;
use rand::seq::IteratorRandom;

use super::board::Board;
use super::state::{CELLS, COLS, Position, ROWS};

/// Result of looking for a free cell to put food on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodPlacement {
    Placed(Position),
    /// The snake covers every cell
    BoardFull,
}

impl FoodPlacement {
    pub fn position(self) -> Option<Position> {
        match self {
            FoodPlacement::Placed(pos) => Some(pos),
            FoodPlacement::BoardFull => None,
        }
    }
}

/// Pick a random unoccupied cell.
///
/// Draws uniformly from the whole matrix up to `max_attempts` times. A long
/// snake can make every draw land on its body, in which case the free cells
/// are enumerated and one of them is chosen uniformly instead.
pub fn place_food<R: Rng>(board: &Board, rng: &mut R, max_attempts: u32) -> FoodPlacement {
    if board.is_full() {
        return FoodPlacement::BoardFull;
    }

    for _ in 0..max_attempts {
        let pos = Position::new(rng.gen_range(0..ROWS), rng.gen_range(0..COLS));
        if !board.is_occupied(pos) {
            return FoodPlacement::Placed(pos);
        }
    }

    tracing::warn!(
        length = board.len(),
        max_attempts,
        "random food draws exhausted, picking from free cells"
    );
    (0..CELLS)
        .map(Position::from_index)
        .filter(|&pos| !board.is_occupied(pos))
        .choose(rng)
        .map_or(FoodPlacement::BoardFull, FoodPlacement::Placed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::fixtures::board_missing_last_cell;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_food_avoids_snake() {
        let board = Board::initial();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let pos = place_food(&board, &mut rng, 64).position().unwrap();
            assert!(!board.is_occupied(pos));
        }
    }

    #[test]
    fn test_same_seed_same_food() {
        let board = Board::initial();
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            place_food(&board, &mut a, 64),
            place_food(&board, &mut b, 64)
        );
    }

    #[test]
    fn test_last_free_cell_found_without_random_draws() {
        let board = board_missing_last_cell();
        assert_eq!(board.len(), 63);

        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            place_food(&board, &mut rng, 0),
            FoodPlacement::Placed(Position::new(7, 0))
        );
    }

    #[test]
    fn test_full_board_reports_full() {
        let mut board = board_missing_last_cell();
        board.advance(Position::new(7, 0), true);
        assert!(board.is_full());

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(place_food(&board, &mut rng, 1_000), FoodPlacement::BoardFull);
    }
}
