use super::{
    action::{Action, Direction},
    board::Board,
    config::GameConfig,
    food::{FoodPlacement, place_food},
    state::{GameState, Position},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// What a tick did to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Slid forward one cell
    Moved,
    /// Ate the food and grew; new food has been placed
    Ate,
    /// Ate the food and now covers every cell, so no food was placed
    BoardFull,
    /// The next cell belongs to the snake; nothing was committed
    Collided,
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub outcome: StepOutcome,
    /// Cell the head moved to, or would have moved to on a collision
    pub target: Position,
}

impl StepResult {
    pub fn collided(&self) -> bool {
        self.outcome == StepOutcome::Collided
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a round: initial snake heading right, fresh food
    pub fn reset(&mut self) -> GameState {
        let board = Board::initial();
        let food = self.place_food(&board).position();
        GameState::new(board, Direction::Right, food)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        // Update direction based on action (prevent 180° turns)
        if let Action::Move(new_direction) = action {
            if !state.direction.is_opposite(new_direction) {
                state.direction = new_direction;
            }
        }

        let target = state.board.head().moved_in_direction(state.direction);

        // Only committed moves count as ticks
        let outcome = if state.is_food(target) {
            state.board.advance(target, true);
            state.ticks += 1;
            match self.place_food(&state.board) {
                FoodPlacement::Placed(pos) => {
                    state.food = Some(pos);
                    StepOutcome::Ate
                }
                FoodPlacement::BoardFull => {
                    state.food = None;
                    StepOutcome::BoardFull
                }
            }
        } else if state.board.is_occupied(target) {
            StepOutcome::Collided
        } else {
            state.board.advance(target, false);
            state.ticks += 1;
            StepOutcome::Moved
        };

        StepResult { outcome, target }
    }

    fn place_food(&mut self, board: &Board) -> FoodPlacement {
        place_food(board, &mut self.rng, self.config.max_food_attempts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::board::fixtures::board_missing_last_cell;

    fn engine() -> GameEngine {
        GameEngine::new(GameConfig::seeded(11))
    }

    /// Initial snake with food parked where the tests won't reach it
    fn quiet_state() -> GameState {
        GameState::new(Board::initial(), Direction::Right, Some(Position::new(7, 0)))
    }

    fn head_count(state: &GameState) -> usize {
        state.board.ages().iter().flatten().filter(|&&age| age == 1).count()
    }

    fn occupied_count(state: &GameState) -> usize {
        state.board.ages().iter().flatten().filter(|&&age| age > 0).count()
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert_eq!(state.length(), 3);
        assert_eq!(state.direction, Direction::Right);
        assert_eq!(state.ticks, 0);
        let food = state.food.unwrap();
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_slide_forward() {
        let mut engine = engine();
        let mut state = quiet_state();

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(result.outcome, StepOutcome::Moved);
        assert_eq!(state.board.head(), Position::new(3, 6));
        assert_eq!(state.board.age(Position::new(3, 3)), 0);
        assert_eq!(state.board.age(Position::new(3, 4)), 3);
        assert_eq!(state.board.age(Position::new(3, 5)), 2);
        assert_eq!(state.length(), 3);
        assert_eq!(state.ticks, 1);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = engine();
        let mut state = quiet_state();
        state.food = Some(Position::new(3, 6));

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(result.outcome, StepOutcome::Ate);
        assert_eq!(state.length(), 4);
        assert!(state.is_occupied_by_snake(Position::new(3, 3)));
        assert_eq!(state.board.age(Position::new(3, 3)), 4);
        let food = state.food.unwrap();
        assert_ne!(food, Position::new(3, 6));
        assert!(!state.is_occupied_by_snake(food));
    }

    #[test]
    fn test_wraps_around_edges() {
        let mut engine = engine();
        let mut state = quiet_state();
        state.food = None;

        // Head at (3, 5): two steps right reach column 7, the third wraps to 0
        for _ in 0..3 {
            engine.step(&mut state, Action::Continue);
        }
        assert_eq!(state.board.head(), Position::new(3, 0));

        engine.step(&mut state, Action::Move(Direction::Up));
        engine.step(&mut state, Action::Continue);
        engine.step(&mut state, Action::Continue);
        engine.step(&mut state, Action::Continue);
        assert_eq!(state.board.head(), Position::new(7, 0));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = quiet_state();

        let result = engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.direction, Direction::Right);
        assert_eq!(result.outcome, StepOutcome::Moved);
        assert_eq!(state.board.head(), Position::new(3, 6));
    }

    #[test]
    fn test_self_collision() {
        let mut engine = engine();
        let mut state = quiet_state();
        state.food = Some(Position::new(3, 6));

        // Grow to five so a tight loop bites the body
        engine.step(&mut state, Action::Continue);
        state.food = Some(Position::new(4, 6));
        engine.step(&mut state, Action::Move(Direction::Down));
        state.food = None;
        assert_eq!(state.length(), 5);

        engine.step(&mut state, Action::Move(Direction::Left));
        let before = state.clone();
        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.collided());
        assert_eq!(result.target, Position::new(3, 5));
        assert_eq!(state.board, before.board);
        assert_eq!(state.ticks, before.ticks);
    }

    #[test]
    fn test_moving_into_tail_collides() {
        let mut engine = engine();
        // Square loop: head (4,4) with the tail directly above it
        let mut ages = [[0u8; 8]; 8];
        ages[4][4] = 1;
        ages[4][5] = 2;
        ages[3][5] = 3;
        ages[3][4] = 4;
        let mut state = GameState::new(Board::from_ages(&ages).unwrap(), Direction::Left, None);

        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.collided());
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let mut engine = engine();
        let mut state = engine.reset();
        let turns = [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
        ];

        for tick in 0..500 {
            let action = if tick % 5 == 0 {
                Action::Move(turns[(tick / 5) % turns.len()])
            } else {
                Action::Continue
            };
            let result = engine.step(&mut state, action);
            if result.collided() {
                state = engine.reset();
                continue;
            }
            assert_eq!(head_count(&state), 1);
            assert_eq!(occupied_count(&state), state.length());
            if let Some(food) = state.food {
                assert!(!state.is_occupied_by_snake(food));
            }
        }
    }

    #[test]
    fn test_eating_last_free_cell_fills_board() {
        let mut engine = engine();
        let board = board_missing_last_cell();
        let mut state = GameState::new(board, Direction::Left, Some(Position::new(7, 0)));

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(result.outcome, StepOutcome::BoardFull);
        assert_eq!(state.length(), 64);
        assert_eq!(state.food, None);

        // Nowhere left to go
        let result = engine.step(&mut state, Action::Continue);
        assert!(result.collided());
    }
}
