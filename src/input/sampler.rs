use embedded_hal::digital::InputPin;

use crate::game::Direction;

/// Order in which simultaneously held buttons are considered, first wins.
///
/// A button that would reverse the snake is skipped, so the next one in this
/// list gets its turn.
pub const PRIORITY: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Down,
    Direction::Up,
];

/// Levels of the four button lines at one sample
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonLevels {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl ButtonLevels {
    pub fn is_pressed(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }
}

impl From<Direction> for ButtonLevels {
    fn from(direction: Direction) -> Self {
        let mut levels = Self::default();
        match direction {
            Direction::Up => levels.up = true,
            Direction::Down => levels.down = true,
            Direction::Left => levels.left = true,
            Direction::Right => levels.right = true,
        }
        levels
    }
}

/// Pick the direction for this tick from the held buttons.
///
/// Returns `None` when nothing usable is held: no buttons, or only the
/// button pointing back the way the snake came.
pub fn resolve_direction(current: Direction, levels: ButtonLevels) -> Option<Direction> {
    PRIORITY
        .into_iter()
        .filter(|&direction| levels.is_pressed(direction))
        .find(|&direction| !current.is_opposite(direction))
}

/// Four direction buttons, high while pressed. No debouncing: each sample is
/// the level at that instant.
pub struct ButtonPad<I> {
    up: I,
    down: I,
    left: I,
    right: I,
}

impl<I: InputPin> ButtonPad<I> {
    /// Lines in Up, Down, Left, Right order
    pub fn new([up, down, left, right]: [I; 4]) -> Self {
        Self {
            up,
            down,
            left,
            right,
        }
    }

    pub fn sample(&mut self) -> Result<ButtonLevels, I::Error> {
        Ok(ButtonLevels {
            up: self.up.is_high()?,
            down: self.down.is_high()?,
            left: self.left.is_high()?,
            right: self.right.is_high()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimButtons;

    #[test]
    fn test_nothing_pressed() {
        assert_eq!(
            resolve_direction(Direction::Right, ButtonLevels::default()),
            None
        );
    }

    #[test]
    fn test_single_press_turns() {
        assert_eq!(
            resolve_direction(Direction::Right, Direction::Up.into()),
            Some(Direction::Up)
        );
        assert_eq!(
            resolve_direction(Direction::Up, Direction::Left.into()),
            Some(Direction::Left)
        );
    }

    #[test]
    fn test_reversal_ignored() {
        assert_eq!(
            resolve_direction(Direction::Right, Direction::Left.into()),
            None
        );
        assert_eq!(
            resolve_direction(Direction::Down, Direction::Up.into()),
            None
        );
    }

    #[test]
    fn test_right_wins_simultaneous_presses() {
        let levels = ButtonLevels {
            up: true,
            down: false,
            left: false,
            right: true,
        };
        assert_eq!(
            resolve_direction(Direction::Down, levels),
            Some(Direction::Right)
        );
    }

    #[test]
    fn test_reversal_skipped_for_next_priority() {
        // Heading left: Right is a reversal, so Up is taken
        let levels = ButtonLevels {
            up: true,
            down: false,
            left: false,
            right: true,
        };
        assert_eq!(
            resolve_direction(Direction::Left, levels),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_no_reversal_through_intermediate_turn() {
        // Heading right with Up and Left held must never end up going left
        let levels = ButtonLevels {
            up: true,
            down: false,
            left: true,
            right: false,
        };
        assert_eq!(
            resolve_direction(Direction::Right, levels),
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_button_pad_samples_levels() {
        let buttons = SimButtons::new();
        let mut pad = ButtonPad::new(buttons.lines());

        assert_eq!(pad.sample().unwrap(), ButtonLevels::default());

        buttons.press(Direction::Down);
        buttons.press(Direction::Left);
        let levels = pad.sample().unwrap();
        assert!(levels.down && levels.left);
        assert!(!levels.up && !levels.right);
    }
}
