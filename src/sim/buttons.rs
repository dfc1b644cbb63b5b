use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin};

use crate::game::Direction;

fn bit(direction: Direction) -> u8 {
    match direction {
        Direction::Up => 0b0001,
        Direction::Down => 0b0010,
        Direction::Left => 0b0100,
        Direction::Right => 0b1000,
    }
}

/// Four direction buttons whose levels are set from the keyboard or a script
#[derive(Debug, Clone, Default)]
pub struct SimButtons {
    levels: Rc<Cell<u8>>,
}

impl SimButtons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input lines in Up, Down, Left, Right order
    pub fn lines(&self) -> [SimButton; 4] {
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ]
        .map(|direction| SimButton {
            levels: Rc::clone(&self.levels),
            mask: bit(direction),
        })
    }

    /// Hold a button down until `release_all`
    pub fn press(&self, direction: Direction) {
        self.levels.set(self.levels.get() | bit(direction));
    }

    pub fn release_all(&self) {
        self.levels.set(0);
    }

    pub fn is_pressed(&self, direction: Direction) -> bool {
        self.levels.get() & bit(direction) != 0
    }
}

/// One button line of [`SimButtons`]; high while pressed
#[derive(Debug)]
pub struct SimButton {
    levels: Rc<Cell<u8>>,
    mask: u8,
}

impl ErrorType for SimButton {
    type Error = Infallible;
}

impl InputPin for SimButton {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.levels.get() & self.mask != 0)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.levels.get() & self.mask == 0)
    }
}
