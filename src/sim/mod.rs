//! Simulated pins and delay for running the console off-hardware.

pub mod buttons;
pub mod matrix;

pub use buttons::{SimButton, SimButtons};
pub use matrix::{ScanStats, SimDelay, SimLine, SimMatrix};

use crate::console::Console;
use crate::game::GameConfig;
use crate::input::ButtonPad;
use crate::render::MatrixScanner;

pub type SimConsole = Console<SimLine, SimLine, SimButton, SimDelay>;

/// Wire a console to a fresh simulated matrix and button set
pub fn console(config: GameConfig) -> (SimConsole, SimMatrix, SimButtons) {
    let matrix = SimMatrix::new();
    let buttons = SimButtons::new();
    let Ok(scanner) = MatrixScanner::new(matrix.row_lines(), matrix.column_lines());
    let console = Console::new(
        config,
        scanner,
        ButtonPad::new(buttons.lines()),
        matrix.delay(),
    );
    (console, matrix, buttons)
}
