//! Row-multiplexed scan of the LED matrix.
//!
//! Rows are active high, columns active low. A refresh walks the rows in
//! order and gives every lit LED its own window with exactly one row and one
//! column driven, so no two LEDs are ever lit by the same pair of lines.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use super::frame::Frame;
use crate::game::state::{COLS, ROWS};

pub struct MatrixScanner<R, C> {
    rows: [R; ROWS as usize],
    cols: [C; COLS as usize],
}

impl<R, C, E> MatrixScanner<R, C>
where
    R: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
{
    /// Take ownership of the lines and switch every LED off
    pub fn new(rows: [R; ROWS as usize], cols: [C; COLS as usize]) -> Result<Self, E> {
        let mut scanner = Self { rows, cols };
        scanner.blank()?;
        Ok(scanner)
    }

    /// Deassert every row and column
    pub fn blank(&mut self) -> Result<(), E> {
        for col in self.cols.iter_mut() {
            col.set_high()?;
        }
        for row in self.rows.iter_mut() {
            row.set_low()?;
        }
        Ok(())
    }

    /// Show `frame` once, holding each lit LED for `persistence_ms`
    pub fn refresh<D: DelayNs>(
        &mut self,
        frame: &Frame,
        delay: &mut D,
        persistence_ms: u32,
    ) -> Result<(), E> {
        for (r, row) in self.rows.iter_mut().enumerate() {
            row.set_high()?;
            for (c, col) in self.cols.iter_mut().enumerate() {
                if frame.is_lit(r as u8, c as u8) {
                    col.set_low()?;
                    delay.delay_ms(persistence_ms);
                    col.set_high()?;
                }
            }
            row.set_low()?;
        }
        Ok(())
    }
}
