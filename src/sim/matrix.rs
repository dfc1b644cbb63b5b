use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};

use crate::game::state::{COLS, ROWS};
use crate::render::Frame;

const NANOS_PER_MICRO: u64 = 1_000;
const NANOS_PER_MILLI: u64 = 1_000_000;

/// Counters collected while the simulated matrix is being scanned
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Holds with exactly one row and one column active
    pub windows: u64,
    /// Holds with more than one row or column active at once
    pub overlaps: u64,
    /// Completed passes over the last row
    pub refreshes: u64,
    /// Virtual time spent in delays
    pub elapsed_ns: u64,
}

impl ScanStats {
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ns / NANOS_PER_MILLI
    }
}

#[derive(Debug, Default)]
struct Latch {
    rows_high: u8,
    cols_low: u8,
    building: Frame,
    shown: Frame,
    stats: ScanStats,
}

impl Latch {
    fn drive_row(&mut self, row: u8, high: bool) {
        let bit = 1 << row;
        let was_high = self.rows_high & bit != 0;
        if high {
            self.rows_high |= bit;
        } else {
            self.rows_high &= !bit;
            if was_high && row == ROWS - 1 {
                self.shown = std::mem::take(&mut self.building);
                self.stats.refreshes += 1;
            }
        }
    }

    fn drive_column(&mut self, col: u8, high: bool) {
        let bit = 1 << col;
        if high {
            self.cols_low &= !bit;
        } else {
            self.cols_low |= bit;
        }
    }

    fn hold(&mut self, ns: u64) {
        self.stats.elapsed_ns += ns;
        match (self.rows_high.count_ones(), self.cols_low.count_ones()) {
            (0, _) | (_, 0) => {}
            (1, 1) => {
                self.stats.windows += 1;
                let row = self.rows_high.trailing_zeros() as u8;
                let col = self.cols_low.trailing_zeros() as u8;
                self.building.set(row, col);
            }
            _ => self.stats.overlaps += 1,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LineKind {
    Row(u8),
    Column(u8),
}

/// An 8x8 LED matrix that records what a scanner would have shown.
///
/// Lines and delays handed out by one `SimMatrix` share its latch, so the
/// matrix sees every pin change and every hold in order.
#[derive(Debug, Clone, Default)]
pub struct SimMatrix {
    latch: Rc<RefCell<Latch>>,
}

impl SimMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_lines(&self) -> [SimLine; ROWS as usize] {
        std::array::from_fn(|row| self.line(LineKind::Row(row as u8)))
    }

    pub fn column_lines(&self) -> [SimLine; COLS as usize] {
        std::array::from_fn(|col| self.line(LineKind::Column(col as u8)))
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay {
            latch: Rc::clone(&self.latch),
        }
    }

    /// Last completely scanned frame
    pub fn shown(&self) -> Frame {
        self.latch.borrow().shown
    }

    pub fn stats(&self) -> ScanStats {
        self.latch.borrow().stats
    }

    /// Bitmasks of the rows driven high and the columns driven low
    pub fn active_lines(&self) -> (u8, u8) {
        let latch = self.latch.borrow();
        (latch.rows_high, latch.cols_low)
    }

    fn line(&self, kind: LineKind) -> SimLine {
        SimLine {
            latch: Rc::clone(&self.latch),
            kind,
        }
    }
}

/// One row or column output of a [`SimMatrix`]
#[derive(Debug)]
pub struct SimLine {
    latch: Rc<RefCell<Latch>>,
    kind: LineKind,
}

impl SimLine {
    fn drive(&mut self, high: bool) {
        let mut latch = self.latch.borrow_mut();
        match self.kind {
            LineKind::Row(row) => latch.drive_row(row, high),
            LineKind::Column(col) => latch.drive_column(col, high),
        }
    }
}

impl ErrorType for SimLine {
    type Error = Infallible;
}

impl OutputPin for SimLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.drive(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.drive(true);
        Ok(())
    }
}

/// Delay that advances the matrix's virtual clock instead of sleeping
#[derive(Debug)]
pub struct SimDelay {
    latch: Rc<RefCell<Latch>>,
}

impl SimDelay {
    fn hold(&mut self, ns: u64) {
        self.latch.borrow_mut().hold(ns);
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.hold(ns as u64);
    }

    fn delay_us(&mut self, us: u32) {
        self.hold(us as u64 * NANOS_PER_MICRO);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.hold(ms as u64 * NANOS_PER_MILLI);
    }
}
