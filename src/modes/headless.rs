//! Headless run of the console on simulated pins.
//!
//! Buttons follow a script with one character per tick: `U`, `D`, `L`, `R`
//! hold that button for the tick, `.` holds nothing. Ticks past the end of
//! the script get no input. Holds are not waited out; the summary reports
//! how much time the run would have taken on hardware.

use anyhow::{Result, bail};
use tracing::info;

use crate::console::RoundPhase;
use crate::game::{Direction, GameConfig, StepOutcome};
use crate::sim::{self, ScanStats, SimButtons, SimConsole, SimMatrix};

/// Parse a button script, ignoring whitespace
pub fn parse_script(script: &str) -> Result<Vec<Option<Direction>>> {
    script
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '.' => Ok(None),
            c => match Direction::from_char(c) {
                Some(direction) => Ok(Some(direction)),
                None => bail!("unknown script step {:?}, expected U, D, L, R or .", c),
            },
        })
        .collect()
}

/// What a headless run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSummary {
    pub ticks: u64,
    pub rounds: u32,
    pub collisions: u32,
    pub food_eaten: u32,
    pub longest: usize,
    pub final_length: usize,
    /// Tick and flash holds the loop would have waited
    pub held_ms: u64,
    pub scan: ScanStats,
}

pub struct HeadlessMode {
    console: SimConsole,
    matrix: SimMatrix,
    buttons: SimButtons,
    script: Vec<Option<Direction>>,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, script: Vec<Option<Direction>>) -> Self {
        let (console, matrix, buttons) = sim::console(config);
        Self {
            console,
            matrix,
            buttons,
            script,
        }
    }

    pub fn run(&mut self, ticks: u64) -> Result<HeadlessSummary> {
        let mut summary = HeadlessSummary {
            ticks: 0,
            rounds: self.console.rounds(),
            collisions: 0,
            food_eaten: 0,
            longest: self.console.state().length(),
            final_length: self.console.state().length(),
            held_ms: 0,
            scan: ScanStats::default(),
        };

        for tick in 0..ticks {
            if let Some(Some(direction)) = self.script.get(tick as usize) {
                self.buttons.press(*direction);
            }
            let report = self.console.tick()?;
            self.buttons.release_all();

            match report.outcome {
                Some(StepOutcome::Collided) => summary.collisions += 1,
                Some(StepOutcome::Ate) | Some(StepOutcome::BoardFull) => summary.food_eaten += 1,
                Some(StepOutcome::Moved) | None => {}
            }
            if report.phase == RoundPhase::Running {
                summary.longest = summary.longest.max(self.console.state().length());
            }
            summary.held_ms += report.hold_ms as u64;
            summary.ticks += 1;
        }

        summary.rounds = self.console.rounds();
        summary.final_length = self.console.state().length();
        summary.scan = self.matrix.stats();

        info!(
            ticks = summary.ticks,
            rounds = summary.rounds,
            collisions = summary.collisions,
            food_eaten = summary.food_eaten,
            longest = summary.longest,
            final_length = summary.final_length,
            held_ms = summary.held_ms,
            scan_windows = summary.scan.windows,
            scan_overlaps = summary.scan.overlaps,
            "Headless run completed"
        );

        Ok(summary)
    }
}
