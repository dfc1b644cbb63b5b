//! The game loop as it runs on the matrix: sample buttons, step the game,
//! handle collisions, scan the frame, wait.
//!
//! A collision does not end anything. The round goes through
//! `Collided -> Flashing -> Reset -> Running`: the whole matrix is lit and
//! held, then the initial snake comes back with fresh food.

use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};
use thiserror::Error;
use tracing::{debug, info};

use crate::game::{Action, GameConfig, GameEngine, GameState, StepOutcome};
use crate::input::{ButtonPad, resolve_direction};
use crate::render::{Frame, MatrixScanner};

/// Where the current round is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Running,
    /// The head hit the body; the flash has not been shown yet
    Collided,
    /// The all-on frame is being held
    Flashing,
    /// The board is being rebuilt
    Reset,
}

/// What one call to [`Console::tick`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Phase after the tick
    pub phase: RoundPhase,
    /// Outcome of the move, if the snake moved this tick
    pub outcome: Option<StepOutcome>,
    /// How long to wait before the next tick
    pub hold_ms: u32,
}

#[derive(Debug, Error)]
pub enum ConsoleError<O, I> {
    #[error("matrix output line failed: {0:?}")]
    Matrix(O),
    #[error("button input line failed: {0:?}")]
    Buttons(I),
}

pub struct Console<R, C, I, D> {
    engine: GameEngine,
    state: GameState,
    phase: RoundPhase,
    rounds: u32,
    scanner: MatrixScanner<R, C>,
    buttons: ButtonPad<I>,
    delay: D,
}

impl<R, C, I, D, E> Console<R, C, I, D>
where
    R: OutputPin<Error = E>,
    C: OutputPin<Error = E>,
    I: InputPin,
    D: DelayNs,
{
    pub fn new(
        config: GameConfig,
        scanner: MatrixScanner<R, C>,
        buttons: ButtonPad<I>,
        delay: D,
    ) -> Self {
        let mut engine = GameEngine::new(config);
        let state = engine.reset();
        info!(food = ?state.food, "round 1 started");
        Self {
            engine,
            state,
            phase: RoundPhase::Running,
            rounds: 1,
            scanner,
            buttons,
            delay,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Rounds started so far, counting the current one
    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    /// Advance by one phase step and report how long to hold afterwards
    pub fn tick(&mut self) -> Result<TickReport, ConsoleError<E, I::Error>> {
        match self.phase {
            RoundPhase::Running => self.play(),
            RoundPhase::Collided => self.flash(),
            RoundPhase::Flashing | RoundPhase::Reset => self.restart(),
        }
    }

    /// Tick forever, pacing with the console's own delay
    pub fn run(&mut self) -> Result<Infallible, ConsoleError<E, I::Error>> {
        loop {
            let report = self.tick()?;
            self.delay.delay_ms(report.hold_ms);
        }
    }

    fn play(&mut self) -> Result<TickReport, ConsoleError<E, I::Error>> {
        let levels = self.buttons.sample().map_err(ConsoleError::Buttons)?;
        let action = Action::from(resolve_direction(self.state.direction, levels));
        let result = self.engine.step(&mut self.state, action);
        debug!(
            tick = self.state.ticks,
            outcome = ?result.outcome,
            target = ?result.target,
            length = self.state.length(),
            "tick"
        );

        match result.outcome {
            StepOutcome::Collided => {
                info!(
                    at = ?result.target,
                    length = self.state.length(),
                    round = self.rounds,
                    "self-collision"
                );
                self.phase = RoundPhase::Collided;
                return self.flash().map(|report| TickReport {
                    outcome: Some(StepOutcome::Collided),
                    ..report
                });
            }
            StepOutcome::BoardFull => {
                info!(length = self.state.length(), "board full, no food left to place");
            }
            StepOutcome::Ate | StepOutcome::Moved => {}
        }

        self.render()?;
        Ok(TickReport {
            phase: self.phase,
            outcome: Some(result.outcome),
            hold_ms: self.engine.config().tick_ms,
        })
    }

    fn flash(&mut self) -> Result<TickReport, ConsoleError<E, I::Error>> {
        let persistence_ms = self.engine.config().persistence_ms;
        self.scanner
            .refresh(&Frame::full(), &mut self.delay, persistence_ms)
            .map_err(ConsoleError::Matrix)?;
        self.phase = RoundPhase::Flashing;
        Ok(TickReport {
            phase: self.phase,
            outcome: None,
            hold_ms: self.engine.config().flash_ms,
        })
    }

    fn restart(&mut self) -> Result<TickReport, ConsoleError<E, I::Error>> {
        self.phase = RoundPhase::Reset;
        self.state = self.engine.reset();
        self.rounds += 1;
        self.phase = RoundPhase::Running;
        info!(round = self.rounds, food = ?self.state.food, "round started");

        self.render()?;
        Ok(TickReport {
            phase: self.phase,
            outcome: None,
            hold_ms: self.engine.config().tick_ms,
        })
    }

    fn render(&mut self) -> Result<(), ConsoleError<E, I::Error>> {
        let persistence_ms = self.engine.config().persistence_ms;
        self.scanner
            .refresh(&Frame::from_state(&self.state), &mut self.delay, persistence_ms)
            .map_err(ConsoleError::Matrix)
    }
}
