//! Terminal simulator for the LED matrix console.
//!
//! The console drives simulated pins exactly as it would drive the real
//! matrix; the terminal shows whatever frame the last complete scan left on
//! the simulated LEDs. Ticks are paced by a monotonic timer that is re-armed
//! with each tick's requested hold, so the flash after a collision stays up
//! for its full duration while keys and redraws keep being serviced.

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep};

use crate::console::TickReport;
use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::render::renderer::MatrixView;
use crate::sim::{self, SimButtons, SimConsole, SimMatrix};

pub struct SimulateMode {
    console: SimConsole,
    matrix: SimMatrix,
    buttons: SimButtons,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl SimulateMode {
    pub fn new(config: GameConfig) -> Self {
        let (console, matrix, buttons) = sim::console(config);

        Self {
            console,
            matrix,
            buttons,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Redraw at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        // First tick fires immediately, later ones after the hold each tick asks for
        let next_tick = sleep(Duration::ZERO);
        tokio::pin!(next_tick);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game tick
                () = &mut next_tick => {
                    let report = self.tick()?;
                    let hold = Duration::from_millis(report.hold_ms as u64);
                    next_tick.as_mut().reset(Instant::now() + hold);
                }

                // Render frame
                _ = render_timer.tick() => {
                    let view = MatrixView {
                        shown: self.matrix.shown(),
                        state: self.console.state(),
                        phase: self.console.phase(),
                        rounds: self.console.rounds(),
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Press(direction) => self.buttons.press(direction),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    /// Run one console tick. Buttons pressed since the last tick are held
    /// through the sample and released afterwards.
    fn tick(&mut self) -> Result<TickReport> {
        let report = self.console.tick().context("Console tick failed")?;
        self.buttons.release_all();
        Ok(report)
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
