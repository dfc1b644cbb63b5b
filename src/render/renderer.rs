use ratatui::{
    Frame as TerminalFrame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::frame::Frame;
use crate::console::RoundPhase;
use crate::game::GameState;
use crate::game::state::{COLS, ROWS};

/// Everything the terminal view shows for one draw
pub struct MatrixView<'a> {
    /// Last frame the scanner completed on the simulated matrix
    pub shown: Frame,
    pub state: &'a GameState,
    pub phase: RoundPhase,
    pub rounds: u32,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut TerminalFrame, view: &MatrixView) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Matrix
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view), chunks[0]);

        let matrix_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(40),
                Constraint::Percentage(30),
            ])
            .split(chunks[1])[1];
        frame.render_widget(self.render_matrix(view), matrix_area);

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_matrix(&self, view: &MatrixView) -> Paragraph<'_> {
        let flashing = view.phase == RoundPhase::Flashing;
        let lit_style = if flashing {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        let food = view.state.food;

        let mut lines = vec![Line::from("")];
        for row in 0..ROWS {
            let spans: Vec<Span> = (0..COLS)
                .map(|col| {
                    if !view.shown.is_lit(row, col) {
                        Span::styled("· ", Style::default().fg(Color::DarkGray))
                    } else if !flashing && food.is_some_and(|f| (f.row, f.col) == (row, col)) {
                        Span::styled(
                            "● ",
                            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled("● ", lit_style)
                    }
                })
                .collect();
            lines.push(Line::from(spans));
        }

        let (title, border) = if flashing {
            (" GAME OVER ", Color::Red)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, view: &MatrixView) -> Paragraph<'_> {
        let phase = match view.phase {
            RoundPhase::Running => "running",
            RoundPhase::Collided => "collided",
            RoundPhase::Flashing => "game over",
            RoundPhase::Reset => "reset",
        };
        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.state.length().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Round: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.rounds.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                view.state.ticks.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled(phase, Style::default().fg(Color::Cyan)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to press a button | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Board, Direction, Position};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(view: &MatrixView) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|frame| Renderer::new().render(frame, view))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_draws_length_and_leds() {
        let state = GameState::new(Board::initial(), Direction::Right, Some(Position::new(0, 0)));
        let view = MatrixView {
            shown: Frame::from_state(&state),
            state: &state,
            phase: RoundPhase::Running,
            rounds: 1,
        };

        let screen = draw(&view);
        assert!(screen.contains("Length: 3"));
        assert_eq!(screen.matches('●').count(), 4);
    }

    #[test]
    fn test_flash_shows_game_over() {
        let state = GameState::new(Board::initial(), Direction::Right, None);
        let view = MatrixView {
            shown: Frame::full(),
            state: &state,
            phase: RoundPhase::Flashing,
            rounds: 2,
        };

        let screen = draw(&view);
        assert!(screen.contains("GAME OVER"));
        assert_eq!(screen.matches('●').count(), 64);
    }
}
