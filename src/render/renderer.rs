use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameState, Position};
use crate::metrics::GameMetrics;

const BACKGROUND: Color = Color::Rgb(0x23, 0x23, 0x23);
const SNAKE: Color = Color::Rgb(0x00, 0xC8, 0x32);
const HEAD: Color = Color::Cyan;
const APPLE: Color = Color::Rgb(0xFF, 0x00, 0x00);

/// Maps board cells onto a drawing area.
///
/// Cell `c` starts at `round(c * width / cols)`; its size is the gap to the
/// next cell's start, so the board always fills the area edge to edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellGeometry {
    area: Rect,
    cols: i32,
    rows: i32,
}

impl CellGeometry {
    pub fn new(area: Rect, cols: i32, rows: i32) -> Self {
        Self { area, cols, rows }
    }

    fn scale(index: i32, extent: u16, count: i32) -> u16 {
        (f64::from(index) * f64::from(extent) / f64::from(count)).round() as u16
    }

    /// Screen rectangle covered by a board cell
    pub fn cell_rect(&self, pos: Position) -> Rect {
        let x0 = Self::scale(pos.x, self.area.width, self.cols);
        let x1 = Self::scale(pos.x + 1, self.area.width, self.cols);
        let y0 = Self::scale(pos.y, self.area.height, self.rows);
        let y1 = Self::scale(pos.y + 1, self.area.height, self.rows);

        Rect::new(
            self.area.x + x0,
            self.area.y + y0,
            x1.saturating_sub(x0),
            y1.saturating_sub(y0),
        )
    }

    /// Paint a board cell into the buffer
    pub fn fill(&self, buf: &mut Buffer, pos: Position, color: Color) {
        let rect = self.cell_rect(pos).intersection(*buf.area());
        buf.set_style(rect, Style::default().bg(color));
    }
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, state: &GameState, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Board
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(Color::White))
            .title(" Snake ");
        let board_area = board_block.inner(chunks[1]);
        frame.render_widget(board_block, chunks[1]);

        self.render_board(frame.buffer_mut(), board_area, state);

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Draw the background, every snake segment and the apple
    pub fn render_board(&self, buf: &mut Buffer, area: Rect, state: &GameState) {
        buf.set_style(area, Style::default().bg(BACKGROUND));

        let geometry = CellGeometry::new(area, state.cols, state.rows);
        for (index, segment) in state.snake.iter().enumerate() {
            let color = if index == 0 { HEAD } else { SNAKE };
            geometry.fill(buf, *segment, color);
        }
        geometry.fill(buf, state.apple, APPLE);
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("Length: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.snake.len().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_length.to_string(),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Crashes: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.crashes.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
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
