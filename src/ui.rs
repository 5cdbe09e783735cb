use anyhow::Result;
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};

use crate::board::{Cell, GRID_HEIGHT, GRID_WIDTH};
use crate::driver::Renderer;
use crate::game::GameState;
use crate::piece::Colour;

// ============================================================================
// Visual Constants
// ============================================================================

const CELL_WIDTH: u16 = 2;
const BLOCK_CHAR: &str = "██";
const EMPTY_CHAR: &str = "  ";
const PREVIEW_WIDTH: u16 = 12;
const INFO_WIDTH: u16 = 16;

fn colour(c: Colour) -> Color {
    match c {
        Colour::Cyan => Color::Cyan,
        Colour::Blue => Color::Blue,
        Colour::Orange => Color::Rgb(255, 165, 0),
        Colour::Yellow => Color::Yellow,
        Colour::Green => Color::Green,
        Colour::Purple => Color::Magenta,
        Colour::Red => Color::Red,
    }
}

// ============================================================================
// Renderer
// ============================================================================

pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
}

impl<B: Backend> TerminalRenderer<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self { terminal }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Renderer for TerminalRenderer<B> {
    fn render(&mut self, state: &GameState) -> Result<()> {
        self.terminal.draw(|frame| draw(frame, state))?;
        Ok(())
    }
}

// ============================================================================
// Drawing
// ============================================================================

pub fn draw(frame: &mut Frame, state: &GameState) {
    let area = frame.size();
    let grid_display_width = (GRID_WIDTH as u16 * CELL_WIDTH) + 2;
    let grid_display_height = GRID_HEIGHT as u16 + 2;
    let total_width = grid_display_width + PREVIEW_WIDTH + INFO_WIDTH;
    let main_area = centered_rect(total_width, grid_display_height + 2, area);

    let vertical = Layout::vertical([
        Constraint::Length(grid_display_height),
        Constraint::Fill(1),
    ])
    .split(main_area);

    let horizontal = Layout::horizontal([
        Constraint::Length(grid_display_width),
        Constraint::Length(PREVIEW_WIDTH),
        Constraint::Length(INFO_WIDTH),
    ])
    .split(vertical[0]);

    draw_board(frame, state, horizontal[0]);
    draw_preview(frame, state, horizontal[1]);
    draw_info(frame, state, horizontal[2]);

    let controls = Paragraph::new(Line::from(
        "A/D: Move | S: Drop | W: Rotate | R: Restart | Q: Quit",
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(controls, vertical[1]);

    if state.is_game_over() {
        draw_game_over(frame, state, area);
    }
}

fn draw_board(frame: &mut Frame, state: &GameState, area: Rect) {
    let (title, title_style) = if state.is_game_over() {
        (" Game Over ", Style::default().fg(Color::Red))
    } else {
        (" Tetris ", Style::default())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, title_style))
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The active piece is already stamped on the board.
    let lines: Vec<Line> = state
        .board
        .rows()
        .iter()
        .map(|row| {
            Line::from(
                row.iter()
                    .map(|cell| match cell {
                        Cell::Empty => Span::raw(EMPTY_CHAR),
                        Cell::Filled(c) => {
                            Span::styled(BLOCK_CHAR, Style::default().fg(colour(*c)))
                        }
                    })
                    .collect::<Vec<_>>(),
            )
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_preview(frame: &mut Frame, state: &GameState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Next ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let next = state.next_kind();
    let style = Style::default().fg(colour(next.colour()));
    let mut lines = vec![Line::from("")];
    for row in next.preview_shape() {
        let mut spans = vec![Span::raw(" ")];
        spans.extend(row.iter().map(|cell| {
            if *cell != 0 {
                Span::styled(BLOCK_CHAR, style)
            } else {
                Span::raw(EMPTY_CHAR)
            }
        }));
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_info(frame: &mut Frame, state: &GameState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Info ")
        .title_alignment(Alignment::Center);

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled("Level", Style::default().fg(Color::Green))),
        Line::from(format!("{}", state.level)),
        Line::from(""),
        Line::from(Span::styled("Score", Style::default().fg(Color::Yellow))),
        Line::from(format!("{}", state.score)),
        Line::from(""),
        Line::from(Span::styled("High Score", Style::default().fg(Color::Cyan))),
        Line::from(format!("{}", state.high_score)),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

fn draw_game_over(frame: &mut Frame, state: &GameState, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("GAME OVER", Style::default().fg(Color::Red))),
        Line::from(""),
        Line::from(format!("Score: {}", state.score)),
        Line::from(format!("Best: {}", state.high_score)),
        Line::from(""),
        Line::from(Span::styled("R to restart", Style::default().fg(Color::DarkGray))),
    ];

    let popup = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(Color::Black)),
    );
    frame.render_widget(popup, centered_rect(22, 9, area));
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width.min(area.width)),
        Constraint::Fill(1),
    ])
    .split(area);

    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .split(horizontal[1]);

    vertical[1]
}
