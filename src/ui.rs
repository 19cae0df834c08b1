//! Terminal rendering of the scenario with ratatui
//!
//! Pure output: nothing here mutates game state. The layout is a HOLD box on
//! the left, the field in the middle, and the NEXT queue plus score panel on
//! the right, with pause/game-over overlays on top.

use crate::cell::CellColor;
use crate::field::Field;
use crate::scenario::{Scenario, ScenarioState};
use crate::tetromino::{Tetromino, TetrominoKind};
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const BLOCK: &str = "██";
const GHOST: &str = "░░";
const EMPTY: &str = "  ";

/// Hidden rows drawn above the visible field so spawns peek in from the top
const VISIBLE_BUFFER: usize = 2;

const HOLD_WIDTH: u16 = 12;
const FIELD_WIDTH: u16 = Field::COLUMNS as u16 * 2 + 2;
const SIDE_WIDTH: u16 = 16;
const GAME_WIDTH: u16 = HOLD_WIDTH + FIELD_WIDTH + SIDE_WIDTH;
const GAME_HEIGHT: u16 = (Field::VISIBLE_ROWS + VISIBLE_BUFFER) as u16 + 2;

/// Render the whole game screen
pub fn render(frame: &mut Frame, scenario: &Scenario, theme: &Theme) {
    let area = center_rect(frame.area(), GAME_WIDTH, GAME_HEIGHT);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(HOLD_WIDTH),
            Constraint::Length(FIELD_WIDTH),
            Constraint::Length(SIDE_WIDTH),
        ])
        .split(area);

    render_hold(frame, columns[0], scenario.held(), theme);
    render_field(frame, columns[1], scenario, theme);
    render_side(frame, columns[2], scenario, theme);

    if scenario.is_paused() {
        render_overlay(frame, area, "PAUSED", Color::Yellow, None);
    } else if scenario.state() == ScenarioState::GameOver {
        let score = format!("{} points", scenario.score().points());
        render_overlay(frame, area, "GAME OVER", Color::Red, Some(&score));
    }
}

fn render_field(frame: &mut Frame, area: Rect, scenario: &Scenario, theme: &Theme) {
    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let total_rows = Field::VISIBLE_ROWS + VISIBLE_BUFFER;
    let mut lines: Vec<Line> = Vec::with_capacity(total_rows);

    for row in (0..total_rows).rev() {
        let mut spans = Vec::with_capacity(Field::COLUMNS);
        for column in 0..Field::COLUMNS {
            let (text, style) = if let Some(color) =
                piece_cell(scenario.tetromino(), row as i32, column as i32)
            {
                (BLOCK, Style::default().fg(theme.cell_color(color)))
            } else if let Some(color) = piece_cell(scenario.ghost(), row as i32, column as i32) {
                (GHOST, Style::default().fg(theme.ghost_color(color)).dim())
            } else {
                let cell = scenario.field().cell(row, column);
                if cell.is_empty() {
                    (EMPTY, Style::default())
                } else {
                    (BLOCK, Style::default().fg(theme.cell_color(cell.color())))
                }
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Color of the piece cell covering (row, column), if any
fn piece_cell(piece: Option<&Tetromino>, row: i32, column: i32) -> Option<CellColor> {
    let piece = piece?;
    piece
        .cells_as_vector()
        .iter()
        .any(|&(c, r)| c == column && r == row)
        .then(|| piece.kind().color())
}

fn render_hold(frame: &mut Frame, area: Rect, held: Option<TetrominoKind>, theme: &Theme) {
    let block = Block::default()
        .title(" HOLD ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(kind) = held {
        let preview = Rect {
            height: inner.height.min(3),
            ..inner
        };
        render_mini_piece(frame, preview, kind, theme);
    }
}

fn render_side(frame: &mut Frame, area: Rect, scenario: &Scenario, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(17), Constraint::Min(7)])
        .split(area);

    render_next_queue(frame, rows[0], scenario, theme);
    render_stats(frame, rows[1], scenario);
}

fn render_next_queue(frame: &mut Frame, area: Rect, scenario: &Scenario, theme: &Theme) {
    let block = Block::default()
        .title(" NEXT ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let upcoming: Vec<_> = scenario.previews().collect();
    if upcoming.is_empty() {
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); upcoming.len()])
        .split(inner);

    for (slot, kind) in slots.iter().zip(upcoming) {
        render_mini_piece(frame, *slot, kind, theme);
    }
}

/// Small centered preview of a piece in spawn orientation
fn render_mini_piece(frame: &mut Frame, area: Rect, kind: TetrominoKind, theme: &Theme) {
    if area.height < 1 || area.width < 4 {
        return;
    }

    let piece = Tetromino::new(kind);
    let occupied: Vec<(usize, usize)> = (0..Tetromino::SIZE)
        .flat_map(|r| (0..Tetromino::SIZE).map(move |c| (r, c)))
        .filter(|&(r, c)| !piece.cell(r, c).is_empty())
        .collect();

    let min_row = occupied.iter().map(|&(r, _)| r).min().unwrap_or(0);
    let max_row = occupied.iter().map(|&(r, _)| r).max().unwrap_or(0);
    let min_col = occupied.iter().map(|&(_, c)| c).min().unwrap_or(0);
    let max_col = occupied.iter().map(|&(_, c)| c).max().unwrap_or(0);

    let style = Style::default().fg(theme.cell_color(kind.color()));
    let mut lines: Vec<Line> = Vec::new();
    for r in (min_row..=max_row).rev() {
        let mut spans = Vec::new();
        for c in min_col..=max_col {
            if occupied.contains(&(r, c)) {
                spans.push(Span::styled(BLOCK, style));
            } else {
                spans.push(Span::raw(EMPTY));
            }
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn render_stats(frame: &mut Frame, area: Rect, scenario: &Scenario) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let score = scenario.score();
    let mut lines = vec![
        Line::from(Span::styled("SCORE", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.displayed_points()),
            Style::default().fg(Color::Yellow).bold(),
        )),
        Line::raw(""),
        Line::from(Span::styled("LEVEL", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.level()),
            Style::default().fg(Color::Cyan),
        )),
        Line::raw(""),
        Line::from(Span::styled("LINES", Style::default().fg(Color::Gray))),
        Line::from(Span::styled(
            format!("{}", score.lines()),
            Style::default().fg(Color::Green),
        )),
    ];

    if score.back_to_back() {
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "B2B",
            Style::default().fg(Color::Magenta),
        )));
    }

    if let Some(label) = scenario.last_action_label() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            label.to_string(),
            Style::default().fg(Color::Magenta).bold(),
        ));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_overlay(frame: &mut Frame, area: Rect, title: &str, color: Color, detail: Option<&str>) {
    let height = if detail.is_some() { 5 } else { 3 };
    let overlay = center_rect(area, 24, height);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));
    let inner = block.inner(overlay);
    frame.render_widget(block, overlay);

    let mut lines = vec![Line::styled(
        title.to_string(),
        Style::default().fg(color).bold(),
    )];
    if let Some(detail) = detail {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            detail.to_string(),
            Style::default().fg(Color::White),
        ));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
