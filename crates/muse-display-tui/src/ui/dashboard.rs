//! Signal dashboard — EEG contact indicators, alpha readouts, accel axes.
//!
//! Every cell shows the latest text the render ticker wrote into the
//! shared field store; this panel never formats signal values itself.

use std::sync::PoisonError;

use muse_display::{Field, FieldStore};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;

/// Render the dashboard panel.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let fields = app.fields.lock().unwrap_or_else(PoisonError::into_inner);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Length(4),
            Constraint::Min(0),
        ])
        .split(area);

    draw_eeg(frame, &fields, rows[0]);
    draw_alpha(frame, &fields, rows[1]);
    draw_accel(frame, &fields, rows[2]);
}

/// EEG contact cells: `"1"` above the display threshold, `"0"` below.
fn draw_eeg(frame: &mut Frame, fields: &FieldStore, area: Rect) {
    let cells = [
        ("TP9", Field::EegTp9),
        ("AF7", Field::EegAf7),
        ("AF8", Field::EegAf8),
        ("TP10", Field::EegTp10),
    ];
    draw_cells(frame, fields, area, " EEG ", &cells, eeg_color);
}

/// Alpha relative band power, 2-decimal readouts.
fn draw_alpha(frame: &mut Frame, fields: &FieldStore, area: Rect) {
    let cells = [
        ("TP9", Field::AlphaTp9),
        ("AF7", Field::AlphaAf7),
        ("AF8", Field::AlphaAf8),
        ("TP10", Field::AlphaTp10),
    ];
    draw_cells(frame, fields, area, " Alpha Relative ", &cells, |_| {
        Color::Cyan
    });
}

/// Accelerometer axes.
fn draw_accel(frame: &mut Frame, fields: &FieldStore, area: Rect) {
    let cells = [
        ("F/B", Field::AccelForwardBackward),
        ("U/D", Field::AccelUpDown),
        ("L/R", Field::AccelLeftRight),
    ];
    draw_cells(frame, fields, area, " Accelerometer ", &cells, |_| {
        Color::Magenta
    });
}

/// One bordered row of labeled value cells.
fn draw_cells(
    frame: &mut Frame,
    fields: &FieldStore,
    area: Rect,
    title: &str,
    cells: &[(&str, Field)],
    value_color: fn(&str) -> Color,
) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let constraints: Vec<Constraint> = cells
        .iter()
        .map(|_| Constraint::Ratio(1, cells.len() as u32))
        .collect();
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    for ((label, field), column) in cells.iter().zip(columns.iter()) {
        let value = fields.get(*field);
        let lines = vec![
            Line::from(Span::styled(
                *label,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                value.to_string(),
                Style::default().fg(value_color(value)),
            )),
        ];
        frame.render_widget(
            Paragraph::new(lines).alignment(ratatui::layout::Alignment::Center),
            *column,
        );
    }
}

/// Contact indicator color: green when the electrode reads high.
fn eeg_color(value: &str) -> Color {
    match value {
        "1" => Color::Green,
        "0" => Color::Red,
        _ => Color::DarkGray,
    }
}
