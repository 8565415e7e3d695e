//! Device panel — paired-headband picker plus link status and version.

use std::sync::PoisonError;

use muse_display::Field;
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::app::App;

/// Render the device panel.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(4)])
        .split(area);

    draw_device_list(frame, app, chunks[0]);
    draw_link_info(frame, app, chunks[1]);
}

/// Selectable list of paired headbands, labeled name + address.
fn draw_device_list(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Headbands ").borders(Borders::ALL);

    if app.devices.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from("  No paired headbands."),
            Line::from(""),
            Line::from(Span::styled(
                "  Press 'r' to refresh",
                Style::default().fg(Color::Cyan),
            )),
        ])
        .style(Style::default().fg(Color::DarkGray))
        .block(block);
        frame.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem<'_>> = app
        .devices
        .iter()
        .enumerate()
        .map(|(i, device)| {
            let selected = i == app.selected_device_idx;
            let marker = if selected { "▸ " } else { "  " };

            let line = Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Cyan)),
                Span::styled(device.label(), Style::default().add_modifier(Modifier::BOLD)),
            ]);

            let style = if selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

/// Link status and firmware version fields.
fn draw_link_info(frame: &mut Frame, app: &App, area: Rect) {
    let fields = app.fields.lock().unwrap_or_else(PoisonError::into_inner);

    let status_color = if app.is_connected() {
        Color::Green
    } else {
        Color::Yellow
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("  Status: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                fields.get(Field::ConnectionStatus).to_string(),
                Style::default().fg(status_color),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Version: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(fields.get(Field::FirmwareVersion).to_string()),
        ]),
    ];

    let block = Block::default().title(" Link ").borders(Borders::ALL);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
