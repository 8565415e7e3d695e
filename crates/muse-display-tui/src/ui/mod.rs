//! Top-level layout and rendering entry point.
//!
//! Composes the title bar, the signal dashboard, the device panel, the log
//! panel, and the key-help footer into the full-screen layout drawn each
//! frame.

pub mod dashboard;
pub mod devices;
pub mod log;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Render the entire frame.
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Top-level vertical split:
    //   [1] Title bar  (1 line)
    //   [2] Content    (fill)
    //   [3] Log        (8 lines)
    //   [4] Key help   (1 line)
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(1),
        ])
        .split(area);

    draw_title_bar(frame, app, chunks[0]);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    dashboard::draw(frame, app, content[0]);
    devices::draw(frame, app, content[1]);

    log::draw(frame, app, chunks[2]);
    draw_key_help(frame, app, chunks[3]);
}

/// Render the always-visible top line.
fn draw_title_bar(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mut spans = vec![
        Span::styled(
            " Muse Display ",
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];

    if app.is_connected() {
        spans.push(Span::styled("●", Style::default().fg(Color::Green)));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            if app.transmission_enabled {
                "streaming"
            } else {
                "paused"
            },
            Style::default().fg(if app.transmission_enabled {
                Color::Cyan
            } else {
                Color::Yellow
            }),
        ));
    } else {
        spans.push(Span::styled("○", Style::default().fg(Color::DarkGray)));
        spans.push(Span::raw(" "));
        spans.push(Span::styled(
            "no headband",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let uptime = format_duration(app.uptime());
    spans.push(Span::raw("  "));
    spans.push(Span::styled(uptime, Style::default().fg(Color::DarkGray)));

    let bar = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));
    frame.render_widget(bar, area);
}

/// Render the bottom key-help bar.
fn draw_key_help(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let mut spans = vec![
        Span::styled(" q", Style::default().fg(Color::Yellow)),
        Span::raw(" Quit  "),
        Span::styled("r", Style::default().fg(Color::Yellow)),
        Span::raw(" Refresh  "),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(" Select  "),
    ];

    if app.is_connected() {
        spans.push(Span::styled("d", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Disconnect  "));
        spans.push(Span::styled("p", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(if app.transmission_enabled {
            " Pause"
        } else {
            " Resume"
        }));
    } else {
        spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(" Connect"));
    }

    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}

/// Format a duration into `HH:MM:SS` or `MM:SS`.
fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    let h = secs / 3600;
    let m = (secs % 3600) / 60;
    let s = secs % 60;
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}
