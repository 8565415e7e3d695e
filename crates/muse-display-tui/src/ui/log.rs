//! Log panel — recent application events, newest at the bottom.
//!
//! Each entry is stamped with its offset from dashboard startup, so a
//! reconnect bounce reads as a tight cluster of `+mm:ss` lines.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::event::{LogEntry, LogLevel};

/// Render the log panel.
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().title(" Log ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.log_entries.is_empty() {
        let msg = Paragraph::new("  Nothing logged yet.").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(msg, inner);
        return;
    }

    // Keep the newest entries in view; older ones scroll off the top.
    let height = inner.height as usize;
    let start = app.log_entries.len().saturating_sub(height);
    let lines: Vec<Line<'_>> = app
        .log_entries
        .iter()
        .skip(start)
        .map(|entry| log_line(entry, app.started_at))
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);
}

fn log_line(entry: &LogEntry, origin: Instant) -> Line<'_> {
    let stamp = offset_stamp(entry.timestamp.saturating_duration_since(origin));

    let (tag, color) = match entry.level {
        LogLevel::Info => ("info", Color::Green),
        LogLevel::Warn => ("warn", Color::Yellow),
        LogLevel::Error => ("error", Color::Red),
    };

    Line::from(vec![
        Span::styled(format!(" {stamp} "), Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("{tag:<5}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(entry.message.as_str()),
    ])
}

/// Offset from dashboard startup as `+mm:ss` (hours fold into minutes).
fn offset_stamp(offset: Duration) -> String {
    let secs = offset.as_secs();
    format!("+{:02}:{:02}", secs / 60, secs % 60)
}
