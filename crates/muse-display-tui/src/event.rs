//! Application events bridging the headset collaborator and terminal input.
//!
//! [`AppEvent`] is the single event type consumed by the main loop.
//! Terminal events arrive via crossterm's `EventStream`, lifecycle
//! notifications via the bridge tasks, and ticks from a periodic timer to
//! drive rendering at a steady frame rate. High-frequency data packets do
//! **not** travel through this channel — the packet pump writes them
//! straight into the display buffer.

use muse_display::{ConnectionTransition, DeviceEntry, FirmwareVersion};

/// Every event the main loop can receive.
#[derive(Debug)]
pub enum AppEvent {
    /// A crossterm terminal event (key press, mouse, resize).
    Terminal(crossterm::event::Event),
    /// Render tick — triggers a frame redraw.
    Tick,

    // ── Lifecycle ────────────────────────────────────────────────────
    /// The headset link moved between connection states.
    Connection(ConnectionTransition),
    /// Firmware metadata read after a connect; `None` when unavailable.
    Firmware(Option<FirmwareVersion>),
    /// The paired-device roster changed.
    DeviceList(Vec<DeviceEntry>),
    /// Informational / error log entry.
    Log(LogEntry),
    /// Request application quit.
    Quit,
}

/// Severity levels for log entries shown in the log panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A single log entry for the scrollable log panel.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: std::time::Instant,
    pub level: LogLevel,
    pub message: String,
}

impl LogEntry {
    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            timestamp: std::time::Instant::now(),
            level: LogLevel::Info,
            message: msg.into(),
        }
    }

    pub fn warn(msg: impl Into<String>) -> Self {
        Self {
            timestamp: std::time::Instant::now(),
            level: LogLevel::Warn,
            message: msg.into(),
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            timestamp: std::time::Instant::now(),
            level: LogLevel::Error,
            message: msg.into(),
        }
    }
}
