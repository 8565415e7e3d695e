//! Application state for the dashboard.
//!
//! [`App`] holds all mutable state consumed by the rendering and event-loop
//! layers: the shared display fields, the paired-device roster and
//! selection, transmission state, and the log ring.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use muse_display::{
    ConnectionState, ConnectionTransition, DeviceEntry, Field, FieldStore, FirmwareVersion,
    Surface,
};

use crate::event::{AppEvent, LogEntry};
use crate::sim::SimHandle;

/// Maximum number of log entries retained.
const LOG_CAP: usize = 500;

/// All mutable dashboard state.
pub struct App {
    /// Control handle into the headset collaborator.
    pub handle: SimHandle,
    /// Display fields, shared with the render ticker.
    pub fields: Arc<Mutex<FieldStore>>,

    // ── Device picker ───────────────────────────────────────────────
    pub devices: Vec<DeviceEntry>,
    pub selected_device_idx: usize,

    // ── Link state ──────────────────────────────────────────────────
    pub last_transition: Option<ConnectionTransition>,
    pub transmission_enabled: bool,

    // ── Log ─────────────────────────────────────────────────────────
    pub log_entries: VecDeque<LogEntry>,

    pub should_quit: bool,
    pub started_at: std::time::Instant,
}

impl App {
    /// Create a new `App` with default (empty) state.
    pub fn new(handle: SimHandle, fields: Arc<Mutex<FieldStore>>) -> Self {
        Self {
            handle,
            fields,
            devices: Vec::new(),
            selected_device_idx: 0,
            last_transition: None,
            transmission_enabled: true,
            log_entries: VecDeque::with_capacity(LOG_CAP),
            should_quit: false,
            started_at: std::time::Instant::now(),
        }
    }

    /// Whether the link is currently up.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.last_transition
            .is_some_and(|t| t.current == ConnectionState::Connected)
    }

    /// Push a log entry, evicting the oldest if at capacity.
    pub fn log(&mut self, entry: LogEntry) {
        if self.log_entries.len() >= LOG_CAP {
            self.log_entries.pop_front();
        }
        self.log_entries.push_back(entry);
    }

    /// Elapsed time since the app started.
    #[must_use]
    pub fn uptime(&self) -> std::time::Duration {
        self.started_at.elapsed()
    }

    /// Process an incoming [`AppEvent`], updating state accordingly.
    ///
    /// Returns `true` if the app should quit.
    pub fn handle_event(&mut self, event: AppEvent) -> bool {
        match event {
            AppEvent::Terminal(crossterm::event::Event::Key(key))
                if key.kind == crossterm::event::KeyEventKind::Press =>
            {
                self.handle_key(key);
            }
            AppEvent::Connection(transition) => {
                self.set_field(Field::ConnectionStatus, transition.to_string());
                if !transition.is_connected() {
                    self.set_field(Field::FirmwareVersion, "undefined".to_string());
                }
                self.log(LogEntry::info(transition.to_string()));
                self.last_transition = Some(transition);
            }
            AppEvent::Firmware(version) => self.set_version(version),
            AppEvent::DeviceList(devices) => {
                self.devices = devices;
                if self.devices.is_empty() {
                    self.selected_device_idx = 0;
                } else {
                    self.selected_device_idx =
                        self.selected_device_idx.min(self.devices.len() - 1);
                }
                self.log(LogEntry::info(format!(
                    "Found {} paired headband(s)",
                    self.devices.len()
                )));
            }
            AppEvent::Log(entry) => self.log(entry),
            AppEvent::Quit => self.should_quit = true,
            AppEvent::Tick | AppEvent::Terminal(_) => {}
        }
        self.should_quit
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        use crossterm::event::{KeyCode, KeyModifiers};

        // Global: Ctrl+C quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            // Device selection
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_device_idx = self.selected_device_idx.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let max = self.devices.len().saturating_sub(1);
                self.selected_device_idx = self.selected_device_idx.saturating_add(1).min(max);
            }

            // Refresh the paired-device roster
            KeyCode::Char('r') => {
                self.log(LogEntry::info("Refreshing device list…"));
                self.handle.refresh_devices();
            }

            // Connect to the selected device
            KeyCode::Enter => {
                if self.devices.is_empty() {
                    self.log(LogEntry::warn("There is nothing to connect to"));
                } else {
                    self.handle.connect(self.selected_device_idx);
                }
            }

            // Disconnect from the current device
            KeyCode::Char('d') => {
                if self.is_connected() {
                    self.handle.disconnect();
                } else {
                    self.log(LogEntry::warn("Not connected — nothing to disconnect"));
                }
            }

            // Pause/resume data transmission
            KeyCode::Char('p') => {
                self.transmission_enabled = !self.transmission_enabled;
                self.handle.set_data_transmission(self.transmission_enabled);
                self.log(LogEntry::info(if self.transmission_enabled {
                    "Data transmission resumed"
                } else {
                    "Data transmission paused"
                }));
            }

            _ => {}
        }
    }

    fn set_version(&mut self, version: Option<FirmwareVersion>) {
        let text = version.map_or_else(|| "undefined".to_string(), |v| v.to_string());
        self.set_field(Field::FirmwareVersion, text);
    }

    fn set_field(&mut self, field: Field, text: String) {
        self.fields
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .set_field(field, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::SimHeadset;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

    fn test_app() -> App {
        let (handle, _lifecycle_rx, _data_rx) = SimHeadset::spawn();
        App::new(handle, Arc::new(Mutex::new(FieldStore::new())))
    }

    fn key(app: &mut App, code: KeyCode) {
        app.handle_event(AppEvent::Terminal(Event::Key(KeyEvent::new(
            code,
            KeyModifiers::NONE,
        ))));
    }

    fn transition(from: ConnectionState, to: ConnectionState) -> AppEvent {
        AppEvent::Connection(ConnectionTransition::new(from, to))
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = test_app();
        key(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = test_app();
        app.handle_event(AppEvent::Terminal(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        ))));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn test_device_selection_clamps() {
        let mut app = test_app();
        app.handle_event(AppEvent::DeviceList(vec![
            DeviceEntry::new("Muse-A", "00:00:00:00:00:01"),
            DeviceEntry::new("Muse-B", "00:00:00:00:00:02"),
        ]));

        key(&mut app, KeyCode::Up);
        assert_eq!(app.selected_device_idx, 0);

        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Down);
        key(&mut app, KeyCode::Down);
        assert_eq!(app.selected_device_idx, 1);

        // A shrunken roster pulls the selection back in range.
        app.handle_event(AppEvent::DeviceList(vec![DeviceEntry::new(
            "Muse-A",
            "00:00:00:00:00:01",
        )]));
        assert_eq!(app.selected_device_idx, 0);
    }

    #[tokio::test]
    async fn test_transition_updates_status_field() {
        let mut app = test_app();
        app.handle_event(transition(
            ConnectionState::Connecting,
            ConnectionState::Connected,
        ));

        assert!(app.is_connected());
        let fields = app.fields.lock().unwrap();
        assert_eq!(fields.get(Field::ConnectionStatus), "CONNECTING -> CONNECTED");
        // Version arrives separately; the default is untouched by connect.
        assert_eq!(fields.get(Field::FirmwareVersion), "undefined");
    }

    #[tokio::test]
    async fn test_version_resets_on_disconnect() {
        let mut app = test_app();
        app.handle_event(transition(
            ConnectionState::Connecting,
            ConnectionState::Connected,
        ));
        app.handle_event(AppEvent::Firmware(Some(FirmwareVersion {
            firmware_type: "consumer".into(),
            firmware_version: "7.2.4".into(),
            protocol_version: 2,
        })));
        assert_eq!(
            app.fields.lock().unwrap().get(Field::FirmwareVersion),
            "consumer - 7.2.4 - 2"
        );

        app.handle_event(transition(
            ConnectionState::Connected,
            ConnectionState::Disconnected,
        ));
        assert!(!app.is_connected());
        assert_eq!(
            app.fields.lock().unwrap().get(Field::FirmwareVersion),
            "undefined"
        );
    }

    #[tokio::test]
    async fn test_connect_with_empty_roster_warns() {
        let mut app = test_app();
        key(&mut app, KeyCode::Enter);
        assert!(
            app.log_entries
                .iter()
                .any(|e| e.message.contains("nothing to connect to"))
        );
    }

    #[tokio::test]
    async fn test_pause_toggle() {
        let mut app = test_app();
        assert!(app.transmission_enabled);
        key(&mut app, KeyCode::Char('p'));
        assert!(!app.transmission_enabled);
        key(&mut app, KeyCode::Char('p'));
        assert!(app.transmission_enabled);
    }

    #[tokio::test]
    async fn test_log_ring_caps_entries() {
        let mut app = test_app();
        for i in 0..(LOG_CAP + 10) {
            app.log(LogEntry::info(format!("entry {i}")));
        }
        assert_eq!(app.log_entries.len(), LOG_CAP);
        assert_eq!(app.log_entries.front().unwrap().message, "entry 10");
    }
}
