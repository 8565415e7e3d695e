//! Simulated headset collaborator.
//!
//! Stands in for the vendor SDK so the dashboard runs end-to-end without
//! hardware: a fixed paired-device roster, connect/disconnect/reconnect
//! with proper state transitions, and synthetic packet generation at
//! roughly realistic stream rates while connected. No attempt is made to
//! reproduce the vendor's transport or wire behavior.

use std::f64::consts::TAU;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use muse_display::packet::EEG_CHANNEL_COUNT;
use muse_display::{
    ConnectionState, ConnectionTransition, DataPacket, DeviceEntry, FirmwareVersion, PacketKind,
};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// Raw EEG sample rate in Hz.
const EEG_RATE_HZ: u64 = 256;

/// Alpha band-power update rate in Hz.
const ALPHA_RATE_HZ: u64 = 10;

/// Accelerometer sample rate in Hz.
const ACCEL_RATE_HZ: u64 = 52;

/// Connection-and-roster notifications, delivered on their own channel so
/// high-frequency data packets never queue behind them.
#[derive(Debug, Clone)]
pub enum LifecycleEvent {
    Transition(ConnectionTransition),
    DeviceList(Vec<DeviceEntry>),
}

#[derive(Debug)]
enum Command {
    Refresh,
    Connect(usize),
    Disconnect,
    SetTransmission(bool),
    Reconnect,
}

/// Cloneable control handle into the simulated headset task.
#[derive(Clone)]
pub struct SimHandle {
    cmd_tx: mpsc::UnboundedSender<Command>,
    version: Arc<Mutex<Option<FirmwareVersion>>>,
}

impl SimHandle {
    /// Re-query the paired-device roster.
    pub fn refresh_devices(&self) {
        let _ = self.cmd_tx.send(Command::Refresh);
    }

    /// Connect to the roster entry at `index`.
    pub fn connect(&self, index: usize) {
        let _ = self.cmd_tx.send(Command::Connect(index));
    }

    /// Drop the current connection.
    pub fn disconnect(&self) {
        let _ = self.cmd_tx.send(Command::Disconnect);
    }

    /// Pause or resume data packet emission without touching the link.
    pub fn set_data_transmission(&self, enabled: bool) {
        let _ = self.cmd_tx.send(Command::SetTransmission(enabled));
    }

    /// Re-run the most recently connected device, if any.
    pub fn reconnect(&self) {
        let _ = self.cmd_tx.send(Command::Reconnect);
    }

    /// Firmware metadata of the connected headset, `None` while disconnected.
    #[must_use]
    pub fn firmware_version(&self) -> Option<FirmwareVersion> {
        self.version
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Entry point for the simulated collaborator.
pub struct SimHeadset;

impl SimHeadset {
    /// Spawn the simulator task.
    ///
    /// Returns the control handle, the lifecycle event stream, and the data
    /// packet stream. The task runs until the handle and both receivers are
    /// dropped.
    pub fn spawn() -> (
        SimHandle,
        mpsc::UnboundedReceiver<LifecycleEvent>,
        mpsc::UnboundedReceiver<DataPacket>,
    ) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (lifecycle_tx, lifecycle_rx) = mpsc::unbounded_channel();
        let (data_tx, data_rx) = mpsc::unbounded_channel();
        let version = Arc::new(Mutex::new(None));

        let sim = Sim {
            roster: vec![
                DeviceEntry::new("Muse-1234", "00:55:DA:B0:12:34"),
                DeviceEntry::new("Muse-BEEF", "00:55:DA:B0:BE:EF"),
            ],
            state: ConnectionState::Unknown,
            connected_index: None,
            transmitting: true,
            phase: 0,
            lifecycle_tx,
            data_tx,
            version: Arc::clone(&version),
        };
        tokio::spawn(sim.run(cmd_rx));

        (SimHandle { cmd_tx, version }, lifecycle_rx, data_rx)
    }
}

struct Sim {
    roster: Vec<DeviceEntry>,
    state: ConnectionState,
    connected_index: Option<usize>,
    transmitting: bool,
    phase: u64,
    lifecycle_tx: mpsc::UnboundedSender<LifecycleEvent>,
    data_tx: mpsc::UnboundedSender<DataPacket>,
    version: Arc<Mutex<Option<FirmwareVersion>>>,
}

impl Sim {
    async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<Command>) {
        let mut eeg = tokio::time::interval(Duration::from_micros(1_000_000 / EEG_RATE_HZ));
        let mut alpha = tokio::time::interval(Duration::from_micros(1_000_000 / ALPHA_RATE_HZ));
        let mut accel = tokio::time::interval(Duration::from_micros(1_000_000 / ACCEL_RATE_HZ));
        let mut battery = tokio::time::interval(Duration::from_secs(1));
        for interval in [&mut eeg, &mut alpha, &mut accel, &mut battery] {
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        }

        loop {
            tokio::select! {
                cmd = cmd_rx.recv() => {
                    let Some(cmd) = cmd else { break };
                    if !self.handle_command(cmd) {
                        break;
                    }
                }
                _ = eeg.tick() => {
                    let values = self.eeg_sample();
                    self.emit(PacketKind::Eeg, values);
                }
                _ = alpha.tick() => {
                    let values = self.alpha_sample();
                    self.emit(PacketKind::AlphaRelative, values);
                }
                _ = accel.tick() => {
                    let values = self.accel_sample();
                    self.emit(PacketKind::Accelerometer, values);
                }
                _ = battery.tick() => {
                    self.emit(PacketKind::Battery, vec![0.87]);
                }
            }
        }

        tracing::debug!("simulated headset stopped");
    }

    /// Returns `false` once the lifecycle receiver is gone.
    fn handle_command(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Refresh => self
                .lifecycle_tx
                .send(LifecycleEvent::DeviceList(self.roster.clone()))
                .is_ok(),
            Command::Connect(index) => {
                if index >= self.roster.len() {
                    tracing::warn!(index, "connect request for unknown device");
                    return true;
                }
                self.connected_index = Some(index);
                self.establish()
            }
            Command::Reconnect => {
                if self.connected_index.is_some() && self.state != ConnectionState::Connected {
                    self.establish()
                } else {
                    true
                }
            }
            Command::Disconnect => {
                if self.state == ConnectionState::Connected {
                    self.set_version(None);
                    self.transition(ConnectionState::Disconnected)
                } else {
                    true
                }
            }
            Command::SetTransmission(enabled) => {
                self.transmitting = enabled;
                true
            }
        }
    }

    fn establish(&mut self) -> bool {
        if !self.transition(ConnectionState::Connecting) {
            return false;
        }
        self.set_version(Some(FirmwareVersion {
            firmware_type: "consumer".into(),
            firmware_version: "7.2.4".into(),
            protocol_version: 2,
        }));
        self.transition(ConnectionState::Connected)
    }

    fn transition(&mut self, next: ConnectionState) -> bool {
        let t = ConnectionTransition::new(self.state, next);
        self.state = next;
        self.lifecycle_tx
            .send(LifecycleEvent::Transition(t))
            .is_ok()
    }

    fn set_version(&self, version: Option<FirmwareVersion>) {
        *self
            .version
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = version;
    }

    fn emit(&self, kind: PacketKind, values: Vec<f64>) {
        if self.state != ConnectionState::Connected || !self.transmitting {
            return;
        }
        let _ = self.data_tx.send(DataPacket::new(kind, values));
    }

    // ── Synthetic waveforms ──────────────────────────────────────────

    #[allow(clippy::cast_precision_loss)]
    fn seconds(&self) -> f64 {
        self.phase as f64 / EEG_RATE_HZ as f64
    }

    /// Raw EEG around 1050 µV-ish with a swing that crosses the display
    /// threshold, one slightly detuned oscillation per channel.
    #[allow(clippy::cast_precision_loss)]
    fn eeg_sample(&mut self) -> Vec<f64> {
        self.phase = self.phase.wrapping_add(1);
        let t = self.seconds();
        (0..EEG_CHANNEL_COUNT)
            .map(|ch| {
                let f = 1.0 + ch as f64 * 0.5;
                1050.0 + 120.0 * (TAU * f * t).sin()
            })
            .collect()
    }

    /// Relative alpha band power in `[0.1, 0.9]`, phase-shifted per channel.
    #[allow(clippy::cast_precision_loss)]
    fn alpha_sample(&self) -> Vec<f64> {
        let t = self.seconds();
        (0..EEG_CHANNEL_COUNT)
            .map(|ch| 0.5 + 0.4 * (TAU * 0.2 * t + ch as f64).sin())
            .collect()
    }

    /// Gentle head sway with gravity on the up/down axis.
    fn accel_sample(&self) -> Vec<f64> {
        let t = self.seconds();
        vec![
            0.08 * (TAU * 0.5 * t).sin(),
            0.98,
            0.08 * (TAU * 0.3 * t).cos(),
        ]
    }
}
