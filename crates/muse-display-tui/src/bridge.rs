//! Async bridge — spawns the tasks that consume collaborator streams.
//!
//! Two tasks run for the lifetime of the dashboard:
//!
//! 1. **Packet pump** — drains the high-frequency data stream straight into
//!    the [`DisplayBuffer`]. Malformed packets are logged and dropped; the
//!    pump never dies on bad input.
//! 2. **Lifecycle watcher** — forwards connection transitions and roster
//!    updates into the app event channel, reads firmware metadata when the
//!    link comes up, and schedules the delayed reconnect when it drops.

use std::sync::Arc;
use std::time::Duration;

use muse_display::DisplayBuffer;
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

use crate::event::{AppEvent, LogEntry};
use crate::sim::{LifecycleEvent, SimHandle};

/// Spawn the task feeding data packets into the display buffer.
///
/// Runs until the data stream closes or `shutdown` fires.
pub fn spawn_packet_pump(
    mut data_rx: mpsc::UnboundedReceiver<muse_display::DataPacket>,
    buffer: Arc<DisplayBuffer>,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: broadcast::Sender<()>,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                packet = data_rx.recv() => {
                    let Some(packet) = packet else { break };
                    if let Err(e) = buffer.on_packet(packet.kind, &packet.values) {
                        tracing::warn!(error = %e, "dropping malformed packet");
                        let _ = tx.send(AppEvent::Log(LogEntry::warn(format!(
                            "Dropped packet: {e}"
                        ))));
                    }
                }
                _ = shutdown_rx.recv() => break,
            }
        }
        tracing::debug!("packet pump stopped");
    })
}

/// Spawn the task watching connection transitions and roster updates.
///
/// On every transition the status event is forwarded to the app. Reaching
/// the connected state triggers a firmware-version read; reaching the
/// disconnected state schedules a reconnect through the collaborator after
/// `reconnect_delay`.
pub fn spawn_lifecycle_watcher(
    mut lifecycle_rx: mpsc::UnboundedReceiver<LifecycleEvent>,
    handle: SimHandle,
    reconnect_delay: Duration,
    tx: mpsc::UnboundedSender<AppEvent>,
    shutdown: broadcast::Sender<()>,
) -> JoinHandle<()> {
    let mut shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                event = lifecycle_rx.recv() => {
                    let Some(event) = event else { break };
                    match event {
                        LifecycleEvent::Transition(transition) => {
                            tracing::info!(%transition, "connection state changed");
                            if tx.send(AppEvent::Connection(transition)).is_err() {
                                break;
                            }
                            if transition.is_connected() {
                                let version = handle.firmware_version();
                                if tx.send(AppEvent::Firmware(version)).is_err() {
                                    break;
                                }
                            }
                            if transition.is_disconnected() {
                                let handle = handle.clone();
                                tokio::spawn(async move {
                                    tokio::time::sleep(reconnect_delay).await;
                                    handle.reconnect();
                                });
                            }
                        }
                        LifecycleEvent::DeviceList(devices) => {
                            if tx.send(AppEvent::DeviceList(devices)).is_err() {
                                break;
                            }
                        }
                    }
                }
                _ = shutdown_rx.recv() => break,
            }
        }
        tracing::debug!("lifecycle watcher stopped");
    })
}
