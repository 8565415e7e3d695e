//! # Render Ticker
//!
//! Background task that drains the [`DisplayBuffer`] into a [`Surface`] at
//! a fixed cadence. The task has an explicit start/stop lifecycle: the
//! owner holds the [`Ticker`] for as long as the view is visible and stops
//! it (or drops it) on teardown.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::buffer::DisplayBuffer;
use crate::render::Surface;

/// Fixed-cadence render task driving a [`DisplayBuffer`] into a surface.
///
/// Each tick renders only slots with unseen data, so ticks with nothing new
/// are no-ops. Dropping the ticker aborts the task; [`stop`](Self::stop)
/// shuts it down and waits for the task to finish.
pub struct Ticker {
    handle: Option<JoinHandle<()>>,
    running: Arc<AtomicBool>,
}

impl Ticker {
    /// Start ticking at `period` intervals.
    ///
    /// The surface lock is held only for the duration of one render pass;
    /// a missed tick (e.g. under scheduler pressure) is skipped rather than
    /// bursted.
    pub fn start<S>(buffer: Arc<DisplayBuffer>, surface: Arc<Mutex<S>>, period: Duration) -> Self
    where
        S: Surface + Send + 'static,
    {
        let running = Arc::new(AtomicBool::new(true));

        let handle = {
            let running = Arc::clone(&running);
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

                while running.load(Ordering::SeqCst) {
                    interval.tick().await;

                    if !running.load(Ordering::SeqCst) {
                        break;
                    }

                    let mut surface = surface.lock().unwrap_or_else(PoisonError::into_inner);
                    buffer.render_into(&mut *surface);
                }

                tracing::debug!("render ticker stopped");
            })
        };

        Self {
            handle: Some(handle),
            running,
        }
    }

    /// Stop the ticker and wait for the task to terminate.
    ///
    /// No render occurs after this returns.
    pub async fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
            let _ = handle.await;
        }
    }

    /// Returns whether the ticker is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::PacketKind;
    use crate::render::{Field, FieldStore};

    #[tokio::test(start_paused = true)]
    async fn test_ticker_renders_stale_slots() {
        let buffer = Arc::new(DisplayBuffer::new());
        let fields = Arc::new(Mutex::new(FieldStore::new()));

        buffer.on_packet(PacketKind::Eeg, &[1150.0; 6]).unwrap();

        let mut ticker = Ticker::start(
            Arc::clone(&buffer),
            Arc::clone(&fields),
            Duration::from_millis(16),
        );

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(fields.lock().unwrap().get(Field::EegTp9), "1");
        assert!(!buffer.is_stale(PacketKind::Eeg));

        ticker.stop().await;
        assert!(!ticker.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_later_update_replaces_earlier_one() {
        let buffer = Arc::new(DisplayBuffer::new());
        let fields = Arc::new(Mutex::new(FieldStore::new()));

        let mut ticker = Ticker::start(
            Arc::clone(&buffer),
            Arc::clone(&fields),
            Duration::from_millis(16),
        );
        tokio::time::sleep(Duration::from_millis(20)).await;

        buffer.on_packet(PacketKind::Eeg, &[1150.0; 6]).unwrap();
        buffer.on_packet(PacketKind::Eeg, &[1050.0; 6]).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(fields.lock().unwrap().get(Field::EegTp9), "0");

        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_render_after_stop() {
        let buffer = Arc::new(DisplayBuffer::new());
        let fields = Arc::new(Mutex::new(FieldStore::new()));

        let mut ticker = Ticker::start(
            Arc::clone(&buffer),
            Arc::clone(&fields),
            Duration::from_millis(16),
        );
        ticker.stop().await;

        buffer.on_packet(PacketKind::Eeg, &[1150.0; 6]).unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        // The update stayed buffered; the surface never saw it.
        assert_eq!(fields.lock().unwrap().get(Field::EegTp9), "--");
        assert!(buffer.is_stale(PacketKind::Eeg));
    }
}
