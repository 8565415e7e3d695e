//! # Display Refresh Buffer
//!
//! Decouples high-frequency packet arrival from the fixed-rate render tick.
//! Each tracked [`PacketKind`] owns one slot holding the latest complete
//! value set; storing a set marks the slot stale, and the tick drains it
//! with a single-slot exchange. Intermediate sets between two ticks are
//! simply overwritten — the slot is a latest-value cache, not a queue.
//!
//! Producers may call [`DisplayBuffer::on_packet`] from any thread at
//! hundreds of invocations per second. Each call does one bounded
//! allocation (the boxed value set) and one short lock; the tick can never
//! observe a half-written set because the whole set is swapped in at once.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::{DisplayError, DisplayResult};
use crate::packet::{ACCEL_AXIS_COUNT, EEG_CHANNEL_COUNT, PacketKind};
use crate::render::{self, Surface};

type Slot = Mutex<Option<Box<[f64]>>>;

/// Latest-value buffer for the three displayed packet kinds.
#[derive(Debug, Default)]
pub struct DisplayBuffer {
    eeg: Slot,
    alpha: Slot,
    accel: Slot,
}

fn lock(slot: &Slot) -> MutexGuard<'_, Option<Box<[f64]>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

impl DisplayBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store one incoming packet's values in its kind's slot.
    ///
    /// Kinds without a display slot (battery, DRL/REF, quantization) are
    /// accepted and ignored. For tracked kinds the value count must match
    /// the kind's fixed width exactly; a mismatched packet is rejected
    /// before it touches the slot.
    ///
    /// # Errors
    ///
    /// [`DisplayError::ChannelCountMismatch`] when a tracked kind carries
    /// the wrong number of values.
    pub fn on_packet(&self, kind: PacketKind, values: &[f64]) -> DisplayResult<()> {
        let (slot, expected) = match kind {
            PacketKind::Eeg => (&self.eeg, EEG_CHANNEL_COUNT),
            PacketKind::AlphaRelative => (&self.alpha, EEG_CHANNEL_COUNT),
            PacketKind::Accelerometer => (&self.accel, ACCEL_AXIS_COUNT),
            PacketKind::Battery | PacketKind::DrlRef | PacketKind::Quantization => return Ok(()),
        };

        if values.len() != expected {
            return Err(DisplayError::ChannelCountMismatch {
                kind,
                expected,
                got: values.len(),
            });
        }

        *lock(slot) = Some(values.into());
        Ok(())
    }

    /// Whether `kind`'s slot holds data not yet rendered.
    #[must_use]
    pub fn is_stale(&self, kind: PacketKind) -> bool {
        self.slot(kind).is_some_and(|slot| lock(slot).is_some())
    }

    /// Drain `kind`'s slot, clearing its staleness.
    ///
    /// Returns `None` for clean slots and for kinds without a slot.
    pub fn take(&self, kind: PacketKind) -> Option<Box<[f64]>> {
        self.slot(kind).and_then(|slot| lock(slot).take())
    }

    /// One render tick: format and write every stale slot's values into
    /// `surface`, clearing the slots. A clean slot is not touched, so a
    /// tick with no new data is a no-op on the surface.
    pub fn render_into(&self, surface: &mut dyn Surface) {
        for &kind in PacketKind::tracked() {
            if let Some(values) = self.take(kind) {
                render::render_values(kind, &values, surface);
            }
        }
    }

    fn slot(&self, kind: PacketKind) -> Option<&Slot> {
        match kind {
            PacketKind::Eeg => Some(&self.eeg),
            PacketKind::AlphaRelative => Some(&self.alpha),
            PacketKind::Accelerometer => Some(&self.accel),
            PacketKind::Battery | PacketKind::DrlRef | PacketKind::Quantization => None,
        }
    }
}
