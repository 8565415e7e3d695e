//! # Packet Kinds & Channel Layout
//!
//! The shapes of data notifications crossing the headset SDK boundary.
//! Every packet carries a [`PacketKind`] tag and a flat value set; the
//! refresh buffer only tracks the three kinds it has display slots for
//! and ignores the rest.
//!
//! Channel counts follow the Muse wire contract: EEG and EEG-derived
//! band packets carry 6 values (four electrodes plus two aux inputs),
//! accelerometer packets carry 3.

use serde::{Deserialize, Serialize};

/// EEG electrode names in value-set order.
///
/// The first four are the standard Muse 10-20 positions; the aux pair is
/// only meaningful when an auxiliary input is attached.
pub const EEG_CHANNEL_NAMES: [&str; 6] = ["TP9", "AF7", "AF8", "TP10", "AUX_LEFT", "AUX_RIGHT"];

/// Accelerometer axis names in value-set order.
pub const ACCEL_AXIS_NAMES: [&str; 3] = ["FORWARD_BACKWARD", "UP_DOWN", "LEFT_RIGHT"];

/// Number of values in an EEG or EEG-derived band packet.
pub const EEG_CHANNEL_COUNT: usize = EEG_CHANNEL_NAMES.len();

/// Number of values in an accelerometer packet.
pub const ACCEL_AXIS_COUNT: usize = ACCEL_AXIS_NAMES.len();

/// Kind tag carried by every data notification from the headset.
///
/// Mirrors the packet types the display registers for: the two kinds the
/// refresh buffer renders (raw EEG and the alpha-relative band), the
/// accelerometer, and the housekeeping kinds that are received but never
/// displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PacketKind {
    /// Raw EEG voltages, one value per channel in [`EEG_CHANNEL_NAMES`] order.
    Eeg,
    /// Relative alpha band power, same channel order as [`PacketKind::Eeg`].
    AlphaRelative,
    /// Head movement, one value per axis in [`ACCEL_AXIS_NAMES`] order.
    Accelerometer,
    /// Battery state of charge and charger status.
    Battery,
    /// Driven-right-leg / reference electrode voltages.
    DrlRef,
    /// Per-channel quantization level of the EEG compression.
    Quantization,
}

impl PacketKind {
    /// Fixed value count for kinds the refresh buffer tracks.
    ///
    /// Returns `None` for kinds that are received but intentionally ignored;
    /// their widths belong to the vendor SDK and are never validated here.
    #[must_use]
    pub fn tracked_len(self) -> Option<usize> {
        match self {
            PacketKind::Eeg | PacketKind::AlphaRelative => Some(EEG_CHANNEL_COUNT),
            PacketKind::Accelerometer => Some(ACCEL_AXIS_COUNT),
            PacketKind::Battery | PacketKind::DrlRef | PacketKind::Quantization => None,
        }
    }

    /// The kinds with a display slot, in render order.
    #[must_use]
    pub fn tracked() -> &'static [PacketKind] {
        &[
            PacketKind::Eeg,
            PacketKind::Accelerometer,
            PacketKind::AlphaRelative,
        ]
    }
}

impl std::fmt::Display for PacketKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PacketKind::Eeg => "EEG",
            PacketKind::AlphaRelative => "ALPHA_RELATIVE",
            PacketKind::Accelerometer => "ACCELEROMETER",
            PacketKind::Battery => "BATTERY",
            PacketKind::DrlRef => "DRL_REF",
            PacketKind::Quantization => "QUANTIZATION",
        };
        write!(f, "{name}")
    }
}

/// One data notification from the headset: a kind tag plus its values.
#[derive(Debug, Clone)]
pub struct DataPacket {
    /// Which stream this packet belongs to.
    pub kind: PacketKind,
    /// Flat channel values, in the kind's documented order.
    pub values: Vec<f64>,
}

impl DataPacket {
    /// Build a packet from a kind and its values.
    #[must_use]
    pub fn new(kind: PacketKind, values: Vec<f64>) -> Self {
        Self { kind, values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracked_lengths() {
        assert_eq!(PacketKind::Eeg.tracked_len(), Some(6));
        assert_eq!(PacketKind::AlphaRelative.tracked_len(), Some(6));
        assert_eq!(PacketKind::Accelerometer.tracked_len(), Some(3));
        assert_eq!(PacketKind::Battery.tracked_len(), None);
        assert_eq!(PacketKind::DrlRef.tracked_len(), None);
        assert_eq!(PacketKind::Quantization.tracked_len(), None);
    }

    #[test]
    fn test_tracked_kinds_have_widths() {
        for kind in PacketKind::tracked() {
            assert!(kind.tracked_len().is_some(), "{kind} has no width");
        }
    }

    #[test]
    fn test_display_names() {
        assert_eq!(PacketKind::Eeg.to_string(), "EEG");
        assert_eq!(PacketKind::AlphaRelative.to_string(), "ALPHA_RELATIVE");
        assert_eq!(PacketKind::DrlRef.to_string(), "DRL_REF");
    }

    #[test]
    fn test_channel_tables_match_counts() {
        assert_eq!(EEG_CHANNEL_NAMES.len(), EEG_CHANNEL_COUNT);
        assert_eq!(ACCEL_AXIS_NAMES.len(), ACCEL_AXIS_COUNT);
        assert_eq!(EEG_CHANNEL_NAMES[0], "TP9");
        assert_eq!(EEG_CHANNEL_NAMES[3], "TP10");
    }
}
