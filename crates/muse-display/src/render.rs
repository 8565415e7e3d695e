//! # Display Fields & Formatting
//!
//! [`Field`] names every on-screen text cell; [`Surface`] is the sink the
//! render tick writes formatted values into. The formatting rules are fixed:
//! the four main EEG electrodes render as a `"1"`/`"0"` threshold indicator,
//! alpha band power and accelerometer axes render with 2-decimal precision
//! in a 6-character column.

use crate::packet::PacketKind;

/// Raw-EEG level above which an electrode cell reads `"1"`.
pub const EEG_ON_THRESHOLD: f64 = 1100.0;

/// Every text cell the dashboard displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    EegTp9,
    EegAf7,
    EegAf8,
    EegTp10,
    AlphaTp9,
    AlphaAf7,
    AlphaAf8,
    AlphaTp10,
    AccelForwardBackward,
    AccelUpDown,
    AccelLeftRight,
    ConnectionStatus,
    FirmwareVersion,
}

/// EEG indicator cells in channel order. Only the four head electrodes are
/// displayed; the aux pair is received but has no cell.
pub(crate) const EEG_CELLS: [Field; 4] =
    [Field::EegTp9, Field::EegAf7, Field::EegAf8, Field::EegTp10];

/// Alpha band-power cells in channel order.
pub(crate) const ALPHA_CELLS: [Field; 4] = [
    Field::AlphaTp9,
    Field::AlphaAf7,
    Field::AlphaAf8,
    Field::AlphaTp10,
];

/// Accelerometer cells in axis order.
pub(crate) const ACCEL_CELLS: [Field; 3] = [
    Field::AccelForwardBackward,
    Field::AccelUpDown,
    Field::AccelLeftRight,
];

impl Field {
    /// Number of distinct fields.
    pub const COUNT: usize = 13;

    /// Dense index for array-backed field stores.
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Sink of display fields.
///
/// Implementations are expected to be infallible: a field write either lands
/// or the host environment is broken in ways this layer cannot repair.
pub trait Surface {
    fn set_field(&mut self, field: Field, text: String);
}

/// Array-backed [`Surface`] holding the latest text of every field.
///
/// This is the store the terminal frontend reads when painting a frame;
/// tests use it to observe exactly what a tick rendered.
#[derive(Debug, Clone)]
pub struct FieldStore {
    cells: [String; Field::COUNT],
}

impl FieldStore {
    #[must_use]
    pub fn new() -> Self {
        let mut cells: [String; Field::COUNT] = std::array::from_fn(|_| String::from("--"));
        cells[Field::FirmwareVersion.index()] = String::from("undefined");
        Self { cells }
    }

    /// Latest text written to `field`.
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        &self.cells[field.index()]
    }
}

impl Default for FieldStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for FieldStore {
    fn set_field(&mut self, field: Field, text: String) {
        self.cells[field.index()] = text;
    }
}

/// Render one kind's buffered values into its display cells.
pub(crate) fn render_values(kind: PacketKind, values: &[f64], surface: &mut dyn Surface) {
    match kind {
        PacketKind::Eeg => render_eeg(values, surface),
        PacketKind::AlphaRelative => render_alpha(values, surface),
        PacketKind::Accelerometer => render_accel(values, surface),
        PacketKind::Battery | PacketKind::DrlRef | PacketKind::Quantization => {}
    }
}

fn render_eeg(values: &[f64], surface: &mut dyn Surface) {
    for (field, &value) in EEG_CELLS.iter().zip(values) {
        let text = if value > EEG_ON_THRESHOLD { "1" } else { "0" };
        surface.set_field(*field, text.to_string());
    }
}

fn render_alpha(values: &[f64], surface: &mut dyn Surface) {
    for (field, &value) in ALPHA_CELLS.iter().zip(values) {
        surface.set_field(*field, format!("{value:6.2}"));
    }
}

fn render_accel(values: &[f64], surface: &mut dyn Surface) {
    for (field, &value) in ACCEL_CELLS.iter().zip(values) {
        surface.set_field(*field, format!("{value:6.2}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eeg_threshold_above_renders_one() {
        let mut store = FieldStore::new();
        render_values(PacketKind::Eeg, &[1150.0; 6], &mut store);
        assert_eq!(store.get(Field::EegTp9), "1");
        assert_eq!(store.get(Field::EegAf7), "1");
        assert_eq!(store.get(Field::EegAf8), "1");
        assert_eq!(store.get(Field::EegTp10), "1");
    }

    #[test]
    fn test_eeg_threshold_below_renders_zero() {
        let mut store = FieldStore::new();
        render_values(PacketKind::Eeg, &[1050.0; 6], &mut store);
        assert_eq!(store.get(Field::EegTp9), "0");
        assert_eq!(store.get(Field::EegTp10), "0");
    }

    #[test]
    fn test_eeg_threshold_is_strict() {
        let mut store = FieldStore::new();
        render_values(PacketKind::Eeg, &[1100.0; 6], &mut store);
        assert_eq!(store.get(Field::EegTp9), "0");
    }

    #[test]
    fn test_alpha_fixed_width_two_decimals() {
        let mut store = FieldStore::new();
        render_values(
            PacketKind::AlphaRelative,
            &[0.5, 12.3456, 0.0, 100.0, 0.0, 0.0],
            &mut store,
        );
        assert_eq!(store.get(Field::AlphaTp9), "  0.50");
        assert_eq!(store.get(Field::AlphaAf7), " 12.35");
        assert_eq!(store.get(Field::AlphaAf8), "  0.00");
        assert_eq!(store.get(Field::AlphaTp10), "100.00");
    }

    #[test]
    fn test_accel_cells() {
        let mut store = FieldStore::new();
        render_values(PacketKind::Accelerometer, &[0.12, 0.98, -0.05], &mut store);
        assert_eq!(store.get(Field::AccelForwardBackward), "  0.12");
        assert_eq!(store.get(Field::AccelUpDown), "  0.98");
        assert_eq!(store.get(Field::AccelLeftRight), " -0.05");
    }

    #[test]
    fn test_untracked_kind_touches_nothing() {
        let mut store = FieldStore::new();
        render_values(PacketKind::Battery, &[0.8, 1.0, 3.7], &mut store);
        assert_eq!(store.get(Field::EegTp9), "--");
        assert_eq!(store.get(Field::FirmwareVersion), "undefined");
    }

    #[test]
    fn test_field_store_defaults() {
        let store = FieldStore::new();
        assert_eq!(store.get(Field::ConnectionStatus), "--");
        assert_eq!(store.get(Field::FirmwareVersion), "undefined");
        assert_eq!(store.get(Field::AlphaTp9), "--");
    }
}
