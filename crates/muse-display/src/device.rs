//! Paired-device entries delivered by the headset roster.
//!
//! A device-list-changed notification carries the full refreshed list; each
//! entry is rendered in the picker as the device name directly followed by
//! its hardware address.

use serde::{Deserialize, Serialize};

/// One selectable headset from the paired-device roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEntry {
    /// Advertised device name, e.g. `"Muse-1234"`.
    pub name: String,
    /// Bluetooth hardware address.
    pub address: String,
}

impl DeviceEntry {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            address: address.into(),
        }
    }

    /// Picker row label: name immediately followed by the address.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}{}", self.name, self.address)
    }
}

impl std::fmt::Display for DeviceEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name, self.address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_concatenates_name_and_address() {
        let entry = DeviceEntry::new("Muse-1234", "00:55:DA:B0:12:34");
        assert_eq!(entry.label(), "Muse-123400:55:DA:B0:12:34");
        assert_eq!(entry.to_string(), entry.label());
    }
}
