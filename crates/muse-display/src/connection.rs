//! # Connection Lifecycle Types
//!
//! State transitions and version metadata delivered by the headset's
//! connection listener. The status line on screen is the literal
//! `"PREVIOUS -> CURRENT"` rendering of the latest transition.

use serde::{Deserialize, Serialize};

/// Link state of the headset as reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectionState {
    /// No connection attempt has been made yet.
    Unknown,
    /// A connection attempt is in flight.
    Connecting,
    /// The link is up and data can flow.
    Connected,
    /// The link was closed or lost.
    Disconnected,
    /// The headset firmware is too old to talk to.
    NeedsUpdate,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionState::Unknown => "UNKNOWN",
            ConnectionState::Connecting => "CONNECTING",
            ConnectionState::Connected => "CONNECTED",
            ConnectionState::Disconnected => "DISCONNECTED",
            ConnectionState::NeedsUpdate => "NEEDS_UPDATE",
        };
        write!(f, "{name}")
    }
}

/// One connection-state notification: where the link was and where it is now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectionTransition {
    pub previous: ConnectionState,
    pub current: ConnectionState,
}

impl ConnectionTransition {
    #[must_use]
    pub fn new(previous: ConnectionState, current: ConnectionState) -> Self {
        Self { previous, current }
    }

    /// The link just came up; version metadata can be read.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.current == ConnectionState::Connected
    }

    /// The link just went down; a delayed reconnect should be scheduled.
    #[must_use]
    pub fn is_disconnected(&self) -> bool {
        self.current == ConnectionState::Disconnected
    }
}

impl std::fmt::Display for ConnectionTransition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.previous, self.current)
    }
}

/// Firmware metadata read from the headset once it reports connected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FirmwareVersion {
    /// Firmware flavor, e.g. `"consumer"` or `"research"`.
    pub firmware_type: String,
    /// Dotted firmware version string.
    pub firmware_version: String,
    /// Wire protocol revision.
    pub protocol_version: u32,
}

impl std::fmt::Display for FirmwareVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - {} - {}",
            self.firmware_type, self.firmware_version, self.protocol_version
        )
    }
}
