//! # Error Types
//!
//! Semantic error types for the display refresh pipeline. The one error the
//! pipeline itself can produce is a channel-count mismatch on an incoming
//! packet; everything else comes from configuration loading.

use thiserror::Error;

use crate::packet::PacketKind;

/// Convenient Result alias for display operations.
pub type DisplayResult<T> = std::result::Result<T, DisplayError>;

/// All errors that can occur in the display refresh pipeline.
#[derive(Error, Debug)]
pub enum DisplayError {
    /// A packet carried the wrong number of values for its kind.
    ///
    /// Tracked kinds have a fixed width; a short or oversized value set is
    /// rejected before it touches any display slot.
    #[error("{kind} packet carried {got} values, expected exactly {expected}")]
    ChannelCountMismatch {
        kind: PacketKind,
        expected: usize,
        got: usize,
    },

    /// Configuration file error (missing, malformed, or invalid values).
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    /// Filesystem or I/O error (config file reading, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(feature = "config-toml")]
impl From<toml::de::Error> for DisplayError {
    fn from(err: toml::de::Error) -> Self {
        DisplayError::Config {
            reason: err.to_string(),
        }
    }
}
