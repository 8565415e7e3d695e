//! # muse-display
//!
//! Latest-value display refresh buffering for Muse headband data streams.
//!
//! Headset SDKs deliver data packets at hundreds of Hz, far faster than a
//! screen is worth repainting. This crate decouples the two rates: producers
//! push each packet into a [`DisplayBuffer`], which keeps only the newest
//! complete value set per packet kind, and a fixed-cadence [`Ticker`] drains
//! the stale slots into a [`Surface`] of named display fields.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::{Arc, Mutex};
//! use std::time::Duration;
//!
//! use muse_display::{DisplayBuffer, Field, FieldStore, PacketKind, Ticker};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> muse_display::DisplayResult<()> {
//! let buffer = Arc::new(DisplayBuffer::new());
//! let fields = Arc::new(Mutex::new(FieldStore::new()));
//!
//! // Producer side: called per incoming packet, from any thread.
//! buffer.on_packet(PacketKind::Eeg, &[1150.0, 980.0, 1120.0, 1050.0, 0.0, 0.0])?;
//!
//! // Render side: a 60 Hz ticker owned by the view.
//! let mut ticker = Ticker::start(
//!     Arc::clone(&buffer),
//!     Arc::clone(&fields),
//!     Duration::from_millis(16),
//! );
//! # tokio::time::sleep(Duration::from_millis(200)).await;
//! # assert_eq!(fields.lock().unwrap().get(Field::EegTp9), "1");
//! ticker.stop().await;
//! # Ok(())
//! # }
//! ```
//!
//! Intermediate packets between two ticks are coalesced — the buffer is a
//! latest-value cache, not a queue. A packet whose value count does not
//! match its kind's fixed width is rejected with a validation error.
//!
//! ## Configuration
//!
//! See [`MonitorConfig`] for tick-rate and reconnect-delay settings, loaded
//! from a `muse-display.toml` file or `MUSE_DISPLAY_*` environment
//! variables.

pub mod buffer;
pub mod config;
pub mod connection;
pub mod device;
pub mod error;
pub mod packet;
pub mod render;
pub mod ticker;

// ─── Public re-exports ──────────────────────────────────────────────────

pub use buffer::DisplayBuffer;
pub use config::MonitorConfig;
pub use connection::{ConnectionState, ConnectionTransition, FirmwareVersion};
pub use device::DeviceEntry;
pub use error::{DisplayError, DisplayResult};
pub use packet::{DataPacket, PacketKind};
pub use render::{Field, FieldStore, Surface};
pub use ticker::Ticker;
