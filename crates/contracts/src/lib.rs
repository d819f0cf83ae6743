//! # Contracts
//!
//! Frozen interface contracts (ICD), defining inter-module data structures and traits.
//! All business crates can only depend on this crate, reverse dependencies are prohibited.
//!
//! ## Time Model
//! - Uses simulation timestamp (seconds, f64) delivered with each payload
//! - `frame_id` is optional, used for ordering/diagnostics
//! - Channels are never assumed to tick in lockstep; a composite may mix timestamps

mod blueprint;
mod channel;
mod control;
mod error;
mod frame;
mod layout;
mod payload;
mod sensor_source;
mod sink;
mod telemetry;

pub use blueprint::*;
pub use channel::{Channel, ChannelKind};
pub use control::ControlEvent;
pub use error::*;
pub use frame::*;
pub use layout::{Layout, LayoutMode};
pub use payload::*;
pub use sensor_source::{SensorDataCallback, SensorSource};
pub use sink::*;
pub use telemetry::{Telemetry, TelemetrySource};
