//! # Render Loop
//!
//! Fixed-cadence driver over the frame store.
//!
//! Each tick: drain pending control events, compose the active layout from
//! whatever frames are currently stored (never waiting on a missing channel),
//! and fan the composite out to the configured sinks. An `Incomplete` result
//! is a deliberate skip - the external display keeps its previous frame, so
//! cold start shows no blank flash.
//!
//! Sensor arrival cadence is fully decoupled from render cadence; the loop
//! owns no sensor resources and stops cooperatively on a quit event, a stop
//! flag or a tick budget.

mod driver;
mod error;
mod handle;
mod metrics;
mod sinks;

pub use driver::{RenderLoop, RenderLoopConfig, RenderStats, StaticTelemetry};
pub use error::RenderLoopError;
pub use handle::SinkHandle;
pub use metrics::{SinkMetrics, SinkMetricsSnapshot};
pub use sinks::{create_sink_handles, LogSink, PngSink};
