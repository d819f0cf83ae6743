//! # Ingestion
//!
//! Sensor data ingestion module.
//!
//! Responsibilities:
//! - Register sensor data sources (mock or real, behind `SensorSource`)
//! - Project raw payloads into canonical RGB `Frame`s
//! - Write frames into the shared `FrameStore` (last-write-wins per channel)
//! - Isolate bad payloads: a format error drops the single payload, keeps the
//!   channel's previous frame and never crosses the callback boundary
//!
//! ## Usage Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use frame_store::FrameStore;
//! use ingestion::{MockSensor, ViewPipeline};
//!
//! let store = Arc::new(FrameStore::new());
//! let mut pipeline = ViewPipeline::new(Arc::clone(&store), Default::default());
//! pipeline.register_source(Box::new(MockSensor::camera(Channel::Front, 20.0, 400, 400)));
//! pipeline.start_all();
//! // render loop reads `store` at its own cadence
//! pipeline.stop_all();
//! ```

mod binding;
mod metrics;
mod mock;
mod pipeline;
pub mod project;

pub use binding::ChannelBinding;
pub use metrics::{IngestMetrics, IngestSnapshot};
pub use mock::{MockSensor, MockSensorConfig};
pub use pipeline::ViewPipeline;
