//! SensorSource trait - sensor data source abstraction
//!
//! Defines a unified interface for sensor data sources, decoupling the view
//! pipeline from concrete sensor implementations. Real simulator sensors and
//! mock sensors are handled identically.

use std::sync::Arc;

use crate::{Channel, RawPayload};

/// Sensor data callback type
///
/// When a sensor produces data, it sends a `RawPayload` through this callback.
/// Uses `Arc` to allow callback sharing across multiple contexts.
pub type SensorDataCallback = Arc<dyn Fn(RawPayload) + Send + Sync>;

/// Sensor data source trait
///
/// Abstracts the common behavior of real simulator sensors and mock sensors.
/// The attachment relation is one-way: a channel binding holds the source, the
/// source never holds the binding - stopping a source must never require the
/// downstream store to cooperate.
///
/// # Example
///
/// ```ignore
/// let sensor: Box<dyn SensorSource> = get_sensor_source();
/// sensor.listen(Arc::new(|payload| {
///     println!("payload on {}", payload.channel);
/// }));
/// // ... use sensor ...
/// sensor.stop();
/// ```
pub trait SensorSource: Send + Sync {
    /// Channel this source delivers on
    fn channel(&self) -> Channel;

    /// Register data callback
    ///
    /// When the sensor produces data, it calls the callback function with one
    /// `RawPayload` per simulated tick. If already listening, repeated calls
    /// must be idempotent (no second callback gets registered).
    fn listen(&self, callback: SensorDataCallback);

    /// Stop listening
    ///
    /// Stops sensor data generation. For mock sensors this ends the producer
    /// thread; for real sensors it forwards to the simulator's stop call.
    fn stop(&self);

    /// Check if currently listening
    fn is_listening(&self) -> bool;
}
