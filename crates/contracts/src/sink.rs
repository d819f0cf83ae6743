//! FrameSink trait - render loop output interface
//!
//! Defines the abstract interface for display sinks.

use crate::{CompositeFrame, ViewError};

/// Composite output trait
///
/// All sink implementations must implement this trait. The HUD text travels
/// with the frame; sinks that cannot render text may ignore it.
#[trait_variant::make(FrameSink: Send)]
pub trait LocalFrameSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Write one composited frame
    ///
    /// # Errors
    /// Returns write error (should include context)
    async fn write(&mut self, frame: &CompositeFrame, hud: &str) -> Result<(), ViewError>;

    /// Flush buffer (if any)
    async fn flush(&mut self) -> Result<(), ViewError>;

    /// Close sink
    async fn close(&mut self) -> Result<(), ViewError>;
}
