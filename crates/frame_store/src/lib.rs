//! # Frame Store
//!
//! Per-channel single-slot frame storage.
//!
//! Responsibilities:
//! - Hold the most recent decoded `Frame` per channel (last-write-wins)
//! - Atomic slot replacement: a read observes either the previous complete
//!   frame or the new complete frame, never a mix
//! - Non-blocking reads from the render thread while sensor callbacks write
//!
//! No cross-channel consistency is guaranteed or attempted: sensors tick at
//! independent rates, and a composite legitimately combines frames with
//! differing timestamps.

mod slot;
mod store;

pub use store::FrameStore;
