//! # Compositor
//!
//! Assembles per-channel frames from the store into one output raster per
//! render tick, following a static `Layout`.
//!
//! Composition is pure placement and nearest-neighbour resizing; no blending
//! across seams and no projection correction, so panorama and cubemap seams
//! show the expected discontinuities. Calling `compose` during cold start is
//! cheap and returns `Composed::Incomplete` until the required channels have
//! delivered.

mod compose;
mod hud;
mod resize;

pub use compose::Compositor;
pub use hud::{describe_hud, minimap_label, HudValues};
pub use resize::resize_nearest;
