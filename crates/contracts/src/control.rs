//! Control events - inbound discrete commands
//!
//! Delivered by the external input/event layer (a window, a TTY, a test).
//! The render loop drains pending events once per tick.

use serde::{Deserialize, Serialize};

/// Discrete control event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlEvent {
    /// Terminate the render loop cleanly
    Quit,

    /// Toggle the autopilot flag (pass-through state, surfaced in the HUD)
    ToggleAutopilot,

    /// Switch to the next configured layout
    CycleLayout,

    /// Switch the overlay minimap to the next channel in the cycle
    CycleMinimap,
}
