//! HUD text
//!
//! The core never renders text; it only describes the HUD line from
//! externally supplied scalars, and the display collaborator draws it.

use contracts::{Channel, Telemetry};

/// Inputs for one HUD line, sampled once per render tick.
#[derive(Debug, Clone, Copy)]
pub struct HudValues {
    /// Vehicle state from the driving collaborator
    pub telemetry: Telemetry,

    /// Active minimap label when the overlay layout is showing one
    pub minimap: Option<Channel>,

    /// Cumulative frames received across all channels
    pub frames_received: u64,
}

/// Minimap label as shown in the original view.
pub fn minimap_label(channel: Channel) -> &'static str {
    match channel {
        Channel::Lidar => "LiDAR BEV",
        Channel::Depth => "Depth",
        Channel::Semantic => "Semantic",
        other => other.as_str(),
    }
}

/// Render the HUD line text.
pub fn describe_hud(values: &HudValues) -> String {
    let speed = values.telemetry.speed_kmh();
    let autopilot = if values.telemetry.autopilot {
        "ON"
    } else {
        "OFF"
    };

    match values.minimap {
        Some(channel) => format!(
            "Speed: {speed:.0} km/h | Autopilot: {autopilot} | Minimap: {} (M)",
            minimap_label(channel)
        ),
        None => format!(
            "Speed: {speed:.0} km/h | Autopilot: {autopilot} | Frames: {}",
            values.frames_received
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_hud_names_the_minimap() {
        let text = describe_hud(&HudValues {
            telemetry: Telemetry {
                velocity: [10.0, 0.0, 0.0],
                autopilot: true,
            },
            minimap: Some(Channel::Lidar),
            frames_received: 42,
        });
        assert_eq!(text, "Speed: 36 km/h | Autopilot: ON | Minimap: LiDAR BEV (M)");
    }

    #[test]
    fn panorama_hud_counts_frames() {
        let text = describe_hud(&HudValues {
            telemetry: Telemetry::default(),
            minimap: None,
            frames_received: 1234,
        });
        assert_eq!(text, "Speed: 0 km/h | Autopilot: OFF | Frames: 1234");
    }
}
