//! Configuration validation
//!
//! Rules:
//! - channels unique, dimensions > 0
//! - target_fps > 0
//! - every configured layout's required channels are configured
//! - overlay primary/minimap cycle channels are configured
//! - BEV range and size > 0
//! - sink names non-empty

use std::collections::HashSet;

use contracts::{Channel, Layout, LayoutMode, ViewBlueprint, ViewError};

/// Validate a ViewBlueprint.
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    validate_channels(blueprint)?;
    validate_view(blueprint)?;
    validate_layouts(blueprint)?;
    validate_bev(blueprint)?;
    validate_sinks(blueprint)?;
    Ok(())
}

/// Channel uniqueness and dimensions
fn validate_channels(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    if blueprint.channels.is_empty() {
        return Err(ViewError::config_validation(
            "channels",
            "at least one channel must be configured",
        ));
    }

    let mut seen = HashSet::new();
    for config in &blueprint.channels {
        if !seen.insert(config.channel) {
            return Err(ViewError::config_validation(
                format!("channels[{}]", config.channel),
                "duplicate channel",
            ));
        }
        if config.width == 0 || config.height == 0 {
            return Err(ViewError::config_validation(
                format!("channels[{}]", config.channel),
                format!(
                    "dimensions must be > 0, got {}x{}",
                    config.width, config.height
                ),
            ));
        }
    }
    Ok(())
}

/// Render cadence
fn validate_view(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    if blueprint.view.target_fps <= 0.0 {
        return Err(ViewError::config_validation(
            "view.target_fps",
            format!("target_fps must be > 0, got {}", blueprint.view.target_fps),
        ));
    }
    Ok(())
}

/// Every layout must be satisfiable by the configured channel set
fn validate_layouts(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    if blueprint.layouts.is_empty() {
        return Err(ViewError::config_validation(
            "layouts",
            "at least one layout must be configured",
        ));
    }

    for mode in &blueprint.layouts {
        let required: Vec<Channel> = match mode {
            LayoutMode::PanoramaStrip => Layout::PanoramaStrip.required_channels(),
            LayoutMode::CubemapGrid => Layout::CubemapGrid.required_channels(),
            LayoutMode::Overlay => {
                validate_overlay(blueprint)?;
                vec![blueprint.overlay.primary]
            }
        };

        for channel in required {
            if blueprint.channel_config(channel).is_none() {
                return Err(ViewError::config_validation(
                    format!("layouts[{mode:?}]"),
                    format!("required channel '{channel}' is not configured"),
                ));
            }
        }
    }
    Ok(())
}

/// Overlay-specific rules
fn validate_overlay(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    let overlay = &blueprint.overlay;

    if overlay.minimap_size == 0 {
        return Err(ViewError::config_validation(
            "overlay.minimap_size",
            "minimap_size must be > 0",
        ));
    }

    if overlay.minimap_cycle.is_empty() {
        return Err(ViewError::config_validation(
            "overlay.minimap_cycle",
            "minimap cycle cannot be empty when the overlay layout is configured",
        ));
    }

    for channel in &overlay.minimap_cycle {
        if blueprint.channel_config(*channel).is_none() {
            return Err(ViewError::config_validation(
                "overlay.minimap_cycle",
                format!("minimap channel '{channel}' is not configured"),
            ));
        }
    }

    Ok(())
}

/// BEV projection parameters
fn validate_bev(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    if blueprint.bev.max_range_m <= 0.0 {
        return Err(ViewError::config_validation(
            "bev.max_range_m",
            format!("max_range_m must be > 0, got {}", blueprint.bev.max_range_m),
        ));
    }
    if blueprint.bev.output_size == 0 {
        return Err(ViewError::config_validation(
            "bev.output_size",
            "output_size must be > 0",
        ));
    }
    Ok(())
}

/// Sink configuration
fn validate_sinks(blueprint: &ViewBlueprint) -> Result<(), ViewError> {
    for (idx, sink) in blueprint.sinks.iter().enumerate() {
        if sink.name.is_empty() {
            return Err(ViewError::config_validation(
                format!("sinks[{idx}].name"),
                "sink name cannot be empty",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::{
        BevConfig, ChannelConfig, ConfigVersion, OverlayConfig, SinkConfig, SinkType, ViewConfig,
    };
    use std::collections::HashMap;

    fn channel(channel: Channel, size: u32) -> ChannelConfig {
        ChannelConfig {
            channel,
            width: size,
            height: size,
            attributes: HashMap::new(),
        }
    }

    fn minimal_blueprint() -> ViewBlueprint {
        ViewBlueprint {
            version: ConfigVersion::V1,
            view: ViewConfig::default(),
            channels: vec![
                channel(Channel::Left, 400),
                channel(Channel::Front, 400),
                channel(Channel::Right, 400),
                channel(Channel::Back, 400),
            ],
            layouts: vec![LayoutMode::PanoramaStrip],
            bev: BevConfig::default(),
            overlay: OverlayConfig::default(),
            sinks: vec![SinkConfig {
                name: "log".into(),
                sink_type: SinkType::Log,
                queue_capacity: 100,
                params: Default::default(),
            }],
        }
    }

    #[test]
    fn test_valid_config() {
        let bp = minimal_blueprint();
        assert!(validate(&bp).is_ok());
    }

    #[test]
    fn test_duplicate_channel() {
        let mut bp = minimal_blueprint();
        bp.channels.push(channel(Channel::Front, 400));
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("duplicate channel"), "got: {err}");
    }

    #[test]
    fn test_zero_dimension() {
        let mut bp = minimal_blueprint();
        bp.channels[0].width = 0;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("dimensions must be > 0"), "got: {err}");
    }

    #[test]
    fn test_invalid_fps() {
        let mut bp = minimal_blueprint();
        bp.view.target_fps = 0.0;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("target_fps"), "got: {err}");
    }

    #[test]
    fn test_layout_missing_channel() {
        let mut bp = minimal_blueprint();
        bp.channels.retain(|c| c.channel != Channel::Back);
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("'back' is not configured"), "got: {err}");
    }

    #[test]
    fn test_cubemap_needs_six_faces() {
        let mut bp = minimal_blueprint();
        bp.layouts = vec![LayoutMode::CubemapGrid];
        let result = validate(&bp);
        assert!(result.is_err(), "four faces cannot satisfy the cubemap");
    }

    #[test]
    fn test_overlay_minimap_must_be_configured() {
        let mut bp = minimal_blueprint();
        bp.layouts = vec![LayoutMode::Overlay];
        bp.channels = vec![channel(Channel::Rgb, 1280)];
        // default minimap cycle references lidar/depth/semantic, none configured
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("minimap channel"), "got: {err}");
    }

    #[test]
    fn test_empty_minimap_cycle() {
        let mut bp = minimal_blueprint();
        bp.layouts = vec![LayoutMode::Overlay];
        bp.channels = vec![channel(Channel::Rgb, 1280)];
        bp.overlay.minimap_cycle = vec![];
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("minimap cycle"), "got: {err}");
    }

    #[test]
    fn test_invalid_bev_range() {
        let mut bp = minimal_blueprint();
        bp.bev.max_range_m = -1.0;
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("max_range_m"), "got: {err}");
    }

    #[test]
    fn test_empty_sink_name() {
        let mut bp = minimal_blueprint();
        bp.sinks[0].name = String::new();
        let result = validate(&bp);
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("cannot be empty"), "got: {err}");
    }
}
