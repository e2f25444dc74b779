// SPDX-License-Identifier: MIT

//!
//! Engine configuration
//!
//! Every field has a sane default and the whole tree deserialises with
//! `#[serde(default)]`, so a config file only needs to name what it changes.
//!

use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can arise when loading or validating an [`EngineConfig`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not parse config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Layout parameters shared by the time scale, auto-fit and lane packing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Width of an event card (px)
    pub card_width: f64,

    /// Minimum horizontal space between two cards (px)
    pub gap: f64,

    /// Groups with at least this many members collapse into a cluster
    pub cluster_threshold: usize,

    /// How many cards can be stacked at one position before it's "full"
    pub stack_capacity: usize,

    pub zoom_min: f64,
    pub zoom_max: f64,

    /// The zoom used before any auto-fit has run
    pub pixels_per_year: f64,

    /// Space kept before the first event (years)
    pub padding_before_years: f64,

    /// Space kept after the last event (years)
    pub padding_after_years: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            card_width: 200.0,
            gap: 16.0,
            cluster_threshold: 4,
            stack_capacity: 3,
            zoom_min: 0.01,
            zoom_max: 50_000.0,
            pixels_per_year: 10.0,
            padding_before_years: 50.0,
            padding_after_years: 20.0,
        }
    }
}

impl LayoutConfig {
    /// The smallest distance two cards can be apart without overlapping
    pub fn min_separation(&self) -> f64 {
        self.card_width + self.gap
    }
}

/// Minimap (overview) behaviour.  Percentages are of the minimap's range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinimapConfig {
    /// Below this the minimap zooms in around the viewport
    pub lower_band_pct: f64,

    /// Above this the minimap zooms out around the viewport
    pub upper_band_pct: f64,

    /// The indicator size re-ranging aims for
    pub target_pct: f64,

    /// The narrowest the minimap range may become (years)
    pub min_years_visible: f64,

    /// How close (percent of the track) the pointer must get to a track edge
    /// while resizing before the range starts scrolling
    pub edge_scroll_threshold_pct: f64,

    /// How far the range scrolls per timer tick (percent of the range width)
    pub edge_scroll_step_pct: f64,

    pub edge_scroll_interval_ms: u64,

    /// Range width multiplier per wheel notch
    pub wheel_zoom_factor: f64,

    /// The narrowest the indicator may be resized to
    pub min_indicator_pct: f64,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        MinimapConfig {
            lower_band_pct: 15.0,
            upper_band_pct: 60.0,
            target_pct: 25.0,
            min_years_visible: 1.0,
            edge_scroll_threshold_pct: 5.0,
            edge_scroll_step_pct: 2.0,
            edge_scroll_interval_ms: 50,
            wheel_zoom_factor: 1.2,
            min_indicator_pct: 1.0,
        }
    }
}

/// Shape parameters for the generated paths
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Number of sample intervals (there are `samples + 1` points)
    pub samples: usize,

    /// The height of the area the path lives in (it oscillates about the
    /// vertical centre)
    pub height: f64,

    /// Maximum vertical deviation from the centre
    pub amplitude: f64,

    pub seed: u64,

    /// Number of summed sine waves
    pub wave_count: usize,

    /// Arc length samples taken along each Bézier segment
    pub bezier_steps_per_segment: usize,

    /// Number of waypoints for the river flavour
    pub waypoint_count: usize,
}

impl Default for PathConfig {
    fn default() -> Self {
        PathConfig {
            samples: 200,
            height: 400.0,
            amplitude: 120.0,
            seed: 42,
            wave_count: 4,
            bezier_steps_per_segment: 32,
            waypoint_count: 8,
        }
    }
}

/// All engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub minimap: MinimapConfig,
    pub path: PathConfig,
}

impl EngineConfig {
    /// Load (and validate) a JSON config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        info!("Loading config from {}", path.as_ref().display());
        let data = fs::read_to_string(path)?;
        Self::from_json(&data)
    }

    /// Parse (and validate) a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        info!("Config loaded = {config:?}");
        Ok(config)
    }

    /// Reject values the engine can't sensibly work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        let minimap = &self.minimap;
        let path = &self.path;
        let checks = [
            (layout.card_width > 0.0, "layout.card_width must be positive"),
            (layout.gap >= 0.0, "layout.gap must not be negative"),
            (layout.cluster_threshold >= 2, "layout.cluster_threshold must be at least 2"),
            (layout.stack_capacity >= 1, "layout.stack_capacity must be at least 1"),
            (layout.zoom_min > 0.0, "layout.zoom_min must be positive"),
            (layout.zoom_min <= layout.zoom_max, "layout.zoom_min must not exceed layout.zoom_max"),
            (layout.pixels_per_year > 0.0, "layout.pixels_per_year must be positive"),
            (
                layout.padding_before_years >= 0.0 && layout.padding_after_years >= 0.0,
                "layout padding must not be negative",
            ),
            (
                0.0 < minimap.lower_band_pct
                    && minimap.lower_band_pct <= minimap.target_pct
                    && minimap.target_pct <= minimap.upper_band_pct
                    && minimap.upper_band_pct <= 100.0,
                "minimap band must satisfy 0 < lower <= target <= upper <= 100",
            ),
            (minimap.min_years_visible > 0.0, "minimap.min_years_visible must be positive"),
            (minimap.wheel_zoom_factor > 1.0, "minimap.wheel_zoom_factor must exceed 1"),
            (minimap.edge_scroll_interval_ms > 0, "minimap.edge_scroll_interval_ms must be positive"),
            (path.samples >= 1, "path.samples must be at least 1"),
            (path.bezier_steps_per_segment >= 1, "path.bezier_steps_per_segment must be at least 1"),
        ];
        match checks.iter().find(|(ok, _)| !ok) {
            Some((_, message)) => Err(ConfigError::Invalid(message.to_string())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "layout": { "card_width": 120 } }"#).unwrap();
        assert_eq!(config.layout.card_width, 120.0);
        assert_eq!(config.layout.gap, LayoutConfig::default().gap);
        assert_eq!(config.minimap, MinimapConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let error = EngineConfig::from_json(r#"{ "layout": { "zoom_min": 10, "zoom_max": 1 } }"#);
        assert!(matches!(error, Err(ConfigError::Invalid(_))));
        let error = EngineConfig::from_json(r#"{ "minimap": { "lower_band_pct": 70 } }"#);
        assert!(matches!(error, Err(ConfigError::Invalid(_))));
        assert!(matches!(
            EngineConfig::from_json("{ nope"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            EngineConfig::load("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
