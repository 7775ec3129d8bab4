use crate::error::Result;
use crate::utils::constants::*;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

/// Names of the source columns the loader reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ColumnConfig {
    #[validate(length(min = 1))]
    pub x: String,

    #[validate(length(min = 1))]
    pub y: String,

    #[validate(length(min = 1))]
    pub timestamp: String,

    #[validate(length(min = 1))]
    pub weight: String,

    /// Passed through for the map tooltip, never validated
    pub tooltip: Option<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            x: COLUMN_X.to_string(),
            y: COLUMN_Y.to_string(),
            timestamp: COLUMN_TIMESTAMP.to_string(),
            weight: COLUMN_WEIGHT.to_string(),
            tooltip: Some(COLUMN_TOOLTIP.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SourceConfig {
    /// WHATWG encoding label of the input file
    #[validate(length(min = 1))]
    pub encoding: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RenderConfig {
    #[validate(range(min = 1, max = 500))]
    pub radius_pixels: u32,

    #[validate(range(min = 0.0, max = 22.0))]
    pub zoom: f64,

    #[validate(range(min = 0.0, max = 60.0))]
    pub pitch: f64,

    #[validate(range(min = 16, max = 8192))]
    pub width: u32,

    #[validate(range(min = 16, max = 8192))]
    pub height: u32,

    pub tooltip_template: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            radius_pixels: DEFAULT_RADIUS_PIXELS,
            zoom: DEFAULT_ZOOM,
            pitch: DEFAULT_PITCH,
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            tooltip_template: DEFAULT_TOOLTIP_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlaybackConfig {
    #[validate(range(min = 0.1, max = 2.0))]
    pub default_speed: f64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            default_speed: DEFAULT_SPEED_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    #[validate(nested)]
    pub columns: ColumnConfig,

    #[validate(nested)]
    pub source: SourceConfig,

    #[validate(nested)]
    pub render: RenderConfig,

    #[validate(nested)]
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Layer defaults, an optional config file and `TRAFFIC_HEATMAP__*` environment variables
    ///
    /// Without an explicit path, `traffic-heatmap.{toml,json,yaml}` in the working
    /// directory is used when present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let builder = Config::builder().add_source(Config::try_from(&AppConfig::default())?);

        let builder = match path {
            Some(p) => builder.add_source(File::from(p).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_FILE).required(false)),
        };

        let settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        let app_config: AppConfig = settings.try_deserialize()?;
        app_config.validate()?;

        tracing::debug!(?app_config, "configuration loaded");
        Ok(app_config)
    }
}
