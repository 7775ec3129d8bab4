/// Default column names of the traffic dataset
pub const COLUMN_X: &str = "Coordx";
pub const COLUMN_Y: &str = "Coordy";
pub const COLUMN_TIMESTAMP: &str = "timestamp";
pub const COLUMN_WEIGHT: &str = "exponential_color_weighting";
pub const COLUMN_TOOLTIP: &str = "diffuse_logic_traffic";

/// Name of the derived weight field in rendered layer data
pub const FIELD_WEIGHT: &str = "weight";

/// Source text encoding
pub const DEFAULT_ENCODING: &str = "ISO-8859-1";

/// Characters stripped from coordinate fields before parsing
pub const COORDINATE_NOISE: &[char] = &[',', ';'];

/// Heatmap rendering defaults
pub const DEFAULT_RADIUS_PIXELS: u32 = 60;
pub const DEFAULT_ZOOM: f64 = 11.0;
pub const DEFAULT_PITCH: f64 = 45.0;
pub const DEFAULT_CANVAS_WIDTH: u32 = 1024;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 768;
pub const DEFAULT_TOOLTIP_TEMPLATE: &str = "Tráfico: {diffuse_logic_traffic}";

/// Web Mercator world size in pixels at zoom 0 (deck.gl convention)
pub const TILE_SIZE: f64 = 512.0;

/// Playback speed bounds in seconds between frames
pub const MIN_SPEED_SECS: f64 = 0.1;
pub const MAX_SPEED_SECS: f64 = 2.0;
pub const SPEED_STEP_SECS: f64 = 0.1;
pub const DEFAULT_SPEED_SECS: f64 = 0.5;

/// Display slot file names
pub const CURRENT_MAP_PNG: &str = "current_map.png";
pub const CURRENT_MAP_JSON: &str = "current_map.json";
pub const CURRENT_LABEL_FILE: &str = "current_label.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "output";

/// Configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "traffic-heatmap";
pub const ENV_PREFIX: &str = "TRAFFIC_HEATMAP";
