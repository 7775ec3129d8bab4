use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required column: '{0}'")]
    MissingColumn(String),

    #[error("Unparseable timestamp on row {row}: '{value}'")]
    TimestampParse { row: usize, value: String },

    #[error("Unsupported or undecodable text encoding: {0}")]
    Encoding(String),

    #[error("Day {day} is outside the available range [{min}, {max}]")]
    DayOutOfRange {
        day: NaiveDate,
        min: NaiveDate,
        max: NaiveDate,
    },

    #[error("Playback speed {0}s is outside the range [0.1, 2.0]")]
    InvalidSpeed(f64),

    #[error("Render error: {0}")]
    Render(String),
}
