use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cleaned traffic observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficRecord {
    pub x_coord: f64,
    pub y_coord: f64,
    pub timestamp: NaiveDateTime,
    pub weight: f64,
    /// Verbatim value of the tooltip source column, if present
    pub tooltip: Option<String>,
}

impl TrafficRecord {
    pub fn new(
        x_coord: f64,
        y_coord: f64,
        timestamp: NaiveDateTime,
        weight: f64,
        tooltip: Option<String>,
    ) -> Self {
        Self {
            x_coord,
            y_coord,
            timestamp,
            weight,
            tooltip,
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.timestamp.date()
    }

    pub fn hour_bucket(&self) -> HourBucket {
        HourBucket::floor(self.timestamp)
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x_coord, self.y_coord)
    }
}

/// A timestamp floored to the start of its hour
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HourBucket(NaiveDateTime);

impl HourBucket {
    pub fn floor(timestamp: NaiveDateTime) -> Self {
        let start = NaiveTime::from_hms_opt(timestamp.hour(), 0, 0).unwrap_or_default();
        Self(timestamp.date().and_time(start))
    }

    pub fn start(&self) -> NaiveDateTime {
        self.0
    }
}

impl fmt::Display for HourBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}
