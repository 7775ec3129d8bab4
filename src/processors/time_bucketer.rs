use crate::models::{DayFrames, HourBucket, TrafficDataset, TrafficRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::debug;

/// Filters a dataset to one calendar day and groups it into hourly frames
pub struct TimeBucketer;

impl TimeBucketer {
    pub fn new() -> Self {
        Self
    }

    /// Group the records of `day` by hour bucket
    ///
    /// Returns `None` when no record falls on `day`; the caller reports that and stops.
    pub fn bucket_day(&self, dataset: &TrafficDataset, day: NaiveDate) -> Option<DayFrames> {
        let mut frames: BTreeMap<HourBucket, Vec<TrafficRecord>> = BTreeMap::new();

        for record in dataset.records_on(day) {
            frames
                .entry(record.hour_bucket())
                .or_default()
                .push(record.clone());
        }

        if frames.is_empty() {
            debug!(%day, "no records for day");
            return None;
        }

        let day_frames = DayFrames::new(day, frames);
        debug!(
            %day,
            frames = day_frames.frame_count(),
            records = day_frames.record_count(),
            "day bucketed"
        );
        Some(day_frames)
    }
}

impl Default for TimeBucketer {
    fn default() -> Self {
        Self::new()
    }
}
