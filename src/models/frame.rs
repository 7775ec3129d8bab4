use crate::models::{HourBucket, TrafficRecord};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// One day's records grouped by hour bucket, buckets in ascending order
#[derive(Debug, Clone, PartialEq)]
pub struct DayFrames {
    pub day: NaiveDate,
    frames: BTreeMap<HourBucket, Vec<TrafficRecord>>,
}

impl DayFrames {
    pub fn new(day: NaiveDate, frames: BTreeMap<HourBucket, Vec<TrafficRecord>>) -> Self {
        Self { day, frames }
    }

    /// Strictly increasing, duplicate-free bucket sequence
    pub fn buckets(&self) -> Vec<HourBucket> {
        self.frames.keys().copied().collect()
    }

    pub fn frame(&self, bucket: &HourBucket) -> &[TrafficRecord] {
        self.frames.get(bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn latest(&self) -> Option<(HourBucket, &[TrafficRecord])> {
        self.frames
            .iter()
            .next_back()
            .map(|(bucket, records)| (*bucket, records.as_slice()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (HourBucket, &[TrafficRecord])> {
        self.frames
            .iter()
            .map(|(bucket, records)| (*bucket, records.as_slice()))
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn record_count(&self) -> usize {
        self.frames.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
