use crate::models::TrafficRecord;
use crate::utils::coordinates::Centroid;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate counts of the row-level defects recovered while cleaning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningReport {
    pub total_rows: usize,
    pub retained_rows: usize,
    pub dropped_coordinates: usize,
    pub dropped_timestamps: usize,
    pub defaulted_weights: usize,
}

impl CleaningReport {
    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Cleaning Report ===\n");
        summary.push_str(&format!("Total Rows: {}\n", self.total_rows));
        summary.push_str(&format!("Retained Rows: {}\n", self.retained_rows));
        summary.push_str(&format!(
            "Dropped (bad coordinates): {}\n",
            self.dropped_coordinates
        ));
        summary.push_str(&format!(
            "Dropped (blank timestamp): {}\n",
            self.dropped_timestamps
        ));
        summary.push_str(&format!(
            "Weights defaulted to 0: {}\n",
            self.defaulted_weights
        ));

        summary
    }
}

/// The cleaned, session-wide table plus its spatial centroid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrafficDataset {
    pub source_id: String,
    pub records: Vec<TrafficRecord>,
    /// Mean position over every cleaned record; `None` when nothing survived cleaning
    pub centroid: Option<Centroid>,
    pub report: CleaningReport,
}

impl TrafficDataset {
    pub fn new(source_id: String, records: Vec<TrafficRecord>, report: CleaningReport) -> Self {
        let centroid = Centroid::from_points(records.iter().map(|r| r.position()));

        Self {
            source_id,
            records,
            centroid,
            report,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Inclusive `[min, max]` calendar dates present in the data
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date()).min()?;
        let max = self.records.iter().map(|r| r.date()).max()?;
        Some((min, max))
    }

    /// Records whose local date equals `day`, in source order
    pub fn records_on(&self, day: NaiveDate) -> impl Iterator<Item = &TrafficRecord> {
        self.records.iter().filter(move |r| r.date() == day)
    }
}
