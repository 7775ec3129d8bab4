use crate::models::{CleaningReport, HourBucket, TrafficDataset};
use crate::utils::coordinates::{Bounds, Centroid};
use chrono::NaiveDate;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug)]
pub struct DatasetStatistics {
    pub source_id: String,
    pub total_records: usize,
    pub cleaning: CleaningReport,
    pub date_range: Option<(NaiveDate, NaiveDate)>,
    pub centroid: Option<Centroid>,
    pub bounds: Option<Bounds>,
    pub weight_stats: Option<WeightStats>,
    /// Number of hourly frames available on each day
    pub frames_per_day: BTreeMap<NaiveDate, usize>,
}

#[derive(Debug)]
pub struct WeightStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub zero_weight_records: usize,
}

impl DatasetStatistics {
    pub fn detailed_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Traffic Dataset Summary ===\n");
        summary.push_str(&format!("Source: {}\n", self.source_id));
        summary.push_str(&format!("Records: {}\n", self.total_records));

        match self.date_range {
            Some((min, max)) => summary.push_str(&format!("Date Range: {} to {}\n", min, max)),
            None => summary.push_str("Date Range: (no data)\n"),
        }

        if let Some(c) = self.centroid {
            summary.push_str(&format!(
                "Map Centre: lat {:.5}, lon {:.5}\n",
                c.latitude(),
                c.longitude()
            ));
        }

        if let Some(b) = self.bounds {
            summary.push_str(&format!(
                "Bounds: x [{:.5}, {:.5}], y [{:.5}, {:.5}]\n",
                b.min_x, b.max_x, b.min_y, b.max_y
            ));
        }

        if let Some(ref w) = self.weight_stats {
            summary.push_str(&format!(
                "Weight: min {:.3}, max {:.3}, mean {:.3} ({} zero-weight records)\n",
                w.min, w.max, w.mean, w.zero_weight_records
            ));
        }

        summary.push('\n');
        summary.push_str(&self.cleaning.summary());

        if !self.frames_per_day.is_empty() {
            summary.push_str("\nHourly Frames Per Day:\n");
            for (day, frames) in &self.frames_per_day {
                summary.push_str(&format!("  {}: {} moments\n", day, frames));
            }
        }

        summary
    }
}

pub struct DatasetAnalyzer;

impl DatasetAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, dataset: &TrafficDataset) -> DatasetStatistics {
        let mut hours_per_day: BTreeMap<NaiveDate, BTreeSet<HourBucket>> = BTreeMap::new();
        for record in &dataset.records {
            hours_per_day
                .entry(record.date())
                .or_default()
                .insert(record.hour_bucket());
        }

        DatasetStatistics {
            source_id: dataset.source_id.clone(),
            total_records: dataset.len(),
            cleaning: dataset.report.clone(),
            date_range: dataset.date_range(),
            centroid: dataset.centroid,
            bounds: Bounds::from_points(dataset.records.iter().map(|r| r.position())),
            weight_stats: self.weight_stats(dataset),
            frames_per_day: hours_per_day
                .into_iter()
                .map(|(day, hours)| (day, hours.len()))
                .collect(),
        }
    }

    fn weight_stats(&self, dataset: &TrafficDataset) -> Option<WeightStats> {
        if dataset.is_empty() {
            return None;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut zero_weight_records = 0;

        for record in &dataset.records {
            min = min.min(record.weight);
            max = max.max(record.weight);
            sum += record.weight;
            if record.weight == 0.0 {
                zero_weight_records += 1;
            }
        }

        Some(WeightStats {
            min,
            max,
            mean: sum / dataset.len() as f64,
            zero_weight_records,
        })
    }
}

impl Default for DatasetAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
