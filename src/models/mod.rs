pub mod dataset;
pub mod frame;
pub mod record;

pub use dataset::{CleaningReport, TrafficDataset};
pub use frame::DayFrames;
pub use record::{HourBucket, TrafficRecord};
