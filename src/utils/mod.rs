pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod progress;
pub mod timestamp;

pub use constants::*;
pub use coordinates::{clean_coordinate, parse_coordinate, Bounds, Centroid};
pub use filename::frame_snapshot_filename;
pub use progress::ProgressReporter;
pub use timestamp::parse_timestamp;
