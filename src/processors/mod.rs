pub mod playback;
pub mod time_bucketer;

pub use playback::{PlaybackController, PlaybackMode, PlaybackSpeed, PlaybackSummary};
pub use time_bucketer::TimeBucketer;
