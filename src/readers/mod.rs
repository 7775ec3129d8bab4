pub mod cache;
pub mod source;
pub mod traffic_reader;

pub use cache::{session_cache, DatasetCache};
pub use source::{decode_text, DataSource};
pub use traffic_reader::{coerce_weight, TrafficReader};
