use crate::error::Result;
use crate::models::TrafficDataset;
use crate::readers::source::DataSource;
use crate::readers::traffic_reader::TrafficReader;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::debug;

/// Memoized datasets keyed by source and reader settings, never invalidated
#[derive(Default)]
pub struct DatasetCache {
    entries: Mutex<HashMap<String, Arc<TrafficDataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached dataset for `source` as cleaned by `reader`, loading it on first use
    pub async fn get_or_load(
        &self,
        source: &DataSource,
        reader: &TrafficReader,
    ) -> Result<Arc<TrafficDataset>> {
        let key = reader.cache_key(source);
        if let Some(dataset) = self.get(&key) {
            debug!(source = %key, "dataset cache hit");
            return Ok(dataset);
        }

        let loaded = Arc::new(reader.read(source).await?);

        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        // A concurrent caller may have finished first; keep whichever landed first
        let dataset = entries.entry(key).or_insert(loaded).clone();
        Ok(dataset)
    }

    pub fn get(&self, key: &str) -> Option<Arc<TrafficDataset>> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-scoped cache shared by every session in this process
pub fn session_cache() -> &'static DatasetCache {
    static CACHE: OnceLock<DatasetCache> = OnceLock::new();
    CACHE.get_or_init(DatasetCache::new)
}
