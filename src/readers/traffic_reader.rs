use crate::config::{AppConfig, ColumnConfig};
use crate::error::{ProcessingError, Result};
use crate::models::{CleaningReport, TrafficDataset, TrafficRecord};
use crate::readers::source::{decode_text, DataSource};
use crate::utils::constants::DEFAULT_ENCODING;
use crate::utils::coordinates::parse_coordinate;
use crate::utils::timestamp::parse_timestamp;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

/// Column positions resolved from the header row
#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    x: usize,
    y: usize,
    timestamp: usize,
    weight: usize,
    tooltip: Option<usize>,
}

/// Loads a traffic table and cleans it into a [`TrafficDataset`]
pub struct TrafficReader {
    columns: ColumnConfig,
    encoding: String,
}

impl TrafficReader {
    pub fn new() -> Self {
        Self {
            columns: ColumnConfig::default(),
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    pub fn with_columns(columns: ColumnConfig) -> Self {
        Self {
            columns,
            encoding: DEFAULT_ENCODING.to_string(),
        }
    }

    pub fn with_encoding(mut self, encoding: &str) -> Self {
        self.encoding = encoding.to_string();
        self
    }

    pub fn from_config(app_config: &AppConfig) -> Self {
        Self::with_columns(app_config.columns.clone()).with_encoding(&app_config.source.encoding)
    }

    /// Identify the dataset this reader produces from `source`
    ///
    /// Two readers share a key only when they select the same columns and decode
    /// with the same encoding.
    pub fn cache_key(&self, source: &DataSource) -> String {
        format!(
            "{}|x={}|y={}|timestamp={}|weight={}|tooltip={}|encoding={}",
            source.identifier(),
            self.columns.x,
            self.columns.y,
            self.columns.timestamp,
            self.columns.weight,
            self.columns.tooltip.as_deref().unwrap_or(""),
            self.encoding.trim().to_ascii_lowercase()
        )
    }

    /// Fetch, decode and clean the whole source
    pub async fn read(&self, source: &DataSource) -> Result<TrafficDataset> {
        info!(%source, "reading traffic data");
        let bytes = source.fetch().await?;
        debug!(bytes = bytes.len(), "source fetched");
        self.parse_bytes(&bytes, &source.identifier())
    }

    pub fn parse_bytes(&self, bytes: &[u8], source_id: &str) -> Result<TrafficDataset> {
        let text = decode_text(bytes, &self.encoding)?;
        self.parse_text(&text, source_id)
    }

    /// Clean a decoded CSV table
    ///
    /// Rows with unusable coordinates or a blank timestamp are dropped, unparseable
    /// weights become 0.0, and any other unparseable timestamp fails the whole load.
    pub fn parse_text(&self, text: &str, source_id: &str) -> Result<TrafficDataset> {
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(Trim::Headers)
            .from_reader(text.as_bytes());

        let indices = self.locate_columns(reader.headers()?)?;
        let mut report = CleaningReport::default();
        let mut records = Vec::new();

        for row in reader.records() {
            let row = row?;
            report.total_rows += 1;

            if let Some(record) = self.clean_row(&row, indices, &mut report)? {
                records.push(record);
            }
        }

        report.retained_rows = records.len();
        info!(
            source = source_id,
            total = report.total_rows,
            retained = report.retained_rows,
            "traffic data cleaned"
        );
        debug!(
            dropped_coordinates = report.dropped_coordinates,
            dropped_timestamps = report.dropped_timestamps,
            defaulted_weights = report.defaulted_weights,
            "row-level defects recovered"
        );

        Ok(TrafficDataset::new(source_id.to_string(), records, report))
    }

    fn locate_columns(&self, headers: &StringRecord) -> Result<ColumnIndices> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| ProcessingError::MissingColumn(name.to_string()))
        };

        Ok(ColumnIndices {
            x: require(&self.columns.x)?,
            y: require(&self.columns.y)?,
            timestamp: require(&self.columns.timestamp)?,
            weight: require(&self.columns.weight)?,
            tooltip: self.columns.tooltip.as_deref().and_then(find),
        })
    }

    fn clean_row(
        &self,
        row: &StringRecord,
        indices: ColumnIndices,
        report: &mut CleaningReport,
    ) -> Result<Option<TrafficRecord>> {
        let x = row.get(indices.x).and_then(parse_coordinate);
        let y = row.get(indices.y).and_then(parse_coordinate);
        let (Some(x_coord), Some(y_coord)) = (x, y) else {
            report.dropped_coordinates += 1;
            return Ok(None);
        };

        let raw_timestamp = row.get(indices.timestamp).unwrap_or("");
        if raw_timestamp.trim().is_empty() {
            report.dropped_timestamps += 1;
            return Ok(None);
        }
        let timestamp =
            parse_timestamp(raw_timestamp).ok_or_else(|| ProcessingError::TimestampParse {
                row: row.position().map_or(report.total_rows, |p| p.line() as usize),
                value: raw_timestamp.to_string(),
            })?;

        let weight = match coerce_weight(row.get(indices.weight)) {
            Some(weight) => weight,
            None => {
                report.defaulted_weights += 1;
                0.0
            }
        };

        let tooltip = indices
            .tooltip
            .and_then(|i| row.get(i))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Some(TrafficRecord::new(
            x_coord, y_coord, timestamp, weight, tooltip,
        )))
    }
}

impl Default for TrafficReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Numeric coercion of a weight cell; `None` when the caller must fall back to 0.0
pub fn coerce_weight(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|w| w.is_finite() && *w >= 0.0)
}
