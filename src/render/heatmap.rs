use crate::config::{AppConfig, ColumnConfig, RenderConfig};
use crate::error::{ProcessingError, Result};
use crate::models::TrafficRecord;
use crate::render::colormap::{blend, heat_color};
use crate::utils::constants::FIELD_WEIGHT;
use crate::utils::coordinates::{mercator_world_pixels, Centroid};
use plotters::prelude::*;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::path::Path;

const BACKGROUND: (u8, u8, u8) = (24, 26, 33);

/// Intensities below this fraction of the peak are left transparent
const MIN_VISIBLE_INTENSITY: f64 = 0.01;

/// Camera anchoring every frame of a session
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
}

/// Accumulated heat per canvas pixel, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityGrid {
    pub width: usize,
    pub height: usize,
    data: Vec<f64>,
}

impl IntensityGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.width + x]
    }

    fn add(&mut self, x: usize, y: usize, value: f64) {
        self.data[y * self.width + x] += value;
    }

    pub fn peak(&self) -> f64 {
        self.data.iter().copied().fold(0.0, f64::max)
    }

    /// Pixel with the highest intensity, `None` for an all-zero grid
    pub fn peak_position(&self) -> Option<(usize, usize)> {
        let peak = self.peak();
        if peak <= 0.0 {
            return None;
        }
        self.data
            .iter()
            .position(|v| *v == peak)
            .map(|i| (i % self.width, i / self.width))
    }

    pub fn is_blank(&self) -> bool {
        self.peak() <= 0.0
    }

    /// Paint the grid through the heat ramp and save it as a PNG
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let root = BitMapBackend::new(path, (self.width as u32, self.height as u32))
            .into_drawing_area();
        root.fill(&RGBColor(BACKGROUND.0, BACKGROUND.1, BACKGROUND.2))
            .map_err(|e| ProcessingError::Render(e.to_string()))?;

        let peak = self.peak();
        if peak > 0.0 {
            for y in 0..self.height {
                for x in 0..self.width {
                    let intensity = self.get(x, y) / peak;
                    if intensity < MIN_VISIBLE_INTENSITY {
                        continue;
                    }
                    // Opacity ramps in faster than colour so faint heat stays visible
                    let alpha = intensity.sqrt();
                    let (r, g, b) = blend(heat_color(intensity), BACKGROUND, alpha);
                    root.draw_pixel((x as i32, y as i32), &RGBColor(r, g, b))
                        .map_err(|e| ProcessingError::Render(e.to_string()))?;
                }
            }
        }

        root.present()
            .map_err(|e| ProcessingError::Render(e.to_string()))?;
        Ok(())
    }
}

/// One rendered frame: a deck.gl view spec plus its rasterised heat
#[derive(Debug, Clone)]
pub struct RenderedMap {
    pub view: ViewState,
    pub spec: Value,
    pub grid: IntensityGrid,
    pub point_count: usize,
}

/// Builds heatmap artifacts centred on a fixed centroid
pub struct HeatmapRenderer {
    config: RenderConfig,
    columns: ColumnConfig,
}

impl HeatmapRenderer {
    pub fn new(config: RenderConfig, columns: ColumnConfig) -> Self {
        Self { config, columns }
    }

    pub fn from_config(app_config: &AppConfig) -> Self {
        Self::new(app_config.render.clone(), app_config.columns.clone())
    }

    pub fn view_state(&self, centroid: Centroid) -> ViewState {
        ViewState {
            latitude: centroid.latitude(),
            longitude: centroid.longitude(),
            zoom: self.config.zoom,
            pitch: self.config.pitch,
            bearing: 0.0,
        }
    }

    pub fn render(&self, records: &[TrafficRecord], centroid: Centroid) -> RenderedMap {
        let view = self.view_state(centroid);

        RenderedMap {
            view,
            spec: self.deck_spec(records, &view),
            grid: self.rasterize(records, &view),
            point_count: records.len(),
        }
    }

    /// Screen position of a point; pitch foreshortens the vertical axis
    pub fn project(&self, view: &ViewState, x_coord: f64, y_coord: f64) -> (f64, f64) {
        let (cx, cy) = mercator_world_pixels(view.longitude, view.latitude, view.zoom);
        let (px, py) = mercator_world_pixels(x_coord, y_coord, view.zoom);
        let tilt = view.pitch.to_radians().cos();

        (
            self.config.width as f64 / 2.0 + (px - cx),
            self.config.height as f64 / 2.0 + (py - cy) * tilt,
        )
    }

    fn rasterize(&self, records: &[TrafficRecord], view: &ViewState) -> IntensityGrid {
        let width = self.config.width as usize;
        let height = self.config.height as usize;
        let mut grid = IntensityGrid::new(width, height);

        let radius = self.config.radius_pixels as i64;
        let sigma = (radius as f64 / 3.0).max(0.5);
        let two_sigma_sq = 2.0 * sigma * sigma;

        for record in records.iter().filter(|r| r.weight > 0.0) {
            let (sx, sy) = self.project(view, record.x_coord, record.y_coord);
            let (cx, cy) = (sx.round() as i64, sy.round() as i64);

            for dy in -radius..=radius {
                let y = cy + dy;
                if y < 0 || y >= height as i64 {
                    continue;
                }
                for dx in -radius..=radius {
                    let x = cx + dx;
                    if x < 0 || x >= width as i64 {
                        continue;
                    }
                    let dist_sq = (dx * dx + dy * dy) as f64;
                    if dist_sq > (radius * radius) as f64 {
                        continue;
                    }
                    grid.add(
                        x as usize,
                        y as usize,
                        record.weight * (-dist_sq / two_sigma_sq).exp(),
                    );
                }
            }
        }

        grid
    }

    fn deck_spec(&self, records: &[TrafficRecord], view: &ViewState) -> Value {
        let data: Vec<Value> = records
            .iter()
            .map(|record| {
                let mut row = Map::new();
                row.insert(self.columns.x.clone(), json!(record.x_coord));
                row.insert(self.columns.y.clone(), json!(record.y_coord));
                row.insert(FIELD_WEIGHT.to_string(), json!(record.weight));
                if let (Some(column), Some(value)) = (&self.columns.tooltip, &record.tooltip) {
                    row.insert(column.clone(), json!(value));
                }
                Value::Object(row)
            })
            .collect();

        json!({
            "initialViewState": view,
            "layers": [{
                "@@type": "HeatmapLayer",
                "id": "traffic-heatmap",
                "data": data,
                "getPosition": format!("@@=[{}, {}]", self.columns.x, self.columns.y),
                "getWeight": format!("@@={}", FIELD_WEIGHT),
                "radiusPixels": self.config.radius_pixels,
            }],
            "tooltip": { "text": self.config.tooltip_template },
        })
    }
}
