pub mod colormap;
pub mod heatmap;
pub mod surface;

pub use heatmap::{HeatmapRenderer, IntensityGrid, RenderedMap, ViewState};
pub use surface::{FileSurface, MapSurface, MessageLevel, RecordingSurface, SurfaceEvent};
