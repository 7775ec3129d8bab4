use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use traffic_heatmap::config::{ColumnConfig, RenderConfig};
use traffic_heatmap::processors::{PlaybackMode, PlaybackSpeed};
use traffic_heatmap::readers::{DataSource, DatasetCache, TrafficReader};
use traffic_heatmap::render::{FileSurface, HeatmapRenderer, MessageLevel, RecordingSurface};
use traffic_heatmap::session::{self, Controls, SessionPlan};
use traffic_heatmap::ProcessingError;

const FIXTURE: &str = "\
Coordx,Coordy,timestamp,exponential_color_weighting,diffuse_logic_traffic
\"-99.133,\",\"19.432,\",2024-05-14 08:05:00,0.9,Alto
-99.140,19.420,2024-05-14 08:40:00,abc,Medio
-99.150,19.410,2024-05-14 09:10:00,0.4,Bajo
-99.160,19.400,2024-05-14 10:59:00,0.7,Alto
bad,19.400,2024-05-14 10:30:00,0.7,Alto
-99.100,19.500,2024-05-16 12:00:00,0.2,Bajo
";

fn fixture_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(FIXTURE.as_bytes()).expect("write fixture");
    file
}

fn small_renderer() -> HeatmapRenderer {
    HeatmapRenderer::new(
        RenderConfig {
            radius_pixels: 4,
            width: 48,
            height: 48,
            ..RenderConfig::default()
        },
        ColumnConfig::default(),
    )
}

fn may(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
}

#[tokio::test]
async fn test_load_and_clean_fixture() {
    let file = fixture_file();
    let source = DataSource::Local(file.path().to_path_buf());
    let dataset = TrafficReader::new().read(&source).await.unwrap();

    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.report.dropped_coordinates, 1);

    // Trailing separator stripped
    assert!((dataset.records[0].y_coord - 19.432).abs() < 1e-12);
    // Non-numeric weight kept with zero weight
    assert_eq!(dataset.records[1].weight, 0.0);
    assert!(dataset.records.iter().all(|r| r.weight >= 0.0));

    // Centroid over all cleaned rows, every day included
    let n = dataset.len() as f64;
    let mean_x = dataset.records.iter().map(|r| r.x_coord).sum::<f64>() / n;
    let mean_y = dataset.records.iter().map(|r| r.y_coord).sum::<f64>() / n;
    let centroid = dataset.centroid.unwrap();
    assert!((centroid.x - mean_x).abs() < 1e-12);
    assert!((centroid.y - mean_y).abs() < 1e-12);

    assert_eq!(dataset.date_range(), Some((may(14), may(16))));
}

#[tokio::test]
async fn test_cache_shares_one_dataset_per_source() {
    let file = fixture_file();
    let source = DataSource::Local(file.path().to_path_buf());
    let cache = DatasetCache::new();
    let reader = TrafficReader::new();

    let first = cache.get_or_load(&source, &reader).await.unwrap();
    let second = cache.get_or_load(&source, &reader).await.unwrap();

    assert!(std::sync::Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_fatal_timestamp_column() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Coordx,Coordy,timestamp,exponential_color_weighting").unwrap();
    writeln!(file, "-99.1,19.4,sometime,1").unwrap();

    let source = DataSource::Local(file.path().to_path_buf());
    let result = TrafficReader::new().read(&source).await;

    assert!(matches!(result, Err(ProcessingError::TimestampParse { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_static_session_shows_latest_hour() {
    let file = fixture_file();
    let source = DataSource::Local(file.path().to_path_buf());
    let dataset = TrafficReader::new().read(&source).await.unwrap();

    let plan = session::plan(&dataset, &Controls::default()).unwrap();
    let mut surface = RecordingSurface::new();
    let summary = session::run(&plan, &small_renderer(), &mut surface, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.mode, PlaybackMode::Static);
    let hours: Vec<String> = surface.shown_hours().iter().map(|h| h.to_string()).collect();
    assert_eq!(hours, vec!["2024-05-14 10:00:00".to_string()]);
    assert_eq!(surface.messages()[0].0, MessageLevel::Info);
}

#[tokio::test(start_paused = true)]
async fn test_animated_session_plays_each_hour_once() {
    let file = fixture_file();
    let source = DataSource::Local(file.path().to_path_buf());
    let dataset = TrafficReader::new().read(&source).await.unwrap();

    let controls = Controls {
        day: Some(may(14)),
        speed: PlaybackSpeed::new(0.2).unwrap(),
        play: true,
    };
    let plan = session::plan(&dataset, &controls).unwrap();
    let mut surface = RecordingSurface::new();
    let summary = session::run(&plan, &small_renderer(), &mut surface, None)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.frames_rendered, 3);
    let hours: Vec<String> = surface.shown_hours().iter().map(|h| h.to_string()).collect();
    assert_eq!(
        hours,
        vec![
            "2024-05-14 08:00:00".to_string(),
            "2024-05-14 09:00:00".to_string(),
            "2024-05-14 10:00:00".to_string(),
        ]
    );

    let instants = surface.map_instants();
    for pair in instants.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap >= Duration::from_millis(200) && gap < Duration::from_millis(210));
    }
}

#[tokio::test]
async fn test_day_without_data_reports_and_renders_nothing() {
    let file = fixture_file();
    let source = DataSource::Local(file.path().to_path_buf());
    let dataset = TrafficReader::new().read(&source).await.unwrap();

    let controls = Controls {
        day: Some(may(15)),
        ..Controls::default()
    };
    let plan = session::plan(&dataset, &controls).unwrap();
    assert!(matches!(plan, SessionPlan::NoData { .. }));

    let output = tempfile::tempdir().unwrap();
    let mut surface = FileSurface::new(output.path()).unwrap().with_echo(false);
    let summary = session::run(&plan, &small_renderer(), &mut surface, None)
        .await
        .unwrap();

    assert!(summary.is_none());
    assert!(!surface.map_png_path().exists());
}

#[tokio::test]
async fn test_file_surface_session_writes_map_artifacts() {
    let file = fixture_file();
    let source = DataSource::Local(file.path().to_path_buf());
    let dataset = TrafficReader::new().read(&source).await.unwrap();

    let plan = session::plan(&dataset, &Controls::default()).unwrap();
    let output = tempfile::tempdir().unwrap();
    let mut surface = FileSurface::new(output.path()).unwrap().with_echo(false);
    session::run(&plan, &small_renderer(), &mut surface, None)
        .await
        .unwrap();

    assert!(surface.map_png_path().exists());
    let label = std::fs::read_to_string(surface.label_path()).unwrap();
    assert_eq!(label, "Showing: 2024-05-14 10:00:00");

    let spec: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(surface.map_json_path()).unwrap()).unwrap();
    assert_eq!(spec["layers"][0]["data"].as_array().unwrap().len(), 1);
}
