use crate::error::{ProcessingError, Result};
use crate::models::{DayFrames, TrafficDataset};
use crate::processors::{
    PlaybackController, PlaybackMode, PlaybackSpeed, PlaybackSummary, TimeBucketer,
};
use crate::render::{HeatmapRenderer, MapSurface, MessageLevel};
use crate::utils::coordinates::Centroid;
use crate::utils::progress::ProgressReporter;
use chrono::NaiveDate;
use tracing::info;

/// User-controlled inputs of one evaluation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    /// `None` selects the earliest day in the data
    pub day: Option<NaiveDate>,
    pub speed: PlaybackSpeed,
    pub play: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            day: None,
            speed: PlaybackSpeed::default(),
            play: false,
        }
    }
}

/// Everything a pass will display, derived from the dataset and the controls alone
#[derive(Debug, Clone, PartialEq)]
pub enum SessionPlan {
    NoData {
        day: Option<NaiveDate>,
        message: String,
    },
    Ready {
        frames: DayFrames,
        centroid: Centroid,
        mode: PlaybackMode,
        speed: PlaybackSpeed,
    },
}

/// Pick the day to show: the requested one if within range, else the first day
pub fn resolve_day(
    dataset: &TrafficDataset,
    requested: Option<NaiveDate>,
) -> Result<Option<NaiveDate>> {
    let Some((min, max)) = dataset.date_range() else {
        return Ok(None);
    };

    match requested {
        None => Ok(Some(min)),
        Some(day) if day < min || day > max => {
            Err(ProcessingError::DayOutOfRange { day, min, max })
        }
        Some(day) => Ok(Some(day)),
    }
}

/// Derive the display plan for one pass; recomputed from scratch on every control change
pub fn plan(dataset: &TrafficDataset, controls: &Controls) -> Result<SessionPlan> {
    let Some(day) = resolve_day(dataset, controls.day)? else {
        return Ok(SessionPlan::NoData {
            day: controls.day,
            message: "No data available: the source has no usable rows.".to_string(),
        });
    };

    let frames = TimeBucketer::new().bucket_day(dataset, day);
    let (Some(frames), Some(centroid)) = (frames, dataset.centroid) else {
        return Ok(SessionPlan::NoData {
            day: Some(day),
            message: format!("No data for {}.", day),
        });
    };

    Ok(SessionPlan::Ready {
        frames,
        centroid,
        mode: PlaybackMode::from_play_flag(controls.play),
        speed: controls.speed,
    })
}

/// Execute a plan against a surface; `None` when the pass halted on missing data
pub async fn run<S: MapSurface>(
    plan: &SessionPlan,
    renderer: &HeatmapRenderer,
    surface: &mut S,
    progress: Option<&ProgressReporter>,
) -> Result<Option<PlaybackSummary>> {
    match plan {
        SessionPlan::NoData { message, .. } => {
            surface.show_message(MessageLevel::Error, message)?;
            Ok(None)
        }
        SessionPlan::Ready {
            frames,
            centroid,
            mode,
            speed,
        } => {
            info!(
                day = %frames.day,
                frames = frames.frame_count(),
                ?mode,
                speed = speed.secs(),
                "starting playback"
            );
            let summary = PlaybackController::new(*speed)
                .run(*mode, frames, *centroid, renderer, surface, progress)
                .await?;
            Ok(Some(summary))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnConfig, RenderConfig};
    use crate::models::{CleaningReport, TrafficRecord};
    use crate::render::RecordingSurface;

    fn dataset() -> TrafficDataset {
        let mut records = Vec::new();
        for (day, hour, x) in [(14, 8, -99.0), (14, 9, -99.2), (14, 10, -99.1), (16, 7, -98.5)] {
            let ts = NaiveDate::from_ymd_opt(2024, 5, day)
                .unwrap()
                .and_hms_opt(hour, 5, 0)
                .unwrap();
            records.push(TrafficRecord::new(x, 19.4, ts, 1.0, None));
        }
        TrafficDataset::new("test".to_string(), records, CleaningReport::default())
    }

    fn renderer() -> HeatmapRenderer {
        HeatmapRenderer::new(
            RenderConfig {
                radius_pixels: 3,
                width: 32,
                height: 32,
                ..RenderConfig::default()
            },
            ColumnConfig::default(),
        )
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[test]
    fn test_default_day_is_first_day() -> Result<()> {
        assert_eq!(resolve_day(&dataset(), None)?, Some(date(14)));
        Ok(())
    }

    #[test]
    fn test_day_outside_range_is_rejected() {
        assert!(matches!(
            resolve_day(&dataset(), Some(date(20))),
            Err(ProcessingError::DayOutOfRange { .. })
        ));
    }

    #[test]
    fn test_plan_uses_whole_dataset_centroid() -> Result<()> {
        let data = dataset();
        let controls = Controls {
            day: Some(date(16)),
            ..Controls::default()
        };

        match plan(&data, &controls)? {
            SessionPlan::Ready { centroid, frames, mode, .. } => {
                assert_eq!(Some(centroid), data.centroid);
                assert!((centroid.x - -98.95).abs() < 1e-9);
                assert_eq!(frames.frame_count(), 1);
                assert_eq!(mode, PlaybackMode::Static);
            }
            other => panic!("expected a ready plan, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn test_plan_is_deterministic() -> Result<()> {
        let data = dataset();
        let controls = Controls {
            play: true,
            ..Controls::default()
        };
        assert_eq!(plan(&data, &controls)?, plan(&data, &controls)?);
        Ok(())
    }

    #[tokio::test]
    async fn test_gap_day_halts_with_message() -> Result<()> {
        let data = dataset();
        let controls = Controls {
            day: Some(date(15)),
            ..Controls::default()
        };

        let session_plan = plan(&data, &controls)?;
        let mut surface = RecordingSurface::new();
        let summary = run(&session_plan, &renderer(), &mut surface, None).await?;

        assert!(summary.is_none());
        assert!(surface.shown_hours().is_empty());
        assert_eq!(
            surface.messages(),
            vec![(MessageLevel::Error, "No data for 2024-05-15.".to_string())]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_dataset_halts_with_message() -> Result<()> {
        let data = TrafficDataset::new("empty".to_string(), vec![], CleaningReport::default());
        let session_plan = plan(&data, &Controls::default())?;
        let mut surface = RecordingSurface::new();

        assert!(run(&session_plan, &renderer(), &mut surface, None).await?.is_none());
        assert_eq!(surface.messages().len(), 1);
        Ok(())
    }
}
