use crate::error::{ProcessingError, Result};
use crate::models::{DayFrames, HourBucket, TrafficRecord};
use crate::render::{HeatmapRenderer, MapSurface, MessageLevel};
use crate::utils::constants::{DEFAULT_SPEED_SECS, MAX_SPEED_SECS, MIN_SPEED_SECS, SPEED_STEP_SECS};
use crate::utils::coordinates::Centroid;
use crate::utils::progress::ProgressReporter;
use std::time::Duration;
use tracing::debug;

/// Delay between animation frames, within [0.1, 2.0] seconds on a 0.1 s grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackSpeed(f64);

impl PlaybackSpeed {
    pub fn new(secs: f64) -> Result<Self> {
        if !(MIN_SPEED_SECS..=MAX_SPEED_SECS).contains(&secs) {
            return Err(ProcessingError::InvalidSpeed(secs));
        }
        let steps_per_sec = (1.0 / SPEED_STEP_SECS).round();
        Ok(Self((secs * steps_per_sec).round() / steps_per_sec))
    }

    pub fn secs(&self) -> f64 {
        self.0
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs_f64(self.0)
    }
}

impl Default for PlaybackSpeed {
    fn default() -> Self {
        Self(DEFAULT_SPEED_SECS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    /// Show only the latest hour of the day
    Static,
    /// Walk every hour of the day once, pausing between frames
    Animating,
}

impl PlaybackMode {
    pub fn from_play_flag(play: bool) -> Self {
        if play {
            PlaybackMode::Animating
        } else {
            PlaybackMode::Static
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackSummary {
    pub mode: PlaybackMode,
    pub frames_rendered: usize,
}

pub struct PlaybackController {
    speed: PlaybackSpeed,
}

impl PlaybackController {
    pub fn new(speed: PlaybackSpeed) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub async fn run<S: MapSurface>(
        &self,
        mode: PlaybackMode,
        frames: &DayFrames,
        centroid: Centroid,
        renderer: &HeatmapRenderer,
        surface: &mut S,
        progress: Option<&ProgressReporter>,
    ) -> Result<PlaybackSummary> {
        let frames_rendered = match mode {
            PlaybackMode::Static => self.show_latest(frames, centroid, renderer, surface)?,
            PlaybackMode::Animating => {
                self.animate(frames, centroid, renderer, surface, progress)
                    .await?
            }
        };

        Ok(PlaybackSummary {
            mode,
            frames_rendered,
        })
    }

    fn show_latest<S: MapSurface>(
        &self,
        frames: &DayFrames,
        centroid: Centroid,
        renderer: &HeatmapRenderer,
        surface: &mut S,
    ) -> Result<usize> {
        let Some((hour, records)) = frames.latest() else {
            return Ok(0);
        };

        surface.show_label(&format!("Showing: {}", hour))?;
        draw(hour, records, centroid, renderer, surface)?;
        surface.show_message(
            MessageLevel::Info,
            &format!(
                "Start the animation (--play) to watch traffic move through the {} hourly frames of {}.",
                frames.frame_count(),
                frames.day
            ),
        )?;

        Ok(1)
    }

    async fn animate<S: MapSurface>(
        &self,
        frames: &DayFrames,
        centroid: Centroid,
        renderer: &HeatmapRenderer,
        surface: &mut S,
        progress: Option<&ProgressReporter>,
    ) -> Result<usize> {
        let mut rendered = 0;

        for (hour, records) in frames.iter() {
            if records.is_empty() {
                continue;
            }

            let label = format!("Hour shown: {}", hour);
            surface.show_label(&label)?;
            draw(hour, records, centroid, renderer, surface)?;
            rendered += 1;

            if let Some(p) = progress {
                p.set_message(&label);
                p.increment(1);
            }

            tokio::time::sleep(self.speed.as_duration()).await;
        }

        if let Some(p) = progress {
            p.finish_with_message(&format!("Animated {} frames of {}", rendered, frames.day));
        }

        Ok(rendered)
    }
}

fn draw<S: MapSurface>(
    hour: HourBucket,
    records: &[TrafficRecord],
    centroid: Centroid,
    renderer: &HeatmapRenderer,
    surface: &mut S,
) -> Result<()> {
    let map = renderer.render(records, centroid);
    debug!(%hour, points = map.point_count, "frame rendered");
    surface.show_map(hour, &map)
}
