use crate::error::Result;
use crate::models::HourBucket;
use crate::render::heatmap::RenderedMap;
use crate::utils::constants::{CURRENT_LABEL_FILE, CURRENT_MAP_JSON, CURRENT_MAP_PNG};
use crate::utils::filename::frame_snapshot_filename;
use std::fs;
use std::path::{Path, PathBuf};
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Error,
}

/// Output slots a session draws into; every call replaces what the slot showed before
pub trait MapSurface {
    fn show_map(&mut self, hour: HourBucket, map: &RenderedMap) -> Result<()>;

    fn show_label(&mut self, label: &str) -> Result<()>;

    fn show_message(&mut self, level: MessageLevel, text: &str) -> Result<()>;
}

/// Writes the current map and label into fixed files under an output directory
pub struct FileSurface {
    output_dir: PathBuf,
    keep_frames: bool,
    echo: bool,
}

impl FileSurface {
    pub fn new(output_dir: &Path) -> Result<Self> {
        fs::create_dir_all(output_dir)?;
        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            keep_frames: false,
            echo: true,
        })
    }

    /// Also keep a `frame-YYYYMMDD-HH.png` snapshot of every map shown
    pub fn with_keep_frames(mut self, keep_frames: bool) -> Self {
        self.keep_frames = keep_frames;
        self
    }

    /// Echo labels and messages to stdout
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    pub fn map_png_path(&self) -> PathBuf {
        self.output_dir.join(CURRENT_MAP_PNG)
    }

    pub fn map_json_path(&self) -> PathBuf {
        self.output_dir.join(CURRENT_MAP_JSON)
    }

    pub fn label_path(&self) -> PathBuf {
        self.output_dir.join(CURRENT_LABEL_FILE)
    }
}

impl MapSurface for FileSurface {
    fn show_map(&mut self, hour: HourBucket, map: &RenderedMap) -> Result<()> {
        map.grid.save_png(&self.map_png_path())?;
        fs::write(self.map_json_path(), serde_json::to_vec_pretty(&map.spec)?)?;

        if self.keep_frames {
            map.grid
                .save_png(&frame_snapshot_filename(&self.output_dir, hour.start()))?;
        }

        debug!(%hour, points = map.point_count, "map slot updated");
        Ok(())
    }

    fn show_label(&mut self, label: &str) -> Result<()> {
        fs::write(self.label_path(), label)?;
        if self.echo {
            println!("{}", label);
        }
        Ok(())
    }

    fn show_message(&mut self, level: MessageLevel, text: &str) -> Result<()> {
        if self.echo {
            match level {
                MessageLevel::Info => println!("ℹ️  {}", text),
                MessageLevel::Error => println!("⚠️  {}", text),
            }
        }
        Ok(())
    }
}

/// One update observed by a [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Map {
        hour: HourBucket,
        point_count: usize,
        at: Instant,
    },
    Label {
        text: String,
        at: Instant,
    },
    Message {
        level: MessageLevel,
        text: String,
    },
}

/// In-memory surface keeping the current slots and a log of every update
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub current_map: Option<RenderedMap>,
    pub current_label: Option<String>,
    pub events: Vec<SurfaceEvent>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hours of every map update, in order
    pub fn shown_hours(&self) -> Vec<HourBucket> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Map { hour, .. } => Some(*hour),
                _ => None,
            })
            .collect()
    }

    /// Instants of every map update, in order
    pub fn map_instants(&self) -> Vec<Instant> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Map { at, .. } => Some(*at),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Message { level, text } => Some((*level, text.clone())),
                _ => None,
            })
            .collect()
    }
}

impl MapSurface for RecordingSurface {
    fn show_map(&mut self, hour: HourBucket, map: &RenderedMap) -> Result<()> {
        self.current_map = Some(map.clone());
        self.events.push(SurfaceEvent::Map {
            hour,
            point_count: map.point_count,
            at: Instant::now(),
        });
        Ok(())
    }

    fn show_label(&mut self, label: &str) -> Result<()> {
        self.current_label = Some(label.to_string());
        self.events.push(SurfaceEvent::Label {
            text: label.to_string(),
            at: Instant::now(),
        });
        Ok(())
    }

    fn show_message(&mut self, level: MessageLevel, text: &str) -> Result<()> {
        self.events.push(SurfaceEvent::Message {
            level,
            text: text.to_string(),
        });
        Ok(())
    }
}
