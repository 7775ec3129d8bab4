use crate::analyzers::DatasetAnalyzer;
use crate::cli::args::{Cli, Commands};
use crate::config::AppConfig;
use crate::error::Result;
use crate::processors::{PlaybackMode, PlaybackSpeed};
use crate::readers::{session_cache, DataSource, TrafficReader};
use crate::render::{FileSurface, HeatmapRenderer};
use crate::session::{self, Controls, SessionPlan};
use crate::utils::progress::ProgressReporter;
use chrono::NaiveDate;

pub async fn run(cli: Cli) -> Result<()> {
    let mut app_config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Show {
            source,
            day,
            speed,
            play,
            output_dir,
            keep_frames,
            weight_column,
            quiet,
        } => {
            apply_weight_column(&mut app_config, weight_column);

            let source = DataSource::parse(&source);
            let reader = TrafficReader::from_config(&app_config);

            let loading = ProgressReporter::new_spinner("Loading traffic data...", quiet);
            let dataset = session_cache().get_or_load(&source, &reader).await?;
            loading.finish_with_message(&format!(
                "Loaded {} records from {}",
                dataset.len(),
                source
            ));

            let controls = show_controls(&app_config, day, speed, play)?;
            let plan = session::plan(&dataset, &controls)?;

            let progress = match &plan {
                SessionPlan::Ready {
                    frames,
                    mode: PlaybackMode::Animating,
                    ..
                } => Some(ProgressReporter::new(
                    frames.frame_count() as u64,
                    "Animating...",
                    quiet,
                )),
                _ => None,
            };

            if let SessionPlan::Ready { frames, .. } = &plan {
                if !quiet {
                    println!(
                        "There are {} moments in time on {}.",
                        frames.frame_count(),
                        frames.day
                    );
                }
            }

            let renderer = HeatmapRenderer::from_config(&app_config);
            let mut surface = FileSurface::new(&output_dir)?
                .with_keep_frames(keep_frames)
                .with_echo(echo_labels(quiet, progress.is_some()));

            let summary = session::run(&plan, &renderer, &mut surface, progress.as_ref()).await?;

            if let Some(summary) = summary {
                if !quiet {
                    println!(
                        "Rendered {} frame(s); current map at {}",
                        summary.frames_rendered,
                        surface.map_png_path().display()
                    );
                }
            }
        }

        Commands::Info {
            source,
            weight_column,
        } => {
            apply_weight_column(&mut app_config, weight_column);

            let source = DataSource::parse(&source);
            let reader = TrafficReader::from_config(&app_config);

            let loading = ProgressReporter::new_spinner("Loading traffic data...", false);
            let dataset = session_cache().get_or_load(&source, &reader).await?;
            loading.finish_with_message("Loaded");

            let stats = DatasetAnalyzer::new().analyze(&dataset);
            println!("\n{}", stats.detailed_summary());
        }
    }

    Ok(())
}

fn apply_weight_column(app_config: &mut AppConfig, weight_column: Option<String>) {
    if let Some(column) = weight_column {
        app_config.columns.weight = column;
    }
}

/// Controls for one `show` pass; `--speed` falls back to the configured default
fn show_controls(
    app_config: &AppConfig,
    day: Option<NaiveDate>,
    speed: Option<f64>,
    play: bool,
) -> Result<Controls> {
    Ok(Controls {
        day,
        speed: PlaybackSpeed::new(speed.unwrap_or(app_config.playback.default_speed))?,
        play,
    })
}

/// Labels go to stdout only when nothing else owns the terminal
fn echo_labels(quiet: bool, progress_active: bool) -> bool {
    !quiet && !progress_active
}
