use crate::utils::constants::DEFAULT_OUTPUT_DIR;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "traffic-heatmap")]
#[command(about = "Animated hourly heatmaps of traffic intensity")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        help = "Configuration file [default: ./traffic-heatmap.{toml,json,yaml} if present]"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the heatmap for one day, as a static snapshot or an animation
    Show {
        #[arg(short, long, help = "Input CSV file path or http(s) URL")]
        source: String,

        #[arg(short, long, help = "Day to show (YYYY-MM-DD) [default: first day in the data]")]
        day: Option<NaiveDate>,

        #[arg(
            long,
            help = "Seconds between animation frames, 0.1 to 2.0 [default: from config, 0.5]"
        )]
        speed: Option<f64>,

        #[arg(short, long, help = "Animate every hour of the day instead of showing the latest")]
        play: bool,

        #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
        output_dir: PathBuf,

        #[arg(long, help = "Also keep a PNG snapshot of every frame")]
        keep_frames: bool,

        #[arg(long, help = "Column used as heat weight (e.g. 'linear_color_weighting')")]
        weight_column: Option<String>,

        #[arg(short, long, help = "Suppress terminal output")]
        quiet: bool,
    },

    /// Display information about a traffic dataset
    Info {
        #[arg(short, long, help = "Input CSV file path or http(s) URL")]
        source: String,

        #[arg(long, help = "Column used as heat weight (e.g. 'linear_color_weighting')")]
        weight_column: Option<String>,
    },
}
