//! Cinescroll CLI: command-line interface for scroll stories.
//!
//! Usage:
//!   cinescroll init <PATH>                  Write the built-in five-act story
//!   cinescroll validate <PATH>              Validate a story file
//!   cinescroll info [PATH]                  Show story and scene information
//!   cinescroll scrub [PATH] -p <PROGRESS>   Sample the camera at a progress value
//!   cinescroll simulate [PATH] -i <EVENTS>  Replay a JSONL scroll script

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

mod commands;

#[derive(Parser)]
#[command(
    name = "cinescroll",
    about = "Scroll-driven cinematic stories, headless",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// How `simulate` prints frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Act changes and a final summary
    Text,
    /// One JSON frame report per line
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the built-in five-act story to a file
    Init {
        /// Output story file
        path: PathBuf,

        /// Story name
        #[arg(short, long)]
        name: Option<String>,

        /// Layout seed
        #[arg(long)]
        seed: Option<u64>,

        /// Viewport height in pixels (defaults to config)
        #[arg(long)]
        viewport: Option<f64>,

        /// Document height in viewport pages (defaults to config)
        #[arg(long)]
        pages: Option<f64>,
    },

    /// Validate a story file
    Validate {
        /// Path to the story file
        path: PathBuf,
    },

    /// Show story and scene information
    Info {
        /// Story file (built-in five-act story when omitted)
        path: Option<PathBuf>,
    },

    /// Sample the camera at a progress value, approached from both ends
    Scrub {
        /// Story file (built-in five-act story when omitted)
        path: Option<PathBuf>,

        /// Progress in [0, 1]
        #[arg(short, long)]
        progress: f64,

        /// Smoothed scrub lag in seconds (immediate when omitted)
        #[arg(long)]
        lag: Option<f64>,

        /// Frames used to approach the target from each end
        #[arg(long, default_value = "120")]
        steps: u32,
    },

    /// Replay a scroll script through the mounted pipeline
    Simulate {
        /// Story file (built-in five-act story when omitted)
        path: Option<PathBuf>,

        /// JSONL scroll events
        #[arg(short, long)]
        input: PathBuf,

        /// Frame rate (defaults to config)
        #[arg(long)]
        fps: Option<u32>,

        /// Seconds to keep ticking after the last event
        #[arg(long, default_value = "2.0")]
        tail_secs: f64,

        /// Pace frames in real time
        #[arg(long)]
        realtime: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cinescroll_common::config::AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    cinescroll_common::logging::init_logging(&logging);

    match cli.command {
        Commands::Init {
            path,
            name,
            seed,
            viewport,
            pages,
        } => commands::init::run(&config, path, name, seed, viewport, pages),
        Commands::Validate { path } => commands::validate::run(path),
        Commands::Info { path } => commands::info::run(path),
        Commands::Scrub {
            path,
            progress,
            lag,
            steps,
        } => commands::scrub::run(path, progress, lag, steps),
        Commands::Simulate {
            path,
            input,
            fps,
            tail_secs,
            realtime,
            format,
        } => {
            let fps = fps.unwrap_or(config.playback.fps);
            commands::simulate::run(&config, path, input, fps, tail_secs, realtime, format).await
        }
    }
}
