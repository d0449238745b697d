//! clipsync CLI: command-line access to the clip editor's timing engine.
//!
//! Usage:
//!   clipsync captions <FILE>              Summarize and validate a caption file
//!   clipsync lookup <FILE> --time <SECS>  Show the caption active at a time
//!   clipsync boundary [OPTIONS]           Check and clamp a clip boundary edit
//!   clipsync waveform <AUDIO> [OPTIONS]   Render a waveform strip in the terminal
//!   clipsync export <FILE> -o <OUT>       Export captions as SRT or WebVTT
//!   clipsync config                       Print the effective configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clipsync_common::config::EditorConfig;

mod commands;

#[derive(Parser)]
#[command(
    name = "clipsync",
    about = "Timing and sync tools for caption and clip editing",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Editor config file (defaults to the user config)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Which clip edge a boundary drag moves.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EdgeArg {
    Start,
    End,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize and validate a caption JSON file
    Captions {
        /// Path to the caption file
        path: PathBuf,
    },

    /// Show the segment and word active at a playback time
    Lookup {
        /// Path to the caption file
        path: PathBuf,

        /// Playback time in seconds
        #[arg(short, long)]
        time: f64,

        /// Caption animation: none|bounce|fade|karaoke|word-by-word
        #[arg(long, default_value = "none")]
        animation: String,
    },

    /// Validate a clip boundary and clamp a proposed edge position
    Boundary {
        /// Clip start in seconds
        #[arg(long)]
        start: f64,

        /// Clip end in seconds
        #[arg(long)]
        end: f64,

        /// Source video duration in seconds
        #[arg(long)]
        source_duration: f64,

        /// Edge being dragged
        #[arg(long, value_enum)]
        edge: Option<EdgeArg>,

        /// Proposed position for the dragged edge, in seconds
        #[arg(long = "to", requires = "edge")]
        target: Option<f64>,
    },

    /// Render a waveform strip for a WAV file
    Waveform {
        /// Path to a WAV file
        path: PathBuf,

        /// Track width in pixels
        #[arg(short, long, default_value = "240")]
        width: f64,

        /// Playhead position in seconds
        #[arg(short, long, default_value = "0")]
        time: f64,

        /// Draw with the muted palette
        #[arg(long)]
        muted: bool,
    },

    /// Export captions as SRT or WebVTT (picked from the output extension)
    Export {
        /// Path to the caption file
        path: PathBuf,

        /// Output subtitle path (.srt or .vtt)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => EditorConfig::load_from(path),
        None => EditorConfig::load(),
    };
    if cli.verbose {
        config.logging.level = "debug".to_string();
    }
    clipsync_common::logging::init_logging(&config.logging);
    tracing::debug!(config = ?cli.config, "Configuration loaded");

    match cli.command {
        Commands::Captions { path } => commands::captions::run(path, &config),
        Commands::Lookup {
            path,
            time,
            animation,
        } => commands::lookup::run(path, time, animation, &config),
        Commands::Boundary {
            start,
            end,
            source_duration,
            edge,
            target,
        } => commands::boundary::run(start, end, source_duration, edge, target, &config),
        Commands::Waveform {
            path,
            width,
            time,
            muted,
        } => commands::waveform::run(path, width, time, muted, &config).await,
        Commands::Export { path, output } => commands::export::run(path, output),
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}
