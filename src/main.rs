//! ascii_donut - a spinning torus in the terminal
//!
//! Usage:
//!   ascii_donut                 - Animate a 20x20 donut until interrupted
//!   ascii_donut 40              - Animate on a 40x40 grid
//!   ascii_donut --dump debug    - Write 10 frames to ./debug/frame_XXX.txt

use anyhow::Context;
use ascii_donut::{AppConfig, Animator, TerminalDisplay};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_possible_value() {
            Some(value) => f.write_str(value.get_name()),
            None => Ok(()),
        }
    }
}

#[derive(Parser)]
#[command(name = "ascii_donut")]
#[command(version = "0.1.0")]
#[command(about = "Render a rotating ASCII torus in the terminal")]
struct Cli {
    /// Screen width and height in characters
    size: Option<usize>,

    /// Optional YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(long)]
    frames: Option<u64>,

    /// Delay between frames in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Write frames to files in DIR instead of the terminal
    #[arg(long, value_name = "DIR")]
    dump: Option<PathBuf>,

    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,
}

const DEFAULT_DUMP_FRAMES: u64 = 10;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
            .to_string()
    };

    // frames go to stdout, so logs must not
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .with_writer(std::io::stderr)
        .init();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .with_context(|| format!("Failed to load configuration from {:?}", cli.config))?;

    if let Some(size) = cli.size {
        config.screen.size = size;
    }
    if let Some(ms) = cli.interval_ms {
        config.animation.frame_interval_ms = ms;
    }

    let torus = config.torus_config().context("Invalid torus configuration")?;

    tracing::info!(
        size = torus.width(),
        minor_radius = torus.minor_radius(),
        major_radius = torus.major_radius(),
        viewer_distance = torus.viewer_distance(),
        projection_scale = torus.projection_scale(),
        "Torus configured"
    );

    let mut animator = Animator::new(torus, &config.animation);

    if let Some(dir) = cli.dump {
        let frames = cli.frames.unwrap_or(DEFAULT_DUMP_FRAMES);
        let paths = animator
            .dump(&dir, frames)
            .with_context(|| format!("Failed to write frames to {}", dir.display()))?;
        println!("Wrote {} frames to {}", paths.len(), dir.display());
        return Ok(());
    }

    tracing::info!(
        interval = ?Duration::from_millis(config.animation.frame_interval_ms),
        "Starting animation"
    );

    let mut display = TerminalDisplay::stdout().with_indent(config.screen.indent.clone());
    let frames = animator.run(&mut display, cli.frames)?;

    tracing::info!(frames, "Animation finished");
    Ok(())
}
