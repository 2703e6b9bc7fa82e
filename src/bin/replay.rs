//! Replays recorded detections through a counting session.
//!
//! Input is one frame per line, each a JSON array of `[x, y, width, height]`
//! boxes; blank lines are empty frames.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use line_counter::{CountingLine, CountingSession, DetectionFilter, IntoDetections, SessionConfig};

#[derive(Parser, Debug)]
#[command(name = "line-counter-replay", about = "Count line crossings in recorded detections")]
struct Args {
    /// Detections file, one JSON array of [x, y, w, h] boxes per frame
    detections: PathBuf,
    /// JSON session config; unset fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Horizontal counting line offset, overriding the config
    #[arg(long)]
    line_y: Option<f32>,
    #[arg(long)]
    max_distance: Option<f32>,
    #[arg(long)]
    max_disappeared: Option<u32>,
    #[arg(long, default_value_t = 900)]
    frame_width: u32,
    #[arg(long, default_value_t = 600)]
    frame_height: u32,
    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Summary {
    frames: u64,
    total: u64,
    positive: u64,
    negative: u64,
    tracks_created: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;
    let filter = DetectionFilter::from_config(&config);
    let mut session = CountingSession::new(config).context("invalid session config")?;

    let text = fs::read_to_string(&args.detections)
        .with_context(|| format!("reading {}", args.detections.display()))?;

    let mut tracks_created = 0u64;
    for (lineno, line) in text.lines().enumerate() {
        let boxes: Vec<[f32; 4]> = if line.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str(line)
                .with_context(|| format!("parsing frame on line {}", lineno + 1))?
        };
        let detections = filter.apply(boxes.into_detections(), args.frame_width, args.frame_height);
        let report = session.process_frame(&detections);
        tracks_created += report.spawned.len() as u64;

        for event in &report.crossings {
            println!(
                "frame {:>6}  track {:>4}  {:?}  count {}",
                event.frame_id, event.track_id, event.direction, report.count
            );
        }
    }

    let counter = session.counter();
    let summary = Summary {
        frames: session.frame_id(),
        total: counter.total(),
        positive: counter.positive(),
        negative: counter.negative(),
        tracks_created,
    };
    info!(frames = summary.frames, total = summary.total, "replay finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Count: {}", summary.total);
    }
    Ok(())
}

fn load_config(args: &Args) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json =
                fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            SessionConfig::from_json_str(&json)
                .with_context(|| format!("loading {}", path.display()))?
        }
        None => SessionConfig::default(),
    };

    if let Some(y) = args.line_y {
        config.counting_line = CountingLine::Horizontal { y };
    }
    if let Some(d) = args.max_distance {
        config.tracker.max_match_distance = d;
    }
    if let Some(n) = args.max_disappeared {
        config.tracker.max_disappeared = n;
    }
    Ok(config)
}
