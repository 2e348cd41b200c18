//! Flip CLI
//!
//! Runs the flip logo mode headlessly for a fixed number of frames with
//! scripted input and reports where the glyphs ended up.

use anyhow::{Context, Result};
use clap::Parser;
use flip_app::{Edge, FlipConfig, FlipMode, FrameReport, HeadlessRunConfig, HeadlessRuntime};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flip")]
#[command(author, version, about = "Run the flipping logo animation headlessly")]
struct Cli {
    /// Path to flip.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Container width in logical pixels
    #[arg(long, default_value_t = 262)]
    width: u32,

    /// Container height in logical pixels
    #[arg(long, default_value_t = 180)]
    height: u32,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 120)]
    frames: u32,

    /// Logical milliseconds per frame
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Render at twice the logical resolution
    #[arg(long)]
    high_density: bool,

    /// Activate an edge before a frame, e.g. `left@0` or `right@30`
    #[arg(long = "tap", value_parser = parse_tap)]
    taps: Vec<(Edge, u32)>,

    /// Click at a container x before a frame, e.g. `200@10`
    #[arg(long = "pointer", value_parser = parse_pointer)]
    pointers: Vec<(f32, u32)>,

    /// Print one JSON report per frame
    #[arg(long)]
    json: bool,
}

fn split_at_frame(s: &str) -> Result<(&str, u32), String> {
    let (what, frame) = s
        .split_once('@')
        .ok_or_else(|| format!("expected `<value>@<frame>`, got `{s}`"))?;
    let frame = frame
        .parse()
        .map_err(|e| format!("invalid frame `{frame}`: {e}"))?;
    Ok((what, frame))
}

fn parse_tap(s: &str) -> Result<(Edge, u32), String> {
    let (edge, frame) = split_at_frame(s)?;
    let edge = match edge.to_ascii_lowercase().as_str() {
        "left" | "i" => Edge::Left,
        "right" | "o" => Edge::Right,
        other => return Err(format!("unknown edge `{other}`, expected left or right")),
    };
    Ok((edge, frame))
}

fn parse_pointer(s: &str) -> Result<(f32, u32), String> {
    let (x, frame) = split_at_frame(s)?;
    let x = x.parse().map_err(|e| format!("invalid x `{x}`: {e}"))?;
    Ok((x, frame))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => FlipConfig::load(path)?,
        None => FlipConfig::default(),
    };
    if cli.high_density {
        config.high_density = true;
    }

    let mut mode = FlipMode::new(config).context("Failed to build flip mode")?;
    let run = HeadlessRunConfig {
        width: cli.width,
        height: cli.height,
        max_frames: cli.frames,
        tick_ms: cli.tick_ms,
    };

    let mut last: Option<FrameReport> = None;
    let mut output_error = None;
    HeadlessRuntime::run_mode(
        run,
        &mut mode,
        |ctx, mode| {
            for &(edge, _) in cli.taps.iter().filter(|(_, f)| *f == ctx.frame_index) {
                mode.activate_edge(edge);
            }
            for &(x, _) in cli.pointers.iter().filter(|(_, f)| *f == ctx.frame_index) {
                mode.pointer_down(x, cli.height as f32 / 2.0);
            }
        },
        |_, report| {
            if cli.json && output_error.is_none() {
                match serde_json::to_string(report) {
                    Ok(line) => println!("{line}"),
                    Err(e) => output_error = Some(e),
                }
            }
            last = Some(report.clone());
        },
    )?;

    if let Some(e) = output_error {
        return Err(e).context("Failed to serialize frame report");
    }

    if !cli.json {
        if let Some(report) = last {
            print_summary(&report);
        }
    }

    info!(frames = cli.frames, "flip run complete");
    Ok(())
}

fn print_summary(report: &FrameReport) {
    println!(
        "frame {} ({} ms){}",
        report.frame,
        report.elapsed_ms,
        if report.is_settled() { ", settled" } else { "" }
    );
    for spinner in &report.spinners {
        println!(
            "  {:<4} {:<8} angle {:>7.4}  velocity {:>8.4}  palette {}",
            spinner.name, spinner.phase, spinner.angle, spinner.velocity, spinner.palette_index
        );
    }
}
