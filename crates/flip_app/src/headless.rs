//! Headless runtime for deterministic flip runs without a window.

use anyhow::{bail, Result};

use crate::mode::{FlipMode, FrameReport};

/// Configuration for deterministic headless frame execution.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessRunConfig {
    /// Container width in logical pixels.
    pub width: u32,
    /// Container height in logical pixels.
    pub height: u32,
    /// Number of frames to execute.
    pub max_frames: u32,
    /// Logical milliseconds between frames.
    pub tick_ms: u64,
}

impl Default for HeadlessRunConfig {
    fn default() -> Self {
        Self {
            width: 262,
            height: 180,
            max_frames: 120,
            tick_ms: 16,
        }
    }
}

/// Frame context passed to headless frame callbacks.
#[derive(Debug, Clone, Copy)]
pub struct HeadlessContext {
    pub frame_index: u32,
    pub width: u32,
    pub height: u32,
    pub elapsed_ms: u64,
}

/// Deterministic headless runtime loop.
pub struct HeadlessRuntime;

impl HeadlessRuntime {
    /// Run a fixed frame budget in headless mode.
    pub fn run<F>(cfg: HeadlessRunConfig, mut on_frame: F) -> Result<()>
    where
        F: FnMut(&HeadlessContext),
    {
        if cfg.width == 0 || cfg.height == 0 {
            bail!("headless dimensions must be non-zero");
        }
        if cfg.max_frames == 0 {
            bail!("headless max_frames must be > 0");
        }
        if cfg.tick_ms == 0 {
            bail!("headless tick_ms must be > 0");
        }

        for frame in 0..cfg.max_frames {
            let elapsed_ms = cfg.tick_ms.saturating_mul(frame as u64);
            on_frame(&HeadlessContext {
                frame_index: frame,
                width: cfg.width,
                height: cfg.height,
                elapsed_ms,
            });
        }

        Ok(())
    }

    /// Drive a [`FlipMode`] through the frame budget.
    ///
    /// The mode is resized to the run dimensions and activated first.
    /// `before_frame` runs ahead of each frame so callers can script input;
    /// `on_report` receives every frame's report.
    pub fn run_mode<B, R>(
        cfg: HeadlessRunConfig,
        mode: &mut FlipMode,
        mut before_frame: B,
        mut on_report: R,
    ) -> Result<()>
    where
        B: FnMut(&HeadlessContext, &mut FlipMode),
        R: FnMut(&HeadlessContext, &FrameReport),
    {
        mode.resize(cfg.width as f32, cfg.height as f32);
        mode.activate();

        Self::run(cfg, |ctx| {
            before_frame(ctx, mode);
            if let Some(report) = mode.frame(cfg.tick_ms) {
                on_report(ctx, &report);
            }
        })
    }
}
