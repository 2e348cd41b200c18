//! Flip Application
//!
//! The flip logo mode: two flipping glyphs laid out in a container, driven
//! frame by frame and painted onto recording surfaces.
//!
//! # Example
//!
//! ```rust
//! use flip_app::{FlipConfig, FlipMode};
//!
//! let mut mode = FlipMode::new(FlipConfig::default()).unwrap();
//! mode.resize(262.0, 180.0);
//! mode.activate();
//! mode.pointer_down(200.0, 90.0);
//!
//! let report = mode.frame(16).unwrap();
//! assert_eq!(report.spinners.len(), 2);
//! ```

pub mod config;
pub mod headless;
pub mod mode;

pub use config::FlipConfig;
pub use flip_core::Edge;
pub use headless::{HeadlessContext, HeadlessRunConfig, HeadlessRuntime};
pub use mode::{FlipMode, FrameReport, SpinnerSnapshot};
