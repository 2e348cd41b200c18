//! Flip Animation Engine
//!
//! Flipping logo glyphs: shapes that turn about a vertical axis, fold
//! through a color palette as they go and respond to clicks by spinning
//! faster or slower.
//!
//! # Features
//!
//! - **Palette blending**: half-step blended pairs so colors slide across
//!   the folding face
//! - **Spinners**: damped spin with a settle phase that always parks on a
//!   clean half turn
//! - **Glyph shapes**: curved disc and twisting bar outlines
//! - **Rendering**: four-pass painting onto any [`flip_paint::Canvas`]
//! - **Input**: distance-based click impulses
//!
//! # Example
//!
//! ```rust
//! use flip_animation::{Disc, Renderer, Spinner, SpinnerConfig};
//! use flip_paint::{PaintContext, Point};
//!
//! let mut spinner = Spinner::new(
//!     Disc,
//!     SpinnerConfig {
//!         radius: 59.0,
//!         center: Point::new(182.0, 98.0),
//!         initial_velocity: 0.3,
//!         ..Default::default()
//!     },
//! );
//!
//! let mut canvas = PaintContext::new(262.0, 180.0);
//! spinner.update();
//! Renderer::new().render(&spinner, &mut canvas);
//!
//! assert!(spinner.angle() > 0.0);
//! assert!(!canvas.commands().is_empty());
//! ```

pub mod input;
pub mod math;
pub mod palette;
pub mod render;
pub mod scheduler;
pub mod shape;
pub mod spinner;

pub use input::ImpulseMapper;
pub use palette::{BlendEdge, Fill, Palette, PaletteError, Rgb};
pub use render::Renderer;
pub use scheduler::{SpinnerId, SpinnerScheduler};
pub use shape::{Bar, Disc, GlyphShape};
pub use spinner::{SpinPhase, Spinner, SpinnerConfig};
