//! Flip Paint/Canvas API
//!
//! A small 2D drawing API in the shape of an HTML canvas context.
//!
//! # Features
//!
//! - Path drawing (lines, cubic curves)
//! - Fills with flat colors or linear gradients
//! - Save/restore transform stack with translate and scale
//! - A recording [`PaintContext`] that backends replay

pub mod color;
pub mod context;
pub mod gradient;
pub mod path;
pub mod primitives;

pub use color::Color;
pub use context::{Canvas, FillStyle, PaintCommand, PaintContext, Transform2D};
pub use gradient::{Gradient, GradientStop};
pub use path::{Path, PathBuilder, PathCommand, Point};
pub use primitives::*;
