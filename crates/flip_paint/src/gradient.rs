//! Gradient fills

use crate::color::Color;
use crate::path::Point;
use serde::Serialize;

/// A gradient stop
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct GradientStop {
    pub offset: f32, // 0.0 to 1.0
    pub color: Color,
}

impl GradientStop {
    pub const fn new(offset: f32, color: Color) -> Self {
        Self { offset, color }
    }
}

/// Gradient type
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Gradient {
    Linear {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
}

impl Gradient {
    /// Create a linear gradient with an explicit stop list
    pub fn linear(start: Point, end: Point, stops: impl Into<Vec<GradientStop>>) -> Self {
        Gradient::Linear {
            start,
            end,
            stops: stops.into(),
        }
    }

    pub fn stops(&self) -> &[GradientStop] {
        match self {
            Gradient::Linear { stops, .. } => stops,
        }
    }
}
