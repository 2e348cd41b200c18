//! Glyph outlines
//!
//! Each glyph is a unit-space control table traced into a [`Path`]. The
//! horizontal axis is multiplied by `radius * scale`, so as `scale` moves
//! from `1` through `0` to `-1` the outline folds flat and opens up
//! mirrored on the other side of the axis.

use crate::palette::BlendEdge;
use flip_paint::{Path, PathBuilder, Point};

/// The per-variant parts of a flipping glyph
pub trait GlyphShape: Send {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Closed outline at horizontal `scale`, in spinner-local coordinates
    /// (the spinner center is the origin). `angle` is the spinner's current
    /// angle, for shapes that twist as they turn.
    fn outline(&self, scale: f32, angle: f32, radius: f32) -> Path;

    /// How palette entries are paired into blends for this glyph
    fn blend_edge(&self) -> BlendEdge;

    /// Offsets of the two gradient stops across the face
    fn gradient_stops(&self) -> [f32; 2];

    /// Horizontal distance from the center to the point input is measured from
    fn anchor_offset(&self, radius: f32) -> f32;
}

/// A control point with Bezier handles relative to the point
#[derive(Clone, Copy, Debug)]
struct ControlPoint {
    point: Point,
    handle_in: Point,
    handle_out: Point,
}

impl ControlPoint {
    const fn new(point: (f32, f32), handle_in: (f32, f32), handle_out: (f32, f32)) -> Self {
        Self {
            point: Point::new(point.0, point.1),
            handle_in: Point::new(handle_in.0, handle_in.1),
            handle_out: Point::new(handle_out.0, handle_out.1),
        }
    }
}

/// Quarter-circle handle length for a cubic Bezier
const KAPPA: f32 = 0.55;

const DISC_ARC: [ControlPoint; 3] = [
    ControlPoint::new((0.0, 1.0), (0.0, 0.0), (KAPPA, 0.0)),
    ControlPoint::new((1.0, 0.0), (0.0, KAPPA), (0.0, -KAPPA)),
    ControlPoint::new((0.0, -1.0), (KAPPA, 0.0), (0.0, 0.0)),
];

/// The "O": a half disc whose curved side folds across the vertical axis
#[derive(Clone, Copy, Debug, Default)]
pub struct Disc;

impl GlyphShape for Disc {
    fn name(&self) -> &'static str {
        "disc"
    }

    fn outline(&self, scale: f32, _angle: f32, radius: f32) -> Path {
        let sx = radius * scale;
        let first = DISC_ARC[0].point;
        let mut builder = PathBuilder::new().move_to(first.x * radius, first.y * radius);

        for pair in DISC_ARC.windows(2) {
            let (prev, cur) = (pair[0], pair[1]);
            builder = builder.cubic_to(
                (prev.point.x + prev.handle_out.x) * sx,
                (prev.point.y + prev.handle_out.y) * radius,
                (cur.point.x + cur.handle_in.x) * sx,
                (cur.point.y + cur.handle_in.y) * radius,
                cur.point.x * sx,
                cur.point.y * radius,
            );
        }

        builder.close().build()
    }

    fn blend_edge(&self) -> BlendEdge {
        BlendEdge::Trailing
    }

    fn gradient_stops(&self) -> [f32; 2] {
        [0.1, 0.9]
    }

    fn anchor_offset(&self, radius: f32) -> f32 {
        radius
    }
}

/// Width of the bar relative to its radius
pub const BAR_WIDTH: f32 = 0.46;

const BAR_CORNERS: [Point; 4] = [
    Point::new(0.0, 1.0),
    Point::new(BAR_WIDTH, 1.0),
    Point::new(BAR_WIDTH, -1.0),
    Point::new(0.0, -1.0),
];

/// The "I": a straight-edged bar whose free edge stretches vertically
/// mid-turn, like a twisting ribbon
#[derive(Clone, Copy, Debug, Default)]
pub struct Bar;

impl Bar {
    /// Vertical stretch of the free edge. Flat faces are never stretched.
    pub fn skew(scale: f32, angle: f32) -> f32 {
        if scale.abs() == 1.0 {
            1.0
        } else {
            angle.sin().abs() / 8.0 + 1.0
        }
    }
}

impl GlyphShape for Bar {
    fn name(&self) -> &'static str {
        "bar"
    }

    fn outline(&self, scale: f32, angle: f32, radius: f32) -> Path {
        let skew = Self::skew(scale, angle);
        let first = BAR_CORNERS[0];
        let mut builder = PathBuilder::new().move_to(first.x * radius, first.y * radius);

        for (i, corner) in BAR_CORNERS.iter().enumerate().skip(1) {
            let x = corner.x * radius * scale;
            let mut y = corner.y * radius;
            if i == 1 || i == 2 {
                y *= skew;
            }
            builder = builder.line_to(x, y);
        }

        builder.close().build()
    }

    fn blend_edge(&self) -> BlendEdge {
        BlendEdge::Leading
    }

    fn gradient_stops(&self) -> [f32; 2] {
        [0.0, 0.5]
    }

    fn anchor_offset(&self, radius: f32) -> f32 {
        BAR_WIDTH * radius
    }
}
