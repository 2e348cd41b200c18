//! Paint context - the main drawing API

use crate::color::Color;
use crate::gradient::Gradient;
use crate::path::{Path, Point};
use crate::primitives::{Rect, Size};
use serde::Serialize;

/// Fill style for shapes
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum FillStyle {
    Color(Color),
    Gradient(Gradient),
}

impl From<Color> for FillStyle {
    fn from(color: Color) -> Self {
        FillStyle::Color(color)
    }
}

impl From<Gradient> for FillStyle {
    fn from(gradient: Gradient) -> Self {
        FillStyle::Gradient(gradient)
    }
}

/// A paint command for the renderer
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum PaintCommand {
    ClearRect {
        rect: Rect,
    },
    FillPath {
        path: Path,
        style: FillStyle,
        /// Transform in effect when the fill was issued
        transform: Transform2D,
    },
    Save,
    Restore,
    Transform {
        transform: Transform2D,
    },
}

/// 2D affine transform
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transform2D {
    pub a: f32,
    pub b: f32,
    pub c: f32,
    pub d: f32,
    pub e: f32,
    pub f: f32,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    pub const fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
        }
    }

    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: x,
            f: y,
        }
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        }
    }

    /// `self` followed by `local`: the canvas semantics of calling
    /// `translate`/`scale` on top of the current transform.
    pub fn then(&self, local: &Transform2D) -> Transform2D {
        Transform2D {
            a: self.a * local.a + self.c * local.b,
            b: self.b * local.a + self.d * local.b,
            c: self.a * local.c + self.c * local.d,
            d: self.b * local.c + self.d * local.d,
            e: self.a * local.e + self.c * local.f + self.e,
            f: self.b * local.e + self.d * local.f + self.f,
        }
    }

    pub fn transform_point(&self, point: Point) -> Point {
        Point::new(
            self.a * point.x + self.c * point.y + self.e,
            self.b * point.x + self.d * point.y + self.f,
        )
    }
}

/// A 2D drawing surface
///
/// The subset of an HTML-canvas style context the flip renderer needs:
/// clearing, a save/restore transform stack and path fills.
pub trait Canvas {
    /// Surface size in device pixels
    fn size(&self) -> Size;

    fn clear_rect(&mut self, rect: Rect);

    fn save(&mut self);

    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    fn fill_path(&mut self, path: Path, style: FillStyle);
}

/// A recording canvas
///
/// Every call is recorded as a [`PaintCommand`] so a backend can replay it
/// later (or a test can inspect it).
pub struct PaintContext {
    size: Size,
    commands: Vec<PaintCommand>,
    transform: Transform2D,
    state_stack: Vec<Transform2D>,
}

impl PaintContext {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Size::new(width, height),
            commands: Vec::new(),
            transform: Transform2D::identity(),
            state_stack: Vec::new(),
        }
    }

    /// Resize the backing surface; like a canvas element, this also
    /// resets the transform stack.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.size = Size::new(width, height);
        self.transform = Transform2D::identity();
        self.state_stack.clear();
    }

    /// Get all recorded commands
    pub fn commands(&self) -> &[PaintCommand] {
        &self.commands
    }

    /// Drop recorded commands, e.g. at the start of a frame
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    pub fn current_transform(&self) -> Transform2D {
        self.transform
    }

    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    fn push_transform(&mut self, local: Transform2D) {
        self.transform = self.transform.then(&local);
        self.commands
            .push(PaintCommand::Transform { transform: local });
    }
}

impl Canvas for PaintContext {
    fn size(&self) -> Size {
        self.size
    }

    fn clear_rect(&mut self, rect: Rect) {
        self.commands.push(PaintCommand::ClearRect { rect });
    }

    fn save(&mut self) {
        self.state_stack.push(self.transform);
        self.commands.push(PaintCommand::Save);
    }

    fn restore(&mut self) {
        // Unbalanced restore is ignored, matching canvas behaviour
        if let Some(transform) = self.state_stack.pop() {
            self.transform = transform;
            self.commands.push(PaintCommand::Restore);
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.push_transform(Transform2D::translate(x, y));
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.push_transform(Transform2D::scale(sx, sy));
    }

    fn fill_path(&mut self, path: Path, style: FillStyle) {
        let transform = self.transform;
        self.commands.push(PaintCommand::FillPath {
            path,
            style,
            transform,
        });
    }
}

impl Default for PaintContext {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}
