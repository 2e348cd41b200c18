//! Palette and half-step color blending
//!
//! A glyph cycles through a fixed four-color palette. Each palette entry is
//! drawn as a blended pair with its neighbour so the folding face can show a
//! color sliding across it instead of popping from one color to the next.

use flip_paint::Color;
use thiserror::Error;

/// An RGB color with channels in canvas units (0.0 to 255.0)
///
/// Channels are kept as floats: half steps and fold shading produce
/// fractional values that are only rounded when handed to the canvas.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as f32, g as f32, b as f32)
    }

    fn zip(self, other: Rgb, f: impl Fn(f32, f32) -> f32) -> Rgb {
        Rgb::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }

    /// Midpoint between two colors, rounded to whole channel values
    pub fn midpoint(self, other: Rgb) -> Rgb {
        self.zip(other, |a, b| ((b - a) / 2.0 + a).round())
    }

    /// Half step from `self` towards `other`.
    ///
    /// The channel difference is rounded before halving, so the result can
    /// land on a half unit; it is not the same as [`Rgb::midpoint`].
    pub fn half_step_towards(self, other: Rgb) -> Rgb {
        self.zip(other, |a, b| (b - a).round() / 2.0 + a)
    }

    /// Subtract `amount` from every channel, never going below zero
    pub fn darken(self, amount: f32) -> Rgb {
        self.zip(self, |c, _| (c - amount).max(0.0))
    }

    /// Canvas color with the given opacity
    pub fn to_color(self, alpha: f32) -> Color {
        Color::from_channels(self.r, self.g, self.b, alpha)
    }
}

/// What a face is painted with: one color, or a pair blended by a gradient
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Fill {
    Solid(Rgb),
    Blend(Rgb, Rgb),
}

impl Fill {
    /// Narrow a blended pair to the half that is visible at `scale`:
    /// the first half while the face is turned forward, the second half
    /// once it has flipped over.
    pub fn half_step(&self, scale: f32) -> Fill {
        match *self {
            Fill::Solid(color) => Fill::Solid(color),
            Fill::Blend(from, to) => {
                let half = from.half_step_towards(to);
                if scale > 0.0 {
                    Fill::Blend(from, half)
                } else {
                    Fill::Blend(half, to)
                }
            }
        }
    }

    pub fn darken(&self, amount: f32) -> Fill {
        match *self {
            Fill::Solid(color) => Fill::Solid(color.darken(amount)),
            Fill::Blend(from, to) => Fill::Blend(from.darken(amount), to.darken(amount)),
        }
    }
}

/// Which side of a transition the blended color sits on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendEdge {
    /// `[color, midpoint to next]`
    Trailing,
    /// `[midpoint to next, next color]`
    Leading,
}

/// Palette construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PaletteError {
    #[error("palette needs exactly {expected} colors, got {found}")]
    WrongLength { expected: usize, found: usize },

    #[error("palette color {index} has channel {value} outside 0..=255")]
    ChannelOutOfRange { index: usize, value: f32 },

    #[error("palette color {index} has fractional channel {value}")]
    FractionalChannel { index: usize, value: f32 },
}

/// The gray a glyph shows before its first flip
pub const DEFAULT_START_COLOR: Rgb = Rgb::new(249.0, 249.0, 249.0);

/// An ordered, cyclic four-color palette
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    colors: [Rgb; Palette::LEN],
}

impl Palette {
    pub const LEN: usize = 4;

    /// Red, blue, green, yellow
    pub const BRAND: Palette = Palette {
        colors: [
            Rgb::new(223.0, 73.0, 62.0),
            Rgb::new(67.0, 134.0, 252.0),
            Rgb::new(13.0, 169.0, 95.0),
            Rgb::new(246.0, 195.0, 56.0),
        ],
    };

    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        let colors: [Rgb; Self::LEN] = colors.try_into().map_err(|_| PaletteError::WrongLength {
            expected: Self::LEN,
            found: colors.len(),
        })?;

        for (index, color) in colors.iter().enumerate() {
            for value in [color.r, color.g, color.b] {
                if !(0.0..=255.0).contains(&value) {
                    return Err(PaletteError::ChannelOutOfRange { index, value });
                }
                if value.fract() != 0.0 {
                    return Err(PaletteError::FractionalChannel { index, value });
                }
            }
        }

        Ok(Self { colors })
    }

    pub fn from_rgb8(colors: &[[u8; 3]]) -> Result<Self, PaletteError> {
        let colors: Vec<Rgb> = colors.iter().copied().map(Rgb::from_rgb8).collect();
        Self::new(&colors)
    }

    pub fn colors(&self) -> &[Rgb; Self::LEN] {
        &self.colors
    }

    /// Blended pair for every palette entry, in palette order.
    ///
    /// Entry `i` pairs `colors[i]` with the midpoint towards
    /// `colors[i + 1]` (wrapping); `edge` decides which side of the
    /// midpoint the pair covers.
    pub fn blend(&self, edge: BlendEdge) -> Vec<Fill> {
        let len = self.colors.len();
        (0..len)
            .map(|i| {
                let current = self.colors[i];
                let next = self.colors[(i + 1) % len];
                let mid = current.midpoint(next);
                match edge {
                    BlendEdge::Trailing => Fill::Blend(current, mid),
                    BlendEdge::Leading => Fill::Blend(mid, next),
                }
            })
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::BRAND
    }
}
