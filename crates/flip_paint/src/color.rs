//! Color types and utilities

use serde::Serialize;

/// RGBA color with f32 components (0.0 to 1.0)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[repr(C)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    /// Create from 0-255 channel values the way a 2D canvas parses
    /// `rgba(r, g, b, a)`: channels are rounded and clamped, alpha is 0-1.
    pub fn from_channels(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self {
            r: channel_to_unit(r),
            g: channel_to_unit(g),
            b: channel_to_unit(b),
            a: if alpha.is_nan() { 0.0 } else { alpha.clamp(0.0, 1.0) },
        }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
            (self.a * 255.0).round() as u8,
        ]
    }
}

fn channel_to_unit(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.round().clamp(0.0, 255.0) / 255.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_rounds_and_clamps() {
        let color = Color::from_channels(-17.0, 127.6, 300.0, 0.1);
        assert_eq!(color.to_rgba8()[..3], [0, 128, 255]);
        assert!((color.a - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn test_nan_channels_become_zero() {
        let color = Color::from_channels(f32::NAN, 249.0, 0.0, f32::NAN);
        assert_eq!(color.to_rgba8(), [0, 249, 0, 0]);
    }
}
