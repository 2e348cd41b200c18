//! Pointer input to spin impulses
//!
//! A click pushes every spinner within reach. The push points away from the
//! click and is strongest halfway across the influence range:
//! `(range - |d|) * |d| / strength`, where `d` is the horizontal distance
//! from the spinner's anchor to the click.

use crate::math::sign;
use crate::spinner::Spinner;
use tracing::trace;

/// Divisor turning distance falloff into radians per frame
pub const DEFAULT_STRENGTH: f32 = 1000.0;

/// Maps pointer positions to angular-velocity impulses
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImpulseMapper {
    /// Clicks farther than this from an anchor have no effect
    pub influence_range: f32,
    pub strength: f32,
}

impl ImpulseMapper {
    pub fn new(influence_range: f32) -> Self {
        Self {
            influence_range,
            strength: DEFAULT_STRENGTH,
        }
    }

    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }

    /// Velocity change for a click `distance` pixels right of an anchor,
    /// or `None` when it is out of reach
    pub fn impulse(&self, distance: f32) -> Option<f32> {
        let reach = distance.abs();
        if reach < self.influence_range {
            Some(sign(distance) * (self.influence_range - reach) * reach / self.strength)
        } else {
            None
        }
    }

    /// Push every spinner in reach of a click at `pointer_x`. Each spinner is
    /// handled on its own; returns how many were pushed.
    pub fn apply<'a>(
        &self,
        pointer_x: f32,
        spinners: impl IntoIterator<Item = &'a mut Spinner>,
    ) -> usize {
        let mut pushed = 0;
        for spinner in spinners {
            let distance = pointer_x - spinner.anchor_x();
            if let Some(delta) = self.impulse(distance) {
                trace!(spinner = spinner.name(), distance, delta, "impulse");
                spinner.apply_impulse(delta);
                pushed += 1;
            }
        }
        pushed
    }
}
