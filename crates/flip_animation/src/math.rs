//! Small numeric helpers

/// Sign of `x`: `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f32::signum`], zero (of either sign) maps to zero, so a
/// stationary spinner or a click dead on an anchor contributes nothing.
#[inline]
pub fn sign(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
