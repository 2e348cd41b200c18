//! Flipping glyph spinner
//!
//! A spinner turns about its vertical axis. Its rotation is tracked as an
//! angle within one half turn, `[0, π]`: each time the angle runs off either
//! end it is folded back and the two face colors rotate by one palette
//! step. That way `slot_a` is always the face turning into view, `slot_b`
//! the face turning away, and `cos(angle)` alone drives both how
//! foreshortened the folding face is and which face is in front.
//!
//! Velocity decays every frame. Once the spin gets slow enough the spinner
//! *settles*: it stops damping and drives itself at a fixed speed to the
//! next half-turn boundary, where it parks on a clean face instead of
//! stalling mid-flip.

use std::f32::consts::PI;

use crate::math::sign;
use crate::palette::{Fill, Palette, Rgb, DEFAULT_START_COLOR};
use crate::shape::GlyphShape;
use flip_paint::Point;
use tracing::{debug, warn};

/// Per-frame velocity multiplier while spinning freely
pub const DAMPING: f32 = 0.98;
/// Free spin slower than this turns into a settle
pub const SETTLE_TRIGGER: f32 = 0.01;
/// Reverse kick applied when a free spin settles
pub const SETTLE_KICK: f32 = 0.2;
/// Crossing a boundary slower than this settles onto the next face
pub const BOUNDARY_SETTLE_TRIGGER: f32 = 0.06;
/// Speed used to finish the last half turn after a boundary settle
pub const BOUNDARY_SETTLE_SPEED: f32 = 0.1;
/// Largest angle advanced in one frame; one fold per boundary is then enough
pub const MAX_STEP: f32 = PI;
/// Palette cursor position of a freshly built spinner
const INITIAL_PALETTE_INDEX: usize = 2;

/// Observable spin phase
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpinPhase {
    Spinning,
    Settling,
    Parked,
}

impl SpinPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpinPhase::Spinning => "spinning",
            SpinPhase::Settling => "settling",
            SpinPhase::Parked => "parked",
        }
    }
}

/// Construction parameters for a [`Spinner`]
#[derive(Clone, Debug)]
pub struct SpinnerConfig {
    pub radius: f32,
    pub center: Point,
    /// Angular velocity in radians per frame
    pub initial_velocity: f32,
    /// Draw at twice the logical resolution
    pub high_density: bool,
    pub palette: Palette,
    pub start_color: Rgb,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            radius: 0.0,
            center: Point::ZERO,
            initial_velocity: 0.0,
            high_density: false,
            palette: Palette::BRAND,
            start_color: DEFAULT_START_COLOR,
        }
    }
}

/// One flipping glyph
pub struct Spinner {
    shape: Box<dyn GlyphShape>,
    radius: f32,
    center: Point,
    high_density: bool,

    angle: f32,
    velocity: f32,
    settling: bool,
    last_valid_angle: f32,

    /// Face turning into view
    slot_a: Fill,
    /// Face turning away
    slot_b: Fill,
    palette_index: usize,
    colors: Vec<Fill>,
    start_color: Fill,
    parked_color: Fill,
}

impl Spinner {
    pub fn new(shape: impl GlyphShape + 'static, config: SpinnerConfig) -> Self {
        let colors = config.palette.blend(shape.blend_edge());
        let start_color = Fill::Solid(config.start_color);

        Self {
            shape: Box::new(shape),
            radius: config.radius.round(),
            center: config.center,
            high_density: config.high_density,
            angle: 0.0,
            velocity: config.initial_velocity,
            settling: false,
            last_valid_angle: 0.0,
            slot_a: start_color,
            slot_b: colors[1],
            palette_index: INITIAL_PALETTE_INDEX,
            parked_color: colors[0],
            start_color,
            colors,
        }
    }

    // === Accessors ===

    pub fn shape(&self) -> &dyn GlyphShape {
        self.shape.as_ref()
    }

    pub fn name(&self) -> &'static str {
        self.shape.name()
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn is_high_density(&self) -> bool {
        self.high_density
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_settling(&self) -> bool {
        self.settling
    }

    pub fn slot_a(&self) -> Fill {
        self.slot_a
    }

    pub fn slot_b(&self) -> Fill {
        self.slot_b
    }

    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    /// Blended palette this spinner cycles through
    pub fn colors(&self) -> &[Fill] {
        &self.colors
    }

    pub fn start_color(&self) -> Fill {
        self.start_color
    }

    pub fn parked_color(&self) -> Fill {
        self.parked_color
    }

    pub fn phase(&self) -> SpinPhase {
        if self.settling {
            SpinPhase::Settling
        } else if self.velocity == 0.0 {
            SpinPhase::Parked
        } else {
            SpinPhase::Spinning
        }
    }

    /// Horizontal foreshortening of the folding face, `cos(angle)`
    pub fn scale(&self) -> f32 {
        self.angle.cos()
    }

    /// Screen x that input distance is measured from
    pub fn anchor_x(&self) -> f32 {
        self.center.x + self.shape.anchor_offset(self.radius)
    }

    // === Mutation ===

    pub fn set_radius(&mut self, radius: f32) {
        self.radius = radius;
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    /// Add to the angular velocity. Impulses accumulate.
    pub fn apply_impulse(&mut self, delta: f32) {
        self.velocity += delta;
    }

    /// Place the spinner mid-turn; used to stage a particular frame
    pub fn set_motion(&mut self, angle: f32, velocity: f32) {
        self.angle = angle.clamp(0.0, PI);
        self.last_valid_angle = self.angle;
        self.velocity = velocity;
        self.settling = false;
    }

    /// Advance one frame and return the new `scale`
    pub fn update(&mut self) -> f32 {
        if !self.settling {
            self.velocity *= DAMPING;
        }

        if !self.settling && self.velocity.abs() < SETTLE_TRIGGER && self.velocity != 0.0 {
            self.settling = true;
            self.velocity = -SETTLE_KICK * sign(self.velocity);
            debug!(
                spinner = self.name(),
                velocity = self.velocity,
                "spin decayed, settling"
            );
        }

        if !self.velocity.is_finite() {
            return self.recover();
        }
        self.angle += self.velocity.clamp(-MAX_STEP, MAX_STEP);
        if !self.angle.is_finite() {
            return self.recover();
        }

        self.resolve_boundaries();
        self.last_valid_angle = self.angle;
        self.scale()
    }

    /// Drop a non-finite state: back to the last valid angle, parked
    fn recover(&mut self) -> f32 {
        warn!(
            spinner = self.name(),
            angle = self.angle,
            velocity = self.velocity,
            "non-finite spin state, parking at last valid angle"
        );
        self.angle = self.last_valid_angle;
        self.velocity = 0.0;
        self.settling = false;
        self.scale()
    }

    fn wrap_forward(&self, index: usize) -> usize {
        (index + 1) % self.colors.len()
    }

    fn wrap_back(&self, index: usize) -> usize {
        (index + self.colors.len() - 1) % self.colors.len()
    }

    fn park(&mut self, angle: f32) {
        self.angle = angle;
        self.velocity = 0.0;
        self.settling = false;
        debug!(spinner = self.name(), angle, "parked");
    }

    fn settle_on_crossing(&mut self) {
        if self.velocity.abs() < BOUNDARY_SETTLE_TRIGGER {
            self.settling = true;
            self.velocity = BOUNDARY_SETTLE_SPEED * sign(self.velocity);
        }
    }

    /// Park on a boundary or fold the angle back into `[0, π]`
    fn resolve_boundaries(&mut self) {
        if self.settling {
            if self.angle >= PI && self.slot_b == self.parked_color {
                self.park(PI);
                if self.slot_a == self.start_color {
                    self.slot_a = self.colors[1];
                }
            }

            if self.angle <= 0.0 && self.slot_a == self.parked_color {
                self.park(0.0);
                if self.slot_b == self.start_color {
                    self.slot_b = self.colors[1];
                }
            }
        }

        if self.angle > PI {
            self.angle -= PI;
            self.slot_a = self.slot_b;
            self.palette_index = self.wrap_forward(self.palette_index);
            self.settle_on_crossing();

            if self.colors[self.palette_index] == self.slot_a {
                self.palette_index = self.wrap_forward(self.palette_index);
            }

            self.slot_b = if self.settling {
                self.parked_color
            } else {
                self.colors[self.palette_index]
            };
        }

        if self.angle < 0.0 {
            self.angle += PI;
            self.slot_b = self.slot_a;
            self.palette_index = self.wrap_back(self.palette_index);
            self.settle_on_crossing();

            if self.colors[self.palette_index] == self.slot_b {
                self.palette_index = self.wrap_back(self.palette_index);
            }

            self.slot_a = if self.settling {
                self.parked_color
            } else {
                self.colors[self.palette_index]
            };
        }
    }
}

impl std::fmt::Debug for Spinner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Spinner")
            .field("shape", &self.shape.name())
            .field("radius", &self.radius)
            .field("center", &self.center)
            .field("angle", &self.angle)
            .field("velocity", &self.velocity)
            .field("phase", &self.phase())
            .field("palette_index", &self.palette_index)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Bar, Disc};

    fn disc(velocity: f32) -> Spinner {
        Spinner::new(
            Disc,
            SpinnerConfig {
                radius: 59.0,
                initial_velocity: velocity,
                ..Default::default()
            },
        )
    }

    fn run_until_parked(spinner: &mut Spinner, max_frames: usize) -> Option<usize> {
        (1..=max_frames).find(|_| {
            spinner.update();
            spinner.phase() == SpinPhase::Parked
        })
    }

    #[test]
    fn test_initial_state() {
        let spinner = disc(-0.06);
        let colors = Palette::BRAND.blend(crate::palette::BlendEdge::Trailing);

        assert_eq!(spinner.angle(), 0.0);
        assert_eq!(spinner.slot_a(), Fill::Solid(DEFAULT_START_COLOR));
        assert_eq!(spinner.slot_b(), colors[1]);
        assert_eq!(spinner.parked_color(), colors[0]);
        assert_eq!(spinner.palette_index(), 2);
        assert_eq!(spinner.phase(), SpinPhase::Spinning);
    }

    #[test]
    fn test_angle_stays_within_half_turn() {
        let mut spinner = disc(0.9);
        for frame in 0..2_000 {
            if frame % 150 == 0 {
                spinner.apply_impulse(if frame % 300 == 0 { 2.5 } else { -7.0 });
            }
            spinner.update();
            let angle = spinner.angle();
            assert!((0.0..=PI).contains(&angle), "frame {frame}: angle {angle}");
        }
    }

    #[test]
    fn test_damping_is_monotonic_outside_settle() {
        let mut spinner = disc(0.8);
        let mut previous = spinner.velocity().abs();
        while !spinner.is_settling() && spinner.phase() != SpinPhase::Parked {
            spinner.update();
            if spinner.is_settling() {
                break;
            }
            let current = spinner.velocity().abs();
            assert!(current <= previous, "{current} > {previous}");
            previous = current;
        }
    }

    #[test]
    fn test_slow_spins_park_within_bounded_frames() {
        for velocity in [0.01, 0.011, 0.03, 0.05, 0.0599, -0.01, -0.04, -0.0599] {
            let mut spinner = disc(velocity);
            let frames = run_until_parked(&mut spinner, 600);
            assert!(frames.is_some(), "velocity {velocity} never parked");
            assert_eq!(spinner.velocity(), 0.0);
            assert!(!spinner.is_settling());
            let angle = spinner.angle();
            assert!(angle == 0.0 || angle == PI, "parked mid-flip at {angle}");
        }
    }

    #[test]
    fn test_slow_bar_spins_park_too() {
        for velocity in [0.02, -0.05] {
            let mut spinner = Spinner::new(
                Bar,
                SpinnerConfig {
                    radius: 56.0,
                    initial_velocity: velocity,
                    ..Default::default()
                },
            );
            assert!(run_until_parked(&mut spinner, 600).is_some());
        }
    }

    #[test]
    fn test_intro_spin_parks_on_palette_color() {
        // The logo's idle start: a slow backwards spin reveals the first color
        let mut spinner = disc(-0.06);
        assert!(run_until_parked(&mut spinner, 600).is_some());

        assert_eq!(spinner.angle(), 0.0);
        assert_eq!(spinner.slot_a(), spinner.parked_color());
        // The start color was replaced once the spinner parked
        assert_eq!(spinner.slot_b(), spinner.colors()[1]);
    }

    #[test]
    fn test_forward_crossing_rotates_slots() {
        let mut spinner = disc(0.5);
        let prior_b = spinner.slot_b();
        let prior_index = spinner.palette_index();

        while spinner.slot_a() == spinner.start_color() {
            spinner.update();
        }

        assert_eq!(spinner.slot_a(), prior_b);
        let advanced = (spinner.palette_index() + Palette::LEN - prior_index) % Palette::LEN;
        assert!(advanced == 1 || advanced == 2, "advanced by {advanced}");
        assert_eq!(spinner.slot_b(), spinner.colors()[spinner.palette_index()]);
    }

    #[test]
    fn test_crossing_never_repeats_a_face() {
        let mut spinner = disc(0.6);
        for _ in 0..500 {
            let before = spinner.slot_a();
            spinner.update();
            if spinner.slot_a() != before && !spinner.is_settling() {
                assert_ne!(spinner.slot_a(), spinner.slot_b());
            }
        }
    }

    #[test]
    fn test_repeat_avoidance_skips_duplicate_entry() {
        // Alternating palette: blends 1 and 3 are the same pair
        let palette = Palette::from_rgb8(&[[200, 0, 0], [0, 0, 200], [200, 0, 0], [0, 0, 200]])
            .unwrap();
        let mut spinner = Spinner::new(
            Disc,
            SpinnerConfig {
                radius: 10.0,
                palette,
                ..Default::default()
            },
        );
        let colors = spinner.colors().to_vec();
        assert_eq!(colors[1], colors[3]);

        spinner.set_motion(PI - 0.01, 0.5);
        spinner.update();

        // Cursor 2 -> 3 would show colors[1] again, so it moves on to 0
        assert_eq!(spinner.slot_a(), colors[1]);
        assert_eq!(spinner.palette_index(), 0);
        assert_eq!(spinner.slot_b(), colors[0]);
        assert_ne!(spinner.slot_a(), spinner.slot_b());
    }

    #[test]
    fn test_impulses_accumulate() {
        let mut spinner = disc(0.05);
        spinner.apply_impulse(0.5);
        spinner.apply_impulse(-0.25);
        assert!((spinner.velocity() - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_velocity_parks() {
        let mut spinner = disc(0.3);
        spinner.update();
        let good_angle = spinner.angle();

        spinner.apply_impulse(f32::NAN);
        spinner.update();

        assert_eq!(spinner.phase(), SpinPhase::Parked);
        assert_eq!(spinner.angle(), good_angle);
        assert!(spinner.scale().is_finite());
    }

    #[test]
    fn test_infinite_velocity_parks() {
        for impulse in [f32::INFINITY, f32::NEG_INFINITY] {
            let mut spinner = disc(0.3);
            spinner.update();
            let good_angle = spinner.angle();

            spinner.apply_impulse(impulse);
            spinner.update();

            assert_eq!(spinner.phase(), SpinPhase::Parked, "impulse {impulse}");
            assert_eq!(spinner.velocity(), 0.0);
            assert_eq!(spinner.angle(), good_angle);
        }
    }

    #[test]
    fn test_huge_impulse_still_folds_once() {
        let mut spinner = disc(0.0);
        spinner.apply_impulse(1_000.0);
        spinner.update();
        assert!((0.0..=PI).contains(&spinner.angle()));
        // Only the step is limited; the spin itself keeps its speed
        assert!((spinner.velocity() - 980.0).abs() < 1e-3);
        assert_eq!(spinner.angle(), MAX_STEP);
    }

    #[test]
    fn test_radius_rounded_at_construction() {
        let spinner = Spinner::new(
            Bar,
            SpinnerConfig {
                radius: 55.6,
                ..Default::default()
            },
        );
        assert_eq!(spinner.radius(), 56.0);
        assert!((spinner.anchor_x() - 0.46 * 56.0).abs() < 1e-4);
    }
}
