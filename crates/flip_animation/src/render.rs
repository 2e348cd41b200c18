//! Spinner rendering
//!
//! A frame is four fills of the glyph outline, painted back to front:
//!
//! 1. the trailing face, fully open on the left (`scale = -1`)
//! 2. the leading face, fully open on the right (`scale = 1`)
//! 3. a faint shadow, slightly wider than the folding face
//! 4. the folding face itself, shaded darker the more edge-on it is

use crate::math::sign;
use crate::palette::{Fill, Rgb};
use crate::spinner::Spinner;
use flip_paint::{Canvas, FillStyle, Gradient, GradientStop, Point, Rect};
use tracing::trace;

/// Opacity of the shadow pass
pub const SHADOW_ALPHA: f32 = 0.1;
/// How much wider than the fold the shadow is cast
pub const SHADOW_STRETCH: f32 = 1.4;
/// Channel darkening of a fully edge-on fold
pub const FOLD_SHADE: f32 = 30.0;

/// One fill of the glyph outline
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FacePass {
    pub scale: f32,
    pub fill: Fill,
    pub alpha: f32,
}

/// Horizontal scale of the shadow cast by a fold at `scale`
pub fn shadow_scale(scale: f32) -> f32 {
    (scale.abs() * SHADOW_STRETCH).min(1.0) * sign(scale)
}

/// Color of the folding face: whichever slot faces the viewer, darkened
/// as the face turns edge-on
pub fn fold_fill(slot_a: Fill, slot_b: Fill, scale: f32) -> Fill {
    let front = if scale > 0.0 { slot_a } else { slot_b };
    front.darken(FOLD_SHADE * (1.0 - scale.abs()))
}

/// The four passes of a frame, in paint order
pub fn face_passes(slot_a: Fill, slot_b: Fill, scale: f32) -> [FacePass; 4] {
    [
        FacePass {
            scale: -1.0,
            fill: slot_a,
            alpha: 1.0,
        },
        FacePass {
            scale: 1.0,
            fill: slot_b,
            alpha: 1.0,
        },
        FacePass {
            scale: shadow_scale(scale),
            fill: Fill::Solid(Rgb::BLACK),
            alpha: SHADOW_ALPHA,
        },
        FacePass {
            scale,
            fill: fold_fill(slot_a, slot_b, scale),
            alpha: 1.0,
        },
    ]
}

/// Paints spinners onto a [`Canvas`]
///
/// Rendering reads the spinner and never changes it, so drawing the same
/// state twice yields the same commands.
#[derive(Clone, Copy, Debug, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render<C: Canvas + ?Sized>(&self, spinner: &Spinner, canvas: &mut C) {
        let size = canvas.size();
        if size.is_degenerate() {
            trace!(spinner = spinner.name(), ?size, "degenerate surface, skipping frame");
            return;
        }

        canvas.clear_rect(Rect::new(0.0, 0.0, size.width + 1.0, size.height + 1.0));
        canvas.save();

        if spinner.is_high_density() {
            canvas.scale(2.0, 2.0);
        }

        let center = spinner.center();
        canvas.translate(center.x.round(), center.y.round());

        let shape = spinner.shape();
        let radius = spinner.radius();
        let stops = shape.gradient_stops();

        for pass in face_passes(spinner.slot_a(), spinner.slot_b(), spinner.scale()) {
            let path = shape.outline(pass.scale, spinner.angle(), radius);
            let style = fill_style(pass, radius, stops);
            canvas.fill_path(path, style);
        }

        canvas.restore();
    }
}

/// Flat color for single colors; a horizontal gradient across the face for
/// blended pairs, mirrored when the face is flipped
fn fill_style(pass: FacePass, radius: f32, stops: [f32; 2]) -> FillStyle {
    match pass.fill.half_step(pass.scale) {
        Fill::Solid(color) => FillStyle::Color(color.to_color(pass.alpha)),
        Fill::Blend(from, to) => {
            let (near, far) = if pass.scale > 0.0 {
                (to, from)
            } else {
                (from, to)
            };
            Gradient::linear(
                Point::ZERO,
                Point::new(radius * pass.scale, 0.0),
                [
                    GradientStop::new(stops[0], near.to_color(pass.alpha)),
                    GradientStop::new(stops[1], far.to_color(pass.alpha)),
                ],
            )
            .into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::{Palette, DEFAULT_START_COLOR};
    use crate::shape::{Bar, Disc};
    use crate::spinner::SpinnerConfig;
    use flip_paint::{Color, PaintCommand, PaintContext, Transform2D};
    use std::f32::consts::FRAC_PI_2;

    fn disc_at(angle: f32, high_density: bool) -> Spinner {
        let mut spinner = Spinner::new(
            Disc,
            SpinnerConfig {
                radius: 59.0,
                center: Point::new(182.4, 97.6),
                high_density,
                ..Default::default()
            },
        );
        spinner.set_motion(angle, 0.0);
        spinner
    }

    fn fills(ctx: &PaintContext) -> Vec<&FillStyle> {
        ctx.commands()
            .iter()
            .filter_map(|cmd| match cmd {
                PaintCommand::FillPath { style, .. } => Some(style),
                _ => None,
            })
            .collect()
    }

    fn style_colors(style: &FillStyle) -> Vec<Color> {
        match style {
            FillStyle::Color(color) => vec![*color],
            FillStyle::Gradient(gradient) => gradient.stops().iter().map(|s| s.color).collect(),
        }
    }

    #[test]
    fn test_edge_on_fold_passes() {
        let green = Fill::Solid(Rgb::new(13.0, 169.0, 95.0));
        let red = Fill::Solid(Rgb::new(223.0, 73.0, 62.0));

        let passes = face_passes(red, green, 0.0);
        assert_eq!(passes[2].scale, 0.0);
        assert_eq!(passes[2].alpha, SHADOW_ALPHA);
        // scale 0 is not "forward", so the leading slot is in front
        assert_eq!(passes[3].fill, Fill::Solid(Rgb::new(0.0, 139.0, 65.0)));
    }

    #[test]
    fn test_shadow_scale_saturates() {
        assert_eq!(shadow_scale(0.0), 0.0);
        assert!((shadow_scale(0.5) - 0.7).abs() < 1e-6);
        assert_eq!(shadow_scale(0.9), 1.0);
        assert_eq!(shadow_scale(-0.9), -1.0);
    }

    #[test]
    fn test_fold_shade_tracks_scale() {
        let white = Fill::Solid(Rgb::new(100.0, 100.0, 100.0));
        let black = Fill::Solid(Rgb::BLACK);
        assert_eq!(fold_fill(white, black, 1.0), white);
        assert_eq!(
            fold_fill(white, black, 0.5),
            Fill::Solid(Rgb::new(85.0, 85.0, 85.0))
        );
        assert_eq!(fold_fill(white, black, -0.5), black);
    }

    #[test]
    fn test_render_sequence() {
        let spinner = disc_at(0.3, false);
        let mut ctx = PaintContext::new(262.0, 180.0);
        Renderer::new().render(&spinner, &mut ctx);

        let commands = ctx.commands();
        assert_eq!(commands.len(), 8);
        assert_eq!(
            commands[0],
            PaintCommand::ClearRect {
                rect: Rect::new(0.0, 0.0, 263.0, 181.0)
            }
        );
        assert_eq!(commands[1], PaintCommand::Save);
        assert_eq!(
            commands[2],
            PaintCommand::Transform {
                transform: Transform2D::translate(182.0, 98.0)
            }
        );
        assert_eq!(commands[7], PaintCommand::Restore);
        assert_eq!(ctx.save_depth(), 0);

        let styles = fills(&ctx);
        assert_eq!(styles.len(), 4);
        // Trailing face still shows the start color
        assert_eq!(
            *styles[0],
            FillStyle::Color(DEFAULT_START_COLOR.to_color(1.0))
        );
        assert_eq!(
            *styles[2],
            FillStyle::Color(Color::from_channels(0.0, 0.0, 0.0, SHADOW_ALPHA))
        );
    }

    #[test]
    fn test_high_density_scales_before_translating() {
        let spinner = disc_at(0.3, true);
        let mut ctx = PaintContext::new(524.0, 360.0);
        Renderer::new().render(&spinner, &mut ctx);

        assert_eq!(
            ctx.commands()[2],
            PaintCommand::Transform {
                transform: Transform2D::scale(2.0, 2.0)
            }
        );
        match &ctx.commands()[4] {
            PaintCommand::FillPath { transform, .. } => {
                let origin = transform.transform_point(Point::ZERO);
                assert_eq!(origin, Point::new(364.0, 196.0));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_blended_face_uses_mirrored_gradient() {
        let spinner = disc_at(0.3, false);
        let colors = Palette::BRAND.blend(crate::palette::BlendEdge::Trailing);
        let Fill::Blend(from, to) = colors[1] else {
            panic!("palette entries are blends");
        };
        let half = from.half_step_towards(to);

        let mut ctx = PaintContext::new(262.0, 180.0);
        Renderer::new().render(&spinner, &mut ctx);
        let styles = fills(&ctx);

        // Leading face at scale 1: half step first, base color second
        match styles[1] {
            FillStyle::Gradient(Gradient::Linear { start, end, stops }) => {
                assert_eq!(*start, Point::ZERO);
                assert_eq!(*end, Point::new(59.0, 0.0));
                assert_eq!(stops[0].offset, 0.1);
                assert_eq!(stops[0].color, half.to_color(1.0));
                assert_eq!(stops[1].offset, 0.9);
                assert_eq!(stops[1].color, from.to_color(1.0));
            }
            other => panic!("expected a gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_bar_uses_its_own_stops() {
        let mut spinner = Spinner::new(
            Bar,
            SpinnerConfig {
                radius: 56.0,
                ..Default::default()
            },
        );
        spinner.set_motion(2.5, 0.0);

        let mut ctx = PaintContext::new(262.0, 180.0);
        Renderer::new().render(&spinner, &mut ctx);

        let offsets: Vec<f32> = match fills(&ctx)[1] {
            FillStyle::Gradient(gradient) => gradient.stops().iter().map(|s| s.offset).collect(),
            other => panic!("expected a gradient, got {other:?}"),
        };
        assert_eq!(offsets, vec![0.0, 0.5]);
    }

    #[test]
    fn test_edge_on_render_has_no_negative_channels() {
        let palette = Palette::from_rgb8(&[[0, 5, 29], [1, 0, 0], [13, 169, 95], [0, 0, 0]])
            .unwrap();
        let mut spinner = Spinner::new(
            Disc,
            SpinnerConfig {
                radius: 40.0,
                palette,
                ..Default::default()
            },
        );
        spinner.set_motion(FRAC_PI_2, 0.0);

        let mut ctx = PaintContext::new(100.0, 100.0);
        Renderer::new().render(&spinner, &mut ctx);

        for style in fills(&ctx) {
            for color in style_colors(style) {
                for channel in [color.r, color.g, color.b, color.a] {
                    assert!((0.0..=1.0).contains(&channel), "{color:?}");
                }
            }
        }
    }

    #[test]
    fn test_degenerate_surface_is_skipped() {
        let spinner = disc_at(0.3, false);
        let mut ctx = PaintContext::new(0.0, 180.0);
        Renderer::new().render(&spinner, &mut ctx);
        assert!(ctx.commands().is_empty());
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut spinner = disc_at(1.1, false);
        spinner.apply_impulse(0.2);
        spinner.update();

        let renderer = Renderer::new();
        let mut first = PaintContext::new(262.0, 180.0);
        let mut second = PaintContext::new(262.0, 180.0);
        renderer.render(&spinner, &mut first);
        renderer.render(&spinner, &mut second);

        assert_eq!(first.commands(), second.commands());
    }
}
