//! Flip mode controller
//!
//! Hosts the two logo glyphs: the bar ("I") and the disc ("O"). The mode
//! owns their spinners and one drawing surface per glyph. It lays them out
//! for the container size, turns queued input into impulses and steps and
//! paints both once per frame while active.

use anyhow::Result;
use flip_animation::{
    Bar, Disc, Fill, GlyphShape, ImpulseMapper, Renderer, SpinPhase, Spinner, SpinnerConfig,
    SpinnerId, SpinnerScheduler,
};
use flip_core::fsm::lifecycle;
use flip_core::{Edge, InputEvent, InputQueue, StateMachine};
use flip_paint::{Canvas, PaintCommand, PaintContext, Point, Size};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::FlipConfig;

/// A glyph's spinner plus the surface it is painted on
struct Glyph {
    id: SpinnerId,
    base_radius: f32,
    base_position: Point,
    surface: PaintContext,
}

impl Glyph {
    fn new(
        scheduler: &mut SpinnerScheduler,
        shape: impl GlyphShape + 'static,
        base_radius: f32,
        [x, y]: [f32; 2],
        config: SpinnerConfig,
    ) -> Self {
        let base_position = Point::new(x, y);
        let id = scheduler.add_spinner(Spinner::new(
            shape,
            SpinnerConfig {
                radius: base_radius,
                center: base_position,
                ..config
            },
        ));
        Self {
            id,
            base_radius,
            base_position,
            surface: PaintContext::default(),
        }
    }

    fn is_drawable(&self) -> bool {
        !self.surface.size().is_degenerate()
    }
}

/// Serializable view of one glyph after a frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SpinnerSnapshot {
    pub name: &'static str,
    pub angle: f32,
    pub velocity: f32,
    pub scale: f32,
    pub phase: &'static str,
    pub palette_index: usize,
    /// Face colors as rounded channel triples; one for a solid, two for a blend
    pub slot_a: Vec<[u8; 3]>,
    pub slot_b: Vec<[u8; 3]>,
    /// Paint commands recorded for this frame
    pub commands: usize,
}

impl SpinnerSnapshot {
    fn capture(spinner: &Spinner, surface: &PaintContext) -> Self {
        Self {
            name: spinner.name(),
            angle: spinner.angle(),
            velocity: spinner.velocity(),
            scale: spinner.scale(),
            phase: spinner.phase().as_str(),
            palette_index: spinner.palette_index(),
            slot_a: fill_channels(spinner.slot_a()),
            slot_b: fill_channels(spinner.slot_b()),
            commands: surface.commands().len(),
        }
    }
}

fn fill_channels(fill: Fill) -> Vec<[u8; 3]> {
    let rgb8 = |c: flip_animation::Rgb| {
        let [r, g, b, _] = c.to_color(1.0).to_rgba8();
        [r, g, b]
    };
    match fill {
        Fill::Solid(color) => vec![rgb8(color)],
        Fill::Blend(from, to) => vec![rgb8(from), rgb8(to)],
    }
}

/// Result of one active frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub elapsed_ms: u64,
    /// Impulses applied from input drained this frame
    pub impulses: usize,
    pub spinners: Vec<SpinnerSnapshot>,
}

impl FrameReport {
    /// True once no glyph is moving
    pub fn is_settled(&self) -> bool {
        self.spinners
            .iter()
            .all(|s| s.phase == SpinPhase::Parked.as_str())
    }
}

/// The flip logo mode
pub struct FlipMode {
    config: FlipConfig,
    lifecycle: StateMachine,
    scheduler: SpinnerScheduler,
    /// Bar first, then disc
    glyphs: [Glyph; 2],
    input: InputQueue,
    renderer: Renderer,
    mapper: ImpulseMapper,
    bounds: Size,
    elapsed_ms: u64,
}

impl FlipMode {
    /// Build the mode from configuration. The mode starts inactive and has
    /// no size until [`FlipMode::resize`] is called.
    pub fn new(config: FlipConfig) -> Result<Self> {
        let spinner_config = SpinnerConfig {
            initial_velocity: config.initial_velocity,
            high_density: config.high_density,
            palette: config.palette()?,
            start_color: config.start_color(),
            ..Default::default()
        };

        let layout = &config.layout;
        let mut scheduler = SpinnerScheduler::new();
        let bar = Glyph::new(
            &mut scheduler,
            Bar,
            layout.bar_radius,
            layout.bar_position,
            spinner_config.clone(),
        );
        let disc = Glyph::new(
            &mut scheduler,
            Disc,
            layout.disc_radius,
            layout.disc_position,
            spinner_config,
        );

        let mapper = ImpulseMapper::new(0.0).with_strength(config.input.strength);

        Ok(Self {
            config,
            lifecycle: lifecycle::machine(),
            scheduler,
            glyphs: [bar, disc],
            input: InputQueue::new(),
            renderer: Renderer::new(),
            mapper,
            bounds: Size::ZERO,
            elapsed_ms: 0,
        })
    }

    // === Lifecycle ===

    pub fn activate(&mut self) {
        if self.lifecycle.can_send(lifecycle::ACTIVATE) {
            self.lifecycle.send(lifecycle::ACTIVATE);
            info!("flip mode activated");
        }
    }

    /// Stop taking frames. Spinners keep their state and resume on the next
    /// activation; input queued in the meantime is dropped.
    pub fn deactivate(&mut self) {
        if self.lifecycle.can_send(lifecycle::DEACTIVATE) {
            self.lifecycle.send(lifecycle::DEACTIVATE);
            self.input.clear();
            info!("flip mode deactivated");
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle.is_in(lifecycle::ACTIVE)
    }

    // === Layout ===

    /// Lay the glyphs out for a container of the given size
    pub fn resize(&mut self, width: f32, height: f32) {
        let s = width * self.config.layout.scale_factor;
        self.bounds = Size::new(width, height);
        self.mapper.influence_range = width;

        let density = if self.config.high_density { 2.0 } else { 1.0 };
        for glyph in &mut self.glyphs {
            if let Some(spinner) = self.scheduler.get_mut(glyph.id) {
                spinner.set_radius(s * glyph.base_radius);
                spinner.set_center(Point::new(
                    s * glyph.base_position.x,
                    s * glyph.base_position.y,
                ));
            }
            glyph.surface.resize(width * density, height * density);
        }

        info!(width, height, scale = s, "flip mode resized");
    }

    pub fn bounds(&self) -> Size {
        self.bounds
    }

    // === Input ===

    /// Queue a click at container-local coordinates
    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if self.is_active() {
            self.input.push(InputEvent::PointerDown { x, y });
        }
    }

    /// Queue a keyboard activation of one side of the logo
    pub fn activate_edge(&mut self, edge: Edge) {
        if self.is_active() {
            self.input.push(InputEvent::EdgeActivate(edge));
        }
    }

    /// Container-local x an edge activation clicks at
    pub fn edge_x(&self, edge: Edge) -> f32 {
        let reach = self.config.layout.bar_radius;
        match edge {
            Edge::Left => reach,
            Edge::Right => self.bounds.width + reach,
        }
    }

    // === Frames ===

    /// Run one frame: apply queued input, step each drawable glyph and
    /// repaint it. Returns `None` while inactive.
    pub fn frame(&mut self, delta_ms: u64) -> Option<FrameReport> {
        if !self.is_active() {
            return None;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        let mut impulses = 0;
        let events: Vec<InputEvent> = self.input.drain().collect();
        for event in events {
            let x = match event {
                InputEvent::PointerDown { x, .. } => x,
                InputEvent::EdgeActivate(edge) => self.edge_x(edge),
            };
            impulses += self.mapper.apply(x, self.scheduler.spinners_mut());
        }

        let drawable: Vec<SpinnerId> = self
            .glyphs
            .iter()
            .filter(|g| g.is_drawable())
            .map(|g| g.id)
            .collect();
        self.scheduler.tick_where(|id, _| drawable.contains(&id));

        let mut spinners = Vec::with_capacity(self.glyphs.len());
        for glyph in &mut self.glyphs {
            let Some(spinner) = self.scheduler.get(glyph.id) else {
                continue;
            };
            if glyph.is_drawable() {
                glyph.surface.clear_commands();
                self.renderer.render(spinner, &mut glyph.surface);
            }
            spinners.push(SpinnerSnapshot::capture(spinner, &glyph.surface));
        }

        let report = FrameReport {
            frame: self.scheduler.frame(),
            elapsed_ms: self.elapsed_ms,
            impulses,
            spinners,
        };
        debug!(frame = report.frame, impulses, "flip frame");
        Some(report)
    }

    // === Accessors ===

    pub fn bar(&self) -> Option<&Spinner> {
        self.scheduler.get(self.glyphs[0].id)
    }

    pub fn disc(&self) -> Option<&Spinner> {
        self.scheduler.get(self.glyphs[1].id)
    }

    /// Commands painted for the bar on the last frame
    pub fn bar_commands(&self) -> &[PaintCommand] {
        self.glyphs[0].surface.commands()
    }

    /// Commands painted for the disc on the last frame
    pub fn disc_commands(&self) -> &[PaintCommand] {
        self.glyphs[1].surface.commands()
    }

    pub fn has_active_spinners(&self) -> bool {
        self.scheduler.has_active_spinners()
    }

    pub fn config(&self) -> &FlipConfig {
        &self.config
    }
}
