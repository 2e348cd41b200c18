//! Input events
//!
//! Normalized input delivered by the host between frames. Coordinates are
//! in container-local logical pixels.

use smallvec::SmallVec;

/// Which side of the logo an edge activation targets
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Edge {
    /// The "I" side
    Left,
    /// The "O" side
    Right,
}

/// A single input event
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    /// Keyboard/accessibility activation of one side of the logo
    EdgeActivate(Edge),
}

/// Input received since the last frame
///
/// Events are applied in arrival order at the start of the next frame.
/// Nothing is coalesced: two clicks in one frame produce two impulses.
#[derive(Clone, Debug, Default)]
pub struct InputQueue {
    pending: SmallVec<[InputEvent; 4]>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    /// Remove and yield all pending events, oldest first
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.pending.drain(..)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
