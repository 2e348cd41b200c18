//! Spinner scheduler
//!
//! Owns all live spinners and steps each of them exactly once per frame.

use crate::spinner::{SpinPhase, Spinner};
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    pub struct SpinnerId;
}

/// The scheduler that ticks all live spinners
pub struct SpinnerScheduler {
    spinners: SlotMap<SpinnerId, Spinner>,
    frame: u64,
}

impl SpinnerScheduler {
    pub fn new() -> Self {
        Self {
            spinners: SlotMap::with_key(),
            frame: 0,
        }
    }

    pub fn add_spinner(&mut self, spinner: Spinner) -> SpinnerId {
        self.spinners.insert(spinner)
    }

    pub fn get(&self, id: SpinnerId) -> Option<&Spinner> {
        self.spinners.get(id)
    }

    pub fn get_mut(&mut self, id: SpinnerId) -> Option<&mut Spinner> {
        self.spinners.get_mut(id)
    }

    pub fn remove(&mut self, id: SpinnerId) -> Option<Spinner> {
        self.spinners.remove(id)
    }

    /// Advance every spinner by one frame
    pub fn tick(&mut self) {
        self.frame += 1;
        for (_, spinner) in self.spinners.iter_mut() {
            spinner.update();
        }
    }

    /// Advance only the spinners `filter` accepts. Spinners that are skipped
    /// (for example because their surface has no area) keep their state.
    pub fn tick_where(&mut self, mut filter: impl FnMut(SpinnerId, &Spinner) -> bool) {
        self.frame += 1;
        for (id, spinner) in self.spinners.iter_mut() {
            if filter(id, spinner) {
                spinner.update();
            }
        }
    }

    /// Number of frames ticked so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Check if any spinner is still moving
    pub fn has_active_spinners(&self) -> bool {
        self.spinners
            .iter()
            .any(|(_, s)| s.phase() != SpinPhase::Parked)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SpinnerId, &Spinner)> {
        self.spinners.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (SpinnerId, &mut Spinner)> {
        self.spinners.iter_mut()
    }

    /// Mutable access to every spinner, e.g. for input that affects all of them
    pub fn spinners_mut(&mut self) -> impl Iterator<Item = &mut Spinner> {
        self.spinners.values_mut()
    }

    pub fn len(&self) -> usize {
        self.spinners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spinners.is_empty()
    }
}

impl Default for SpinnerScheduler {
    fn default() -> Self {
        Self::new()
    }
}
