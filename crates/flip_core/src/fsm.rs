//! State Machine Runtime
//!
//! Flat state machines driven by numeric events. Used for the mode
//! lifecycle (inactive/active); the spinner's own spin phases are derived
//! from its physics state instead.

use smallvec::SmallVec;
use tracing::debug;

/// Identifier for a state within a state machine
pub type StateId = u32;

/// Identifier for an event type
pub type EventId = u32;

/// A transition in the state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from_state: StateId,
    pub event: EventId,
    pub to_state: StateId,
}

impl Transition {
    pub const fn new(from: StateId, event: EventId, to: StateId) -> Self {
        Self {
            from_state: from,
            event,
            to_state: to,
        }
    }
}

/// Builder for creating state machines
pub struct StateMachineBuilder {
    initial_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachineBuilder {
    pub fn new(initial_state: StateId) -> Self {
        Self {
            initial_state,
            transitions: SmallVec::new(),
        }
    }

    /// Add a simple transition (from, event, to)
    pub fn on(mut self, from: StateId, event: EventId, to: StateId) -> Self {
        self.transitions.push(Transition::new(from, event, to));
        self
    }

    pub fn build(self) -> StateMachine {
        StateMachine {
            current_state: self.initial_state,
            transitions: self.transitions,
        }
    }
}

/// A state machine instance
#[derive(Clone, Debug)]
pub struct StateMachine {
    current_state: StateId,
    transitions: SmallVec<[Transition; 4]>,
}

impl StateMachine {
    pub fn builder(initial_state: StateId) -> StateMachineBuilder {
        StateMachineBuilder::new(initial_state)
    }

    pub fn is_in(&self, state: StateId) -> bool {
        self.current_state == state
    }

    /// Check if an event can trigger a transition from current state
    pub fn can_send(&self, event: EventId) -> bool {
        self.find(event).is_some()
    }

    /// Send an event to the state machine, potentially triggering a transition.
    ///
    /// Events with no matching transition leave the state unchanged.
    pub fn send(&mut self, event: EventId) -> StateId {
        let current = self.current_state;
        let Some(to_state) = self.find(event).map(|t| t.to_state) else {
            return current;
        };

        debug!(from = current, event, to = to_state, "fsm transition");
        self.current_state = to_state;
        to_state
    }

    fn find(&self, event: EventId) -> Option<&Transition> {
        self.transitions
            .iter()
            .find(|t| t.from_state == self.current_state && t.event == event)
    }
}

/// Mode lifecycle: a flip mode is either idle or receiving frames and input
pub mod lifecycle {
    use super::{EventId, StateId, StateMachine};

    pub const INACTIVE: StateId = 0;
    pub const ACTIVE: StateId = 1;

    pub const ACTIVATE: EventId = 1;
    pub const DEACTIVATE: EventId = 2;

    /// `Inactive ⇄ Active`, starting inactive
    pub fn machine() -> StateMachine {
        StateMachine::builder(INACTIVE)
            .on(INACTIVE, ACTIVATE, ACTIVE)
            .on(ACTIVE, DEACTIVATE, INACTIVE)
            .build()
    }
}
