//! Flip Core Runtime
//!
//! Foundational primitives shared by the flip animation crates:
//!
//! - **Input Events**: pointer-down and edge activation events, queued
//!   between frames
//! - **State Machines**: flat state machines for mode lifecycle
//!
//! # Example
//!
//! ```rust
//! use flip_core::events::{Edge, InputEvent, InputQueue};
//!
//! let mut queue = InputQueue::new();
//! queue.push(InputEvent::PointerDown { x: 120.0, y: 40.0 });
//! queue.push(InputEvent::EdgeActivate(Edge::Left));
//!
//! assert_eq!(queue.drain().count(), 2);
//! assert!(queue.is_empty());
//! ```

pub mod events;
pub mod fsm;

pub use events::{Edge, InputEvent, InputQueue};
pub use fsm::{EventId, StateId, StateMachine, Transition};
