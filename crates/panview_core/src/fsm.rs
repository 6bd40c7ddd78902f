//! State transition trait for small widget state machines
//!
//! State enums map an event id to their next state:
//!
//! ```
//! use panview_core::events::EventType;
//! use panview_core::fsm::StateTransitions;
//!
//! const POINTER_DOWN: EventType = 1;
//! const POINTER_UP: EventType = 2;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Press {
//!     Idle,
//!     Pressed,
//! }
//!
//! impl StateTransitions for Press {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Press::Idle, POINTER_DOWN) => Some(Press::Pressed),
//!             (Press::Pressed, POINTER_UP) => Some(Press::Idle),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! assert_eq!(Press::Idle.on_event(POINTER_DOWN), Some(Press::Pressed));
//! assert_eq!(Press::Idle.on_event(POINTER_UP), None);
//! ```

use std::hash::Hash;

use crate::events::EventType;

/// Trait for state types that can handle event transitions
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Apply `event` in place; returns whether the state changed
    fn transition(&mut self, event: EventType) -> bool {
        match self.on_event(event) {
            Some(next) if next != *self => {
                *self = next;
                true
            }
            _ => false,
        }
    }
}
