//! Foundation - shared value objects and traits.

mod ids;
mod state_machine;

pub use ids::UserId;
pub use state_machine::{StateMachine, TransitionError};
