//! Conversation Engine - the step state machine driving the purchase flow.

mod action;
mod engine;
pub mod summary;

pub use action::Action;
pub use engine::{ConversationEngine, EngineEvent};
