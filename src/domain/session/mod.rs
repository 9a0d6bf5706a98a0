//! Per-user conversation session and its step state machine.

mod session;
mod step;

pub use session::Session;
pub use step::Step;
