//! Application layer - wiring between transport, router, and engine.

mod dispatcher;
mod session_registry;

pub use dispatcher::Dispatcher;
pub use session_registry::SessionRegistry;
