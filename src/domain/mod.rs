//! Domain layer - pure conversation logic.
//!
//! No transport, HTTP, or vendor knowledge lives here. The conversation
//! engine, intent routing, and summary composition are all testable without
//! touching a network.

pub mod conversation;
pub mod documents;
pub mod foundation;
pub mod routing;
pub mod session;
