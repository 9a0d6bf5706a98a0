//! Adapters - implementations of the collaborator ports.

pub mod assistant;
pub mod recognition;
pub mod renderer;
pub mod telegram;
