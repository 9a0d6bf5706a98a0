//! Assistant adapters - Mistral chat completions and a scriptable mock.

mod mistral;
mod mock;

pub use mistral::{MistralAssistant, MistralConfig};
pub use mock::MockAssistant;
