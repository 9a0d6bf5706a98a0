//! Ports - interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! conversation core and the outside world. Adapters implement these ports.
//!
//! - `RecognitionService` - turns document photos into structured fields
//! - `AssistantService` - answers free-form questions
//! - `DocumentRenderer` - generates the policy document
//! - `ChatTransport` - delivers messages, prompts, and files to the user

mod assistant;
mod recognition;
mod renderer;
mod transport;

pub use assistant::{AssistantError, AssistantService};
pub use recognition::{ExtractionError, RecognitionService};
pub use renderer::{DocumentRenderer, RenderError};
pub use transport::{ChatTransport, TransportError};
