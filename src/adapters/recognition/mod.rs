//! Recognition adapters - Mindee OCR client and a scriptable mock.

mod mindee;
mod mock;

pub use mindee::{MindeeConfig, MindeeRecognition};
pub use mock::MockRecognition;
