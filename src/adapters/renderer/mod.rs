//! Renderer adapters - PDF policy certificate and a scriptable mock.

mod mock;
mod pdf;

pub use mock::MockRenderer;
pub use pdf::PdfPolicyRenderer;
