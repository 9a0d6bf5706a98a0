//! Document Renderer Port - policy document generation.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::documents::{PassportFields, VehicleFields};

/// Errors from policy document generation.
///
/// Fatal to the current request: the user is told the generation failed and
/// the step does not advance as if delivery succeeded.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("policy rendering failed: {0}")]
    Failed(String),
}

/// Port for rendering the insurance policy document.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Renders the policy PDF from the confirmed field records.
    async fn render_policy(
        &self,
        passport: &PassportFields,
        vehicle: &VehicleFields,
    ) -> Result<Vec<u8>, RenderError>;
}
