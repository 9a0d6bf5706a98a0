//! Recognition Service Port - document OCR interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::documents::{PassportFields, VehicleFields};

/// Errors from the recognition collaborator.
///
/// All variants are recovered locally: the conversation stays in the same
/// awaiting-photo step and the user is asked to retry. Raw errors are never
/// forwarded to the user.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// The photo could not be downloaded from the transport.
    #[error("photo download failed: {0}")]
    Download(String),

    /// The recognition backend rejected or could not decode the image.
    #[error("document unreadable: {0}")]
    Unreadable(String),

    /// The backend responded but the prediction payload could not be parsed.
    #[error("malformed recognition response: {0}")]
    MalformedResponse(String),

    /// The backend was unreachable or timed out.
    #[error("recognition service unavailable: {0}")]
    Unavailable(String),
}

/// Port for extracting structured fields from document photos.
#[async_trait]
pub trait RecognitionService: Send + Sync {
    /// Extracts passport fields from an image.
    async fn extract_passport(&self, image: &[u8]) -> Result<PassportFields, ExtractionError>;

    /// Extracts vehicle ID fields from an image.
    async fn extract_vehicle(&self, image: &[u8]) -> Result<VehicleFields, ExtractionError>;
}
