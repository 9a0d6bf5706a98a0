//! Chat Transport Port - outbound delivery and photo download.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::UserId;
use crate::domain::routing::PhotoRef;

/// Errors from the chat transport.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to send message: {0}")]
    SendFailed(String),

    #[error("failed to download photo: {0}")]
    DownloadFailed(String),
}

/// Port for the chat transport (message delivery, photo download,
/// keyboard rendering).
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Sends a plain text message.
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<(), TransportError>;

    /// Sends a text message with a one-time Yes/No choice keyboard.
    async fn send_choice_prompt(
        &self,
        user_id: UserId,
        text: &str,
        options: [&str; 2],
    ) -> Result<(), TransportError>;

    /// Sends a generated document with a filename and caption.
    async fn send_document(
        &self,
        user_id: UserId,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), TransportError>;

    /// Downloads the photo payload referenced by an inbound message.
    async fn download_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>, TransportError>;
}
