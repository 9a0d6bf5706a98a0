//! Recording transport for tests.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::foundation::UserId;
use crate::domain::routing::PhotoRef;
use crate::ports::{ChatTransport, TransportError};

/// What the bot sent, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentItem {
    Text(String),
    ChoicePrompt {
        text: String,
        options: [String; 2],
    },
    Document {
        filename: String,
        caption: String,
        bytes: Vec<u8>,
    },
}

/// In-memory [`ChatTransport`] recording every outbound item.
///
/// Photo downloads return the photo reference as bytes so tests can assert
/// which image reached the recognition service.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentItem>>,
    fail_downloads: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Transport whose photo downloads always fail.
    pub fn failing_downloads() -> Self {
        Self {
            fail_downloads: true,
            ..Self::default()
        }
    }

    /// Everything sent so far, in order.
    pub async fn sent(&self) -> Vec<SentItem> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send_text(&self, _user_id: UserId, text: &str) -> Result<(), TransportError> {
        self.sent.lock().await.push(SentItem::Text(text.to_string()));
        Ok(())
    }

    async fn send_choice_prompt(
        &self,
        _user_id: UserId,
        text: &str,
        options: [&str; 2],
    ) -> Result<(), TransportError> {
        self.sent.lock().await.push(SentItem::ChoicePrompt {
            text: text.to_string(),
            options: [options[0].to_string(), options[1].to_string()],
        });
        Ok(())
    }

    async fn send_document(
        &self,
        _user_id: UserId,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        self.sent.lock().await.push(SentItem::Document {
            filename: filename.to_string(),
            caption: caption.to_string(),
            bytes,
        });
        Ok(())
    }

    async fn download_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>, TransportError> {
        if self.fail_downloads {
            return Err(TransportError::DownloadFailed("mock failure".to_string()));
        }
        Ok(photo.0.as_bytes().to_vec())
    }
}
