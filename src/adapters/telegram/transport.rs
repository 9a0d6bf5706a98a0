//! Telegram transport via teloxide.
//!
//! Sends plain messages, one-time Yes/No reply keyboards, and in-memory
//! documents; downloads inbound photo payloads; and runs the long-polling
//! loop that feeds the dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use teloxide::net::Download;
use teloxide::prelude::*;
use teloxide::types::{FileId, InputFile, KeyboardButton, KeyboardMarkup as ReplyKeyboardMarkup, Message};
use tracing::{error, info};

use crate::application::Dispatcher;
use crate::domain::foundation::UserId;
use crate::domain::routing::{IncomingMessage, PhotoRef};
use crate::ports::{ChatTransport, TransportError};

/// Telegram implementation of [`ChatTransport`].
#[derive(Debug, Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    /// Creates a transport for the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            bot: Bot::new(token.into()),
        }
    }

    /// Runs the long-polling loop, handing every inbound message to the
    /// dispatcher. Updates for different users are handled concurrently;
    /// per-user ordering is enforced by the dispatcher's session lock.
    pub async fn run(&self, dispatcher: Arc<Dispatcher>) {
        info!("starting telegram long-polling loop");

        let bot = self.bot.clone();
        teloxide::repl(bot, move |_bot: Bot, msg: Message| {
            let dispatcher = Arc::clone(&dispatcher);
            async move {
                let Some(incoming) = map_message(&msg) else {
                    return Ok(());
                };
                if let Err(err) = dispatcher.handle(incoming).await {
                    error!(chat_id = msg.chat.id.0, error = %err, "failed to handle update");
                }
                Ok(())
            }
        })
        .await;
    }

    fn chat_id(user_id: UserId) -> ChatId {
        ChatId(user_id.as_i64())
    }
}

/// Maps a Telegram message into the transport-neutral inbound shape.
///
/// The largest photo size is taken when a photo is attached; messages with
/// neither text nor photo (stickers, voice, ...) are ignored.
fn map_message(msg: &Message) -> Option<IncomingMessage> {
    let user_id = UserId::new(msg.chat.id.0);

    if let Some(best) = msg.photo().and_then(|sizes| sizes.last()) {
        return Some(IncomingMessage {
            user_id,
            text: msg.caption().map(str::to_string),
            photo: Some(PhotoRef(best.file.id.0.clone())),
        });
    }

    let text = msg.text()?;
    Some(IncomingMessage::text(user_id, text))
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send_text(&self, user_id: UserId, text: &str) -> Result<(), TransportError> {
        self.bot
            .send_message(Self::chat_id(user_id), text)
            .await
            .map(|_| ())
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn send_choice_prompt(
        &self,
        user_id: UserId,
        text: &str,
        options: [&str; 2],
    ) -> Result<(), TransportError> {
        let keyboard = ReplyKeyboardMarkup::new([[
            KeyboardButton::new(options[0]),
            KeyboardButton::new(options[1]),
        ]])
        .resize_keyboard()
        .one_time_keyboard();

        self.bot
            .send_message(Self::chat_id(user_id), text)
            .reply_markup(keyboard)
            .await
            .map(|_| ())
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn send_document(
        &self,
        user_id: UserId,
        bytes: Vec<u8>,
        filename: &str,
        caption: &str,
    ) -> Result<(), TransportError> {
        let document = InputFile::memory(bytes).file_name(filename.to_string());
        self.bot
            .send_document(Self::chat_id(user_id), document)
            .caption(caption.to_string())
            .await
            .map(|_| ())
            .map_err(|e| TransportError::SendFailed(e.to_string()))
    }

    async fn download_photo(&self, photo: &PhotoRef) -> Result<Vec<u8>, TransportError> {
        let file = self
            .bot
            .get_file(FileId(photo.0.clone()))
            .await
            .map_err(|e| TransportError::DownloadFailed(e.to_string()))?;

        let mut buffer = Vec::new();
        self.bot
            .download_file(&file.path, &mut buffer)
            .await
            .map_err(|e| TransportError::DownloadFailed(e.to_string()))?;

        Ok(buffer)
    }
}
