//! Telegram adapters - the teloxide transport and a recording mock.

mod recording;
mod transport;

pub use recording::{RecordingTransport, SentItem};
pub use transport::TelegramTransport;
