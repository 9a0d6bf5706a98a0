//! Outbound actions produced by the conversation engine.

/// What the transport should do in response to an inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send a plain text message.
    SendText(String),

    /// Send a message with a one-time Yes/No choice keyboard.
    SendChoicePrompt { text: String, options: [String; 2] },

    /// Send a generated document.
    SendDocument {
        bytes: Vec<u8>,
        filename: String,
        caption: String,
    },

    /// Nothing to send.
    NoOp,
}

impl Action {
    /// Text message helper.
    pub fn text(text: impl Into<String>) -> Self {
        Action::SendText(text.into())
    }

    /// Yes/No prompt helper using the canonical keyboard labels.
    pub fn confirm(text: impl Into<String>) -> Self {
        use crate::domain::routing::{AFFIRMATIVE_LABEL, NEGATIVE_LABEL};
        Action::SendChoicePrompt {
            text: text.into(),
            options: [AFFIRMATIVE_LABEL.to_string(), NEGATIVE_LABEL.to_string()],
        }
    }
}
