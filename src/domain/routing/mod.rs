//! Intent Router - classifies inbound messages.
//!
//! One canonical classifier for the whole bot: photo payloads, Yes/No tokens,
//! slash commands, and free-form text. The Yes/No token matching that the
//! original flow scattered across handlers is centralized here so every
//! confirmation step recognizes the same answers.

use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::domain::foundation::UserId;
use crate::domain::session::Step;

/// Keyboard label offered for an affirmative answer.
pub const AFFIRMATIVE_LABEL: &str = "✅ Yes";

/// Keyboard label offered for a negative answer.
pub const NEGATIVE_LABEL: &str = "❌ No";

/// Opaque reference to a photo held by the transport.
///
/// The actual bytes are fetched through
/// [`ChatTransport::download_photo`](crate::ports::ChatTransport::download_photo).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef(pub String);

/// An inbound chat message in transport-neutral form.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub user_id: UserId,
    pub text: Option<String>,
    pub photo: Option<PhotoRef>,
}

impl IncomingMessage {
    /// Text-only message.
    pub fn text(user_id: UserId, text: impl Into<String>) -> Self {
        Self {
            user_id,
            text: Some(text.into()),
            photo: None,
        }
    }

    /// Message carrying a photo payload.
    pub fn photo(user_id: UserId, photo: PhotoRef) -> Self {
        Self {
            user_id,
            text: None,
            photo: Some(photo),
        }
    }
}

/// Classification of an inbound message, in priority order:
/// photo, command, affirmative/negative token, free-form text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Photo(PhotoRef),
    Command(String),
    Affirmative,
    Negative,
    FreeForm(String),
}

static AFFIRMATIVE_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "✅ yes", "yes", "y", "yes!", "yep", "yeah", "ok", "okay", "sure", "confirm", "correct",
        "✅", "👍", "да", "так",
    ])
});

static NEGATIVE_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "❌ no", "no", "n", "no!", "nope", "cancel", "wrong", "incorrect", "❌", "✖", "👎", "нет",
        "ні",
    ])
});

/// Leading words that mark free-form text as a question for the assistant.
const QUESTION_WORDS: [&str; 12] = [
    "what", "how", "why", "when", "where", "who", "which", "can", "could", "does", "do", "is",
];

/// Classifies an inbound message against the session's current step.
///
/// Rules, in priority order:
/// 1. A photo payload always wins.
/// 2. `/`-prefixed text is a command.
/// 3. Trimmed, case-insensitive text is matched against the fixed
///    affirmative/negative token sets.
/// 4. Everything else is free-form text.
///
/// The step is accepted for parity with callers that may later want
/// step-sensitive token sets; classification itself is step-independent, and
/// the diversion policy (engine reprompt vs. assistant) is decided by the
/// dispatcher via [`should_divert`].
pub fn classify(_step: Step, message: &IncomingMessage) -> Intent {
    if let Some(photo) = &message.photo {
        return Intent::Photo(photo.clone());
    }

    let text = message.text.as_deref().unwrap_or_default();
    let trimmed = text.trim();

    if let Some(command) = trimmed.strip_prefix('/') {
        let name = command
            .split_whitespace()
            .next()
            .unwrap_or_default()
            .to_lowercase();
        return Intent::Command(name);
    }

    let normalized = trimmed.to_lowercase();
    if AFFIRMATIVE_TOKENS.contains(normalized.as_str()) {
        return Intent::Affirmative;
    }
    if NEGATIVE_TOKENS.contains(normalized.as_str()) {
        return Intent::Negative;
    }

    Intent::FreeForm(trimmed.to_string())
}

/// Decides whether free-form text should be diverted to the assistant.
///
/// Gated policy: photo steps never divert (they strictly require a photo).
/// At every other step the text is diverted only when it reads as a question;
/// non-question text falls through to the engine, which reprompts.
pub fn should_divert(step: Step, text: &str) -> bool {
    step.allows_free_form() && looks_like_question(text)
}

fn looks_like_question(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.ends_with('?') {
        return true;
    }
    let first_word = trimmed
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase();
    QUESTION_WORDS.contains(&first_word.as_str())
}
