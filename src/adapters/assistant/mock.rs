//! Mock assistant for tests and development.

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::ports::{AssistantError, AssistantService};

/// Scriptable [`AssistantService`] returning a canned answer and recording
/// the questions it was asked.
#[derive(Debug)]
pub struct MockAssistant {
    answer: Option<String>,
    questions: Mutex<Vec<String>>,
}

impl MockAssistant {
    /// Mock answering every question with the given text.
    pub fn answering(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Mock failing every question.
    pub fn failing() -> Self {
        Self {
            answer: None,
            questions: Mutex::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    pub async fn questions(&self) -> Vec<String> {
        self.questions.lock().await.clone()
    }
}

#[async_trait]
impl AssistantService for MockAssistant {
    async fn ask(&self, prompt: &str) -> Result<String, AssistantError> {
        self.questions.lock().await.push(prompt.to_string());
        self.answer
            .clone()
            .ok_or_else(|| AssistantError::Unavailable("mock failure".to_string()))
    }
}
