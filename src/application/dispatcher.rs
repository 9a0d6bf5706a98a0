//! Dispatcher - one inbound message, one unit of work.
//!
//! Routes each classified message either through the conversation engine or
//! to the free-form assistant, then executes the resulting actions on the
//! transport. The session's mutex is held for the whole unit of work, so
//! events for one user are processed in arrival order and never overlap.

use std::sync::Arc;

use tracing::{debug, error, info};

use crate::domain::conversation::{Action, ConversationEngine, EngineEvent};
use crate::domain::routing::{classify, should_divert, IncomingMessage, Intent};
use crate::domain::session::Session;
use crate::ports::{AssistantService, ChatTransport, TransportError};

use super::SessionRegistry;

const ASSISTANT_APOLOGY: &str = "❌ Sorry, I couldn't process your question right now.";

/// Wires router, engine, assistant, and transport together.
pub struct Dispatcher {
    registry: SessionRegistry,
    engine: ConversationEngine,
    assistant: Arc<dyn AssistantService>,
    transport: Arc<dyn ChatTransport>,
}

impl Dispatcher {
    pub fn new(
        registry: SessionRegistry,
        engine: ConversationEngine,
        assistant: Arc<dyn AssistantService>,
        transport: Arc<dyn ChatTransport>,
    ) -> Self {
        Self {
            registry,
            engine,
            assistant,
            transport,
        }
    }

    /// Handles one inbound message end to end.
    ///
    /// Transport send failures are surfaced to the caller; everything else is
    /// recovered into a reply per the error taxonomy.
    pub async fn handle(&self, message: IncomingMessage) -> Result<(), TransportError> {
        let user_id = message.user_id;
        let session = self.registry.get_or_create(user_id).await;
        let mut session = session.lock().await;

        let intent = classify(session.step(), &message);
        debug!(user_id = %user_id, step = ?session.step(), intent = ?intent, "message classified");

        let action = match intent {
            Intent::Command(name) => self.handle_command(&mut session, &name),
            Intent::Photo(photo) => match self.transport.download_photo(&photo).await {
                Ok(bytes) => {
                    self.engine
                        .advance(&mut session, EngineEvent::PhotoReceived(bytes))
                        .await
                }
                Err(err) => {
                    // A failed download is an extraction failure: same step,
                    // friendly retry.
                    error!(user_id = %user_id, error = %err, "photo download failed");
                    self.engine.advance(&mut session, EngineEvent::Other).await
                }
            },
            Intent::Affirmative => self.engine.advance(&mut session, EngineEvent::Affirmative).await,
            Intent::Negative => self.engine.advance(&mut session, EngineEvent::Negative).await,
            Intent::FreeForm(text) if should_divert(session.step(), &text) => {
                self.answer_question(&text).await
            }
            Intent::FreeForm(_) => self.engine.advance(&mut session, EngineEvent::Other).await,
        };

        self.execute(user_id, action).await
    }

    fn handle_command(&self, session: &mut Session, name: &str) -> Action {
        match name {
            "start" => {
                info!(user_id = %session.user_id(), "conversation restarted by command");
                self.engine.restart(session)
            }
            // Unknown commands fall back to a gentle nudge from the engine's
            // reprompt for the current step on the next message.
            _ => Action::text("I don't know that command. Send /start to begin again."),
        }
    }

    /// Free-form diversion: the assistant answers, the step stays untouched.
    async fn answer_question(&self, question: &str) -> Action {
        match self.assistant.ask(question).await {
            Ok(answer) => Action::SendText(answer),
            Err(err) => {
                error!(error = %err, "assistant call failed");
                Action::text(ASSISTANT_APOLOGY)
            }
        }
    }

    async fn execute(
        &self,
        user_id: crate::domain::foundation::UserId,
        action: Action,
    ) -> Result<(), TransportError> {
        match action {
            Action::SendText(text) => self.transport.send_text(user_id, &text).await,
            Action::SendChoicePrompt { text, options } => {
                self.transport
                    .send_choice_prompt(user_id, &text, [&options[0], &options[1]])
                    .await
            }
            Action::SendDocument {
                bytes,
                filename,
                caption,
            } => {
                self.transport
                    .send_document(user_id, bytes, &filename, &caption)
                    .await
            }
            Action::NoOp => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::assistant::MockAssistant;
    use crate::adapters::recognition::MockRecognition;
    use crate::adapters::renderer::MockRenderer;
    use crate::adapters::telegram::{RecordingTransport, SentItem};
    use crate::domain::documents::{PassportFields, VehicleFields};
    use crate::domain::foundation::UserId;
    use crate::domain::routing::PhotoRef;
    use crate::domain::session::Step;

    fn dispatcher(transport: Arc<RecordingTransport>) -> Dispatcher {
        let recognition = MockRecognition::new()
            .with_passport(PassportFields {
                surname: "Shevchenko".into(),
                name: "Taras".into(),
                ..Default::default()
            })
            .with_vehicle(VehicleFields {
                registration_number: "AA1234BB".into(),
                ..Default::default()
            });
        Dispatcher::new(
            SessionRegistry::new(),
            ConversationEngine::new(
                Arc::new(recognition),
                Arc::new(MockRenderer::succeeding(b"%PDF".to_vec())),
                100,
            ),
            Arc::new(MockAssistant::answering("Collision and theft are covered.")),
            transport,
        )
    }

    fn user() -> UserId {
        UserId::new(42)
    }

    #[tokio::test]
    async fn first_message_creates_session_and_welcomes() {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = dispatcher(transport.clone());

        dispatcher
            .handle(IncomingMessage::text(user(), "hi"))
            .await
            .unwrap();

        let sent = transport.sent().await;
        assert_eq!(sent.len(), 1);
        assert!(matches!(&sent[0], SentItem::Text(text) if text.contains("Hello")));
    }

    #[tokio::test]
    async fn question_at_confirm_payment_goes_to_assistant_without_step_change() {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = dispatcher(transport.clone());

        // Walk to ConfirmPayment.
        dispatcher.handle(IncomingMessage::text(user(), "hi")).await.unwrap();
        dispatcher
            .handle(IncomingMessage::photo(user(), PhotoRef("p".into())))
            .await
            .unwrap();
        dispatcher.handle(IncomingMessage::text(user(), "yes")).await.unwrap();
        dispatcher
            .handle(IncomingMessage::photo(user(), PhotoRef("v".into())))
            .await
            .unwrap();
        dispatcher.handle(IncomingMessage::text(user(), "yes")).await.unwrap();
        dispatcher.handle(IncomingMessage::text(user(), "yes")).await.unwrap();

        let step_before = {
            let session = dispatcher.registry.get_or_create(user()).await;
            let guard = session.lock().await;
            guard.step()
        };
        assert_eq!(step_before, Step::ConfirmPayment);

        dispatcher
            .handle(IncomingMessage::text(user(), "what is covered"))
            .await
            .unwrap();

        let session = dispatcher.registry.get_or_create(user()).await;
        let guard = session.lock().await;
        assert_eq!(guard.step(), Step::ConfirmPayment);

        let sent = transport.sent().await;
        assert!(matches!(
            sent.last().unwrap(),
            SentItem::Text(text) if text.contains("covered")
        ));
    }

    #[tokio::test]
    async fn assistant_failure_sends_apology_and_keeps_step() {
        let transport = Arc::new(RecordingTransport::new());
        let mut dispatcher = dispatcher(transport.clone());
        dispatcher.assistant = Arc::new(MockAssistant::failing());

        dispatcher.handle(IncomingMessage::text(user(), "hi")).await.unwrap();
        dispatcher
            .handle(IncomingMessage::photo(user(), PhotoRef("p".into())))
            .await
            .unwrap();

        dispatcher
            .handle(IncomingMessage::text(user(), "what does this cost?"))
            .await
            .unwrap();

        let sent = transport.sent().await;
        assert!(matches!(
            sent.last().unwrap(),
            SentItem::Text(text) if text.contains("couldn't process")
        ));

        let session = dispatcher.registry.get_or_create(user()).await;
        assert_eq!(session.lock().await.step(), Step::ConfirmPassport);
    }

    #[tokio::test]
    async fn start_command_restarts_an_in_flight_conversation() {
        let transport = Arc::new(RecordingTransport::new());
        let dispatcher = dispatcher(transport.clone());

        dispatcher.handle(IncomingMessage::text(user(), "hi")).await.unwrap();
        dispatcher
            .handle(IncomingMessage::photo(user(), PhotoRef("p".into())))
            .await
            .unwrap();
        dispatcher.handle(IncomingMessage::text(user(), "/start")).await.unwrap();

        let session = dispatcher.registry.get_or_create(user()).await;
        let guard = session.lock().await;
        assert_eq!(guard.step(), Step::AwaitPassportPhoto);
        assert!(guard.passport().is_none());
    }

    #[tokio::test]
    async fn failed_photo_download_reprompts_in_same_step() {
        let transport = Arc::new(RecordingTransport::failing_downloads());
        let dispatcher = dispatcher(transport.clone());

        dispatcher.handle(IncomingMessage::text(user(), "hi")).await.unwrap();
        dispatcher
            .handle(IncomingMessage::photo(user(), PhotoRef("p".into())))
            .await
            .unwrap();

        let session = dispatcher.registry.get_or_create(user()).await;
        assert_eq!(session.lock().await.step(), Step::AwaitPassportPhoto);

        let sent = transport.sent().await;
        assert!(matches!(
            sent.last().unwrap(),
            SentItem::Text(text) if text.contains("photo of your passport")
        ));
    }
}
