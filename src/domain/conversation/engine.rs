//! Conversation Engine - the step state machine.
//!
//! Every (step, event) pair of the purchase flow is handled in one place.
//! Collaborator calls (recognition, rendering) are awaited before the session
//! mutates, so a failure never advances the step.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::conversation::summary;
use crate::domain::session::{Session, Step};
use crate::ports::{DocumentRenderer, RecognitionService};

use super::Action;

const WELCOME: &str = "👋 Hello!\nI'll help you purchase car insurance.\nPlease send a photo of your passport.";
const PASSPORT_REPROMPT: &str = "Please send a photo of your passport";
const VEHICLE_REPROMPT: &str = "Please send a photo of your vehicle ID";
const PASSPORT_RETRY: &str =
    "I couldn't read that photo 😔\nPlease send a clearer photo of your passport.";
const VEHICLE_RETRY: &str =
    "I couldn't read that photo 😔\nPlease send a clearer photo of your vehicle ID.";
const PASSPORT_ACCEPTED: &str = "Got your passport ✅\nNow send your vehicle ID document.";
const PASSPORT_RESEND: &str = "Let's try again. Send a photo of your passport";
const VEHICLE_RESEND: &str = "Let's try again. Send a photo of your vehicle ID";
const RESTART_COLLECTION: &str = "Let's start over. Send a photo of your passport";
const ANSWER_YES_OR_NO: &str = "Please answer ✅ Yes or ❌ No";
const PRICE_IS_FIXED: &str = "Unfortunately, the price is fixed at 100 USD.";
const POLICY_CAPTION: &str = "Congratulations, here is your insurance policy";
const POLICY_FILENAME: &str = "insurance_policy.pdf";
const RENDER_FAILED: &str =
    "Sorry, I couldn't generate your policy right now. Please answer ✅ Yes to try again.";

/// A classified inbound event, as consumed by [`ConversationEngine::advance`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A photo payload, already downloaded by the caller.
    PhotoReceived(Vec<u8>),
    Affirmative,
    Negative,
    /// Anything that is neither a photo nor a recognized Yes/No token.
    Other,
}

/// The step state machine of the purchase flow.
///
/// Owns the transition table of the conversation and the collaborator calls
/// it triggers. All failure paths resolve to an [`Action`]; `advance` never
/// fails and never leaves the session in an undefined step.
pub struct ConversationEngine {
    recognition: Arc<dyn RecognitionService>,
    renderer: Arc<dyn DocumentRenderer>,
    price_usd: u32,
}

impl ConversationEngine {
    pub fn new(
        recognition: Arc<dyn RecognitionService>,
        renderer: Arc<dyn DocumentRenderer>,
        price_usd: u32,
    ) -> Self {
        Self {
            recognition,
            renderer,
            price_usd,
        }
    }

    /// Advances the session according to the transition table.
    pub async fn advance(&self, session: &mut Session, event: EngineEvent) -> Action {
        match session.step() {
            Step::Start => self.welcome(session),
            Step::AwaitPassportPhoto => self.handle_passport_photo(session, event).await,
            Step::ConfirmPassport => self.handle_confirm_passport(session, event),
            Step::AwaitVehiclePhoto => self.handle_vehicle_photo(session, event).await,
            Step::ConfirmVehicle => self.handle_confirm_vehicle(session, event),
            Step::ConfirmSummary => self.handle_confirm_summary(session, event),
            Step::ConfirmPayment => self.handle_confirm_payment(session, event).await,
        }
    }

    /// Restarts the conversation from the beginning, e.g. on `/start`.
    pub fn restart(&self, session: &mut Session) -> Action {
        session.reset();
        self.welcome(session)
    }

    fn welcome(&self, session: &mut Session) -> Action {
        session.set_step(Step::AwaitPassportPhoto);
        Action::text(WELCOME)
    }

    async fn handle_passport_photo(&self, session: &mut Session, event: EngineEvent) -> Action {
        let EngineEvent::PhotoReceived(image) = event else {
            return Action::text(PASSPORT_REPROMPT);
        };

        match self.recognition.extract_passport(&image).await {
            Ok(fields) => {
                info!(user_id = %session.user_id(), "passport extracted");
                let prompt = summary::passport_summary(&fields);
                session.set_passport(fields);
                session.set_step(Step::ConfirmPassport);
                Action::confirm(prompt)
            }
            Err(err) => {
                warn!(user_id = %session.user_id(), error = %err, "passport extraction failed");
                Action::text(PASSPORT_RETRY)
            }
        }
    }

    fn handle_confirm_passport(&self, session: &mut Session, event: EngineEvent) -> Action {
        match event {
            EngineEvent::Affirmative => {
                session.set_step(Step::AwaitVehiclePhoto);
                Action::text(PASSPORT_ACCEPTED)
            }
            EngineEvent::Negative => {
                session.set_step(Step::AwaitPassportPhoto);
                Action::text(PASSPORT_RESEND)
            }
            _ => Action::text(ANSWER_YES_OR_NO),
        }
    }

    async fn handle_vehicle_photo(&self, session: &mut Session, event: EngineEvent) -> Action {
        let EngineEvent::PhotoReceived(image) = event else {
            return Action::text(VEHICLE_REPROMPT);
        };

        match self.recognition.extract_vehicle(&image).await {
            Ok(fields) => {
                info!(user_id = %session.user_id(), "vehicle ID extracted");
                let prompt = summary::vehicle_summary(&fields);
                session.set_vehicle(fields);
                session.set_step(Step::ConfirmVehicle);
                Action::confirm(prompt)
            }
            Err(err) => {
                warn!(user_id = %session.user_id(), error = %err, "vehicle extraction failed");
                Action::text(VEHICLE_RETRY)
            }
        }
    }

    fn handle_confirm_vehicle(&self, session: &mut Session, event: EngineEvent) -> Action {
        match event {
            EngineEvent::Affirmative => match (session.passport(), session.vehicle()) {
                (Some(passport), Some(vehicle)) => {
                    let prompt = summary::combined_summary(passport, vehicle);
                    session.set_step(Step::ConfirmSummary);
                    Action::confirm(prompt)
                }
                // Extracted data went missing; recover rather than guess.
                _ => self.recover(session),
            },
            EngineEvent::Negative => {
                session.set_step(Step::AwaitVehiclePhoto);
                Action::text(VEHICLE_RESEND)
            }
            _ => Action::text(ANSWER_YES_OR_NO),
        }
    }

    fn handle_confirm_summary(&self, session: &mut Session, event: EngineEvent) -> Action {
        match event {
            EngineEvent::Affirmative => {
                session.set_step(Step::ConfirmPayment);
                Action::confirm(format!(
                    "The insurance price is {} USD.\nDo you confirm?",
                    self.price_usd
                ))
            }
            EngineEvent::Negative => {
                session.set_step(Step::AwaitPassportPhoto);
                Action::text(RESTART_COLLECTION)
            }
            _ => Action::text(ANSWER_YES_OR_NO),
        }
    }

    async fn handle_confirm_payment(&self, session: &mut Session, event: EngineEvent) -> Action {
        match event {
            EngineEvent::Affirmative => {
                let (Some(passport), Some(vehicle)) = (session.passport(), session.vehicle())
                else {
                    return self.recover(session);
                };

                match self.renderer.render_policy(passport, vehicle).await {
                    Ok(bytes) => {
                        info!(user_id = %session.user_id(), "policy rendered, delivering");
                        session.reset();
                        Action::SendDocument {
                            bytes,
                            filename: POLICY_FILENAME.to_string(),
                            caption: POLICY_CAPTION.to_string(),
                        }
                    }
                    Err(err) => {
                        // Do not advance as if delivery succeeded.
                        warn!(user_id = %session.user_id(), error = %err, "policy rendering failed");
                        Action::text(RENDER_FAILED)
                    }
                }
            }
            EngineEvent::Negative => {
                session.reset();
                Action::text(PRICE_IS_FIXED)
            }
            _ => Action::text(ANSWER_YES_OR_NO),
        }
    }

    /// Invariant-violation recovery: reset to the initial step instead of
    /// silently dropping the message.
    fn recover(&self, session: &mut Session) -> Action {
        warn!(user_id = %session.user_id(), step = ?session.step(), "session state invariant violated, resetting");
        session.reset();
        self.welcome(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::recognition::MockRecognition;
    use crate::adapters::renderer::MockRenderer;
    use crate::domain::documents::{PassportFields, VehicleFields};
    use crate::domain::foundation::UserId;

    fn passport_fixture() -> PassportFields {
        PassportFields {
            surname: "Shevchenko".into(),
            name: "Taras".into(),
            record_no: "123456".into(),
            ..Default::default()
        }
    }

    fn vehicle_fixture() -> VehicleFields {
        VehicleFields {
            registration_number: "AA1234BB".into(),
            make: "Toyota".into(),
            ..Default::default()
        }
    }

    fn engine_with(recognition: MockRecognition, renderer: MockRenderer) -> ConversationEngine {
        ConversationEngine::new(Arc::new(recognition), Arc::new(renderer), 100)
    }

    fn happy_engine() -> ConversationEngine {
        engine_with(
            MockRecognition::new()
                .with_passport(passport_fixture())
                .with_vehicle(vehicle_fixture()),
            MockRenderer::succeeding(b"%PDF-stub".to_vec()),
        )
    }

    fn session() -> Session {
        Session::new(UserId::new(7))
    }

    async fn drive_to(engine: &ConversationEngine, session: &mut Session, target: Step) {
        engine.advance(session, EngineEvent::Other).await; // Start -> AwaitPassportPhoto
        if session.step() == target {
            return;
        }
        engine
            .advance(session, EngineEvent::PhotoReceived(vec![1]))
            .await;
        if session.step() == target {
            return;
        }
        engine.advance(session, EngineEvent::Affirmative).await; // -> AwaitVehiclePhoto
        if session.step() == target {
            return;
        }
        engine
            .advance(session, EngineEvent::PhotoReceived(vec![2]))
            .await;
        if session.step() == target {
            return;
        }
        engine.advance(session, EngineEvent::Affirmative).await; // -> ConfirmSummary
        if session.step() == target {
            return;
        }
        engine.advance(session, EngineEvent::Affirmative).await; // -> ConfirmPayment
        assert_eq!(session.step(), target);
    }

    mod start {
        use super::*;

        #[tokio::test]
        async fn any_event_at_start_sends_welcome_and_awaits_passport() {
            let engine = happy_engine();
            let mut session = session();

            let action = engine.advance(&mut session, EngineEvent::Other).await;

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
            assert!(matches!(action, Action::SendText(text) if text.contains("passport")));
        }

        #[tokio::test]
        async fn restart_resets_mid_flow_session() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmSummary).await;

            let action = engine.restart(&mut session);

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
            assert!(session.passport().is_none());
            assert!(matches!(action, Action::SendText(text) if text.contains("Hello")));
        }
    }

    mod passport_collection {
        use super::*;

        #[tokio::test]
        async fn non_photo_reprompts_without_state_change() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::AwaitPassportPhoto).await;

            let action = engine.advance(&mut session, EngineEvent::Other).await;

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
            assert_eq!(action, Action::text("Please send a photo of your passport"));
        }

        #[tokio::test]
        async fn successful_extraction_stores_fields_and_prompts_confirmation() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::AwaitPassportPhoto).await;

            let action = engine
                .advance(&mut session, EngineEvent::PhotoReceived(vec![1, 2, 3]))
                .await;

            assert_eq!(session.step(), Step::ConfirmPassport);
            assert!(session.passport().is_some());
            assert!(matches!(
                action,
                Action::SendChoicePrompt { text, .. } if text.contains("Passport Information")
            ));
        }

        #[tokio::test]
        async fn failed_extraction_keeps_step_and_fields_untouched() {
            let engine = engine_with(
                MockRecognition::failing(),
                MockRenderer::succeeding(vec![]),
            );
            let mut session = session();
            engine.advance(&mut session, EngineEvent::Other).await;

            let action = engine
                .advance(&mut session, EngineEvent::PhotoReceived(vec![0xFF]))
                .await;

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
            assert!(session.passport().is_none());
            assert!(matches!(action, Action::SendText(text) if text.contains("clearer photo")));
        }

        #[tokio::test]
        async fn rejecting_passport_returns_to_await_photo() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmPassport).await;

            let action = engine.advance(&mut session, EngineEvent::Negative).await;

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
            assert!(matches!(action, Action::SendText(text) if text.contains("try again")));
        }
    }

    mod vehicle_collection {
        use super::*;

        #[tokio::test]
        async fn rejecting_vehicle_keeps_passport_fields() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmVehicle).await;

            engine.advance(&mut session, EngineEvent::Negative).await;

            assert_eq!(session.step(), Step::AwaitVehiclePhoto);
            assert!(session.passport().is_some());
        }

        #[tokio::test]
        async fn accepting_vehicle_shows_combined_summary() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmVehicle).await;

            let action = engine.advance(&mut session, EngineEvent::Affirmative).await;

            assert_eq!(session.step(), Step::ConfirmSummary);
            assert!(matches!(
                action,
                Action::SendChoicePrompt { text, .. }
                    if text.contains("Passport Information") && text.contains("Vehicle Information")
            ));
        }
    }

    mod summary_and_payment {
        use super::*;

        #[tokio::test]
        async fn ambiguous_answer_at_summary_reprompts_without_transition() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmSummary).await;

            let action = engine.advance(&mut session, EngineEvent::Other).await;

            assert_eq!(session.step(), Step::ConfirmSummary);
            assert_eq!(action, Action::text("Please answer ✅ Yes or ❌ No"));
        }

        #[tokio::test]
        async fn rejecting_summary_restarts_document_collection() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmSummary).await;

            engine.advance(&mut session, EngineEvent::Negative).await;

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
        }

        #[tokio::test]
        async fn accepting_summary_quotes_the_fixed_price() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmSummary).await;

            let action = engine.advance(&mut session, EngineEvent::Affirmative).await;

            assert_eq!(session.step(), Step::ConfirmPayment);
            assert!(matches!(
                action,
                Action::SendChoicePrompt { text, .. } if text.contains("100 USD")
            ));
        }

        #[tokio::test]
        async fn confirming_payment_delivers_policy_and_resets() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmPayment).await;

            let action = engine.advance(&mut session, EngineEvent::Affirmative).await;

            assert_eq!(session.step(), Step::Start);
            assert!(matches!(
                action,
                Action::SendDocument { filename, .. } if filename == "insurance_policy.pdf"
            ));
        }

        #[tokio::test]
        async fn declining_payment_sends_fixed_price_message_and_resets() {
            let engine = happy_engine();
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmPayment).await;

            let action = engine.advance(&mut session, EngineEvent::Negative).await;

            assert_eq!(session.step(), Step::Start);
            assert!(matches!(action, Action::SendText(text) if text.contains("price is fixed")));
        }

        #[tokio::test]
        async fn render_failure_reports_and_stays_at_confirm_payment() {
            let engine = engine_with(
                MockRecognition::new()
                    .with_passport(passport_fixture())
                    .with_vehicle(vehicle_fixture()),
                MockRenderer::failing(),
            );
            let mut session = session();
            drive_to(&engine, &mut session, Step::ConfirmPayment).await;

            let action = engine.advance(&mut session, EngineEvent::Affirmative).await;

            assert_eq!(session.step(), Step::ConfirmPayment);
            assert!(matches!(action, Action::SendText(text) if text.contains("couldn't generate")));
        }
    }

    mod invariants {
        use super::*;

        #[tokio::test]
        async fn step_is_always_one_of_the_defined_states() {
            let engine = happy_engine();
            let mut session = session();

            let events = [
                EngineEvent::Other,
                EngineEvent::PhotoReceived(vec![1]),
                EngineEvent::Affirmative,
                EngineEvent::Negative,
            ];
            for _ in 0..20 {
                for event in &events {
                    engine.advance(&mut session, event.clone()).await;
                    assert!(Step::all().contains(&session.step()));
                }
            }
        }

        #[tokio::test]
        async fn missing_fields_at_payment_recovers_to_start() {
            let engine = happy_engine();
            let mut session = session();
            // Force the step without extracted data.
            session.set_step(Step::ConfirmPayment);

            let action = engine.advance(&mut session, EngineEvent::Affirmative).await;

            assert_eq!(session.step(), Step::AwaitPassportPhoto);
            assert!(matches!(action, Action::SendText(_)));
        }
    }
}
