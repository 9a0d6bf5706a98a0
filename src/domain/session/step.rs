//! Conversation step state machine.
//!
//! Defines the steps of the insurance purchase flow and the transitions the
//! conversation engine is allowed to make between them.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::StateMachine;

/// The current step of a session's conversation.
///
/// `Start` is the sole initial step. Every terminal action (policy delivered
/// or payment declined) returns the session to `Start` - sessions are never
/// deleted, only reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Nothing collected yet; the next message triggers the welcome.
    #[default]
    Start,

    /// Waiting for a passport photo.
    AwaitPassportPhoto,

    /// Passport extracted, waiting for a Yes/No on the passport summary.
    ConfirmPassport,

    /// Waiting for a vehicle ID photo.
    AwaitVehiclePhoto,

    /// Vehicle ID extracted, waiting for a Yes/No on the vehicle summary.
    ConfirmVehicle,

    /// Waiting for a Yes/No on the combined summary.
    ConfirmSummary,

    /// Waiting for a Yes/No on the fixed price.
    ConfirmPayment,
}

impl Step {
    /// Returns true if this step strictly requires a photo.
    pub fn expects_photo(&self) -> bool {
        matches!(self, Self::AwaitPassportPhoto | Self::AwaitVehiclePhoto)
    }

    /// Returns true if this step expects a Yes/No answer.
    pub fn expects_confirmation(&self) -> bool {
        matches!(
            self,
            Self::ConfirmPassport | Self::ConfirmVehicle | Self::ConfirmSummary | Self::ConfirmPayment
        )
    }

    /// Returns true if a free-form question may be diverted to the assistant
    /// at this step instead of being handled by the conversation engine.
    ///
    /// Photo steps strictly require a photo, so they never divert.
    pub fn allows_free_form(&self) -> bool {
        !self.expects_photo()
    }

    /// All seven steps, in flow order.
    pub fn all() -> [Step; 7] {
        [
            Step::Start,
            Step::AwaitPassportPhoto,
            Step::ConfirmPassport,
            Step::AwaitVehiclePhoto,
            Step::ConfirmVehicle,
            Step::ConfirmSummary,
            Step::ConfirmPayment,
        ]
    }
}

impl StateMachine for Step {
    fn can_transition_to(&self, target: &Self) -> bool {
        use Step::*;
        matches!(
            (self, target),
            // First contact
            (Start, AwaitPassportPhoto) |
            // Passport extracted
            (AwaitPassportPhoto, ConfirmPassport) |
            // Passport accepted / rejected
            (ConfirmPassport, AwaitVehiclePhoto) |
            (ConfirmPassport, AwaitPassportPhoto) |
            // Vehicle extracted
            (AwaitVehiclePhoto, ConfirmVehicle) |
            // Vehicle accepted / rejected
            (ConfirmVehicle, ConfirmSummary) |
            (ConfirmVehicle, AwaitVehiclePhoto) |
            // Summary accepted / rejected (rejection restarts collection)
            (ConfirmSummary, ConfirmPayment) |
            (ConfirmSummary, AwaitPassportPhoto) |
            // Payment confirmed or declined ends the conversation
            (ConfirmPayment, Start)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use Step::*;
        match self {
            Start => vec![AwaitPassportPhoto],
            AwaitPassportPhoto => vec![ConfirmPassport],
            ConfirmPassport => vec![AwaitVehiclePhoto, AwaitPassportPhoto],
            AwaitVehiclePhoto => vec![ConfirmVehicle],
            ConfirmVehicle => vec![ConfirmSummary, AwaitVehiclePhoto],
            ConfirmSummary => vec![ConfirmPayment, AwaitPassportPhoto],
            ConfirmPayment => vec![Start],
        }
    }
}
