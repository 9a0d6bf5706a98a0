//! Per-user session state.

use serde::{Deserialize, Serialize};

use crate::domain::documents::{PassportFields, VehicleFields};
use crate::domain::foundation::UserId;

use super::Step;

/// Conversation state tracked for one user.
///
/// Created lazily on first contact and never deleted; a finished or abandoned
/// flow resets the step back to [`Step::Start`]. Extracted field records are
/// written only by a successful extraction call, never partially.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    user_id: UserId,
    step: Step,
    passport: Option<PassportFields>,
    vehicle: Option<VehicleFields>,
}

impl Session {
    /// Creates a fresh session at the initial step.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            step: Step::Start,
            passport: None,
            vehicle: None,
        }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Moves the session to a new step.
    ///
    /// Only the conversation engine calls this; it owns the transition table.
    pub(crate) fn set_step(&mut self, step: Step) {
        self.step = step;
    }

    pub fn passport(&self) -> Option<&PassportFields> {
        self.passport.as_ref()
    }

    pub fn vehicle(&self) -> Option<&VehicleFields> {
        self.vehicle.as_ref()
    }

    /// Stores a successfully extracted passport record.
    pub(crate) fn set_passport(&mut self, fields: PassportFields) {
        self.passport = Some(fields);
    }

    /// Stores a successfully extracted vehicle record.
    pub(crate) fn set_vehicle(&mut self, fields: VehicleFields) {
        self.vehicle = Some(fields);
    }

    /// Returns the session to the initial step and clears extracted data.
    ///
    /// This is the modeled "end of conversation" - the session itself lives on.
    pub fn reset(&mut self) {
        self.step = Step::Start;
        self.passport = None;
        self.vehicle = None;
    }
}
