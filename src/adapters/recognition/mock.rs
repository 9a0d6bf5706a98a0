//! Mock recognition service for tests and development.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::domain::documents::{PassportFields, VehicleFields};
use crate::ports::{ExtractionError, RecognitionService};

/// Scriptable [`RecognitionService`]: returns configured field records or a
/// configured failure, and counts extraction calls.
#[derive(Debug, Default)]
pub struct MockRecognition {
    passport: Option<PassportFields>,
    vehicle: Option<VehicleFields>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockRecognition {
    /// Mock returning default (all-empty) records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mock failing every extraction with an unreadable-document error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Sets the passport record to return.
    pub fn with_passport(mut self, fields: PassportFields) -> Self {
        self.passport = Some(fields);
        self
    }

    /// Sets the vehicle record to return.
    pub fn with_vehicle(mut self, fields: VehicleFields) -> Self {
        self.vehicle = Some(fields);
        self
    }

    /// Number of extraction calls made so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecognitionService for MockRecognition {
    async fn extract_passport(&self, _image: &[u8]) -> Result<PassportFields, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ExtractionError::Unreadable("mock failure".to_string()));
        }
        Ok(self.passport.clone().unwrap_or_default())
    }

    async fn extract_vehicle(&self, _image: &[u8]) -> Result<VehicleFields, ExtractionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ExtractionError::Unreadable("mock failure".to_string()));
        }
        Ok(self.vehicle.clone().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_configured_passport() {
        let mock = MockRecognition::new().with_passport(PassportFields {
            surname: "Shevchenko".into(),
            ..Default::default()
        });

        let fields = mock.extract_passport(&[1, 2]).await.unwrap();

        assert_eq!(fields.surname.text(), Some("Shevchenko"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn failing_mock_fails_both_extractions() {
        let mock = MockRecognition::failing();
        assert!(mock.extract_passport(&[]).await.is_err());
        assert!(mock.extract_vehicle(&[]).await.is_err());
    }
}
