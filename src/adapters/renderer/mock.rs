//! Mock renderer for tests.

use async_trait::async_trait;

use crate::domain::documents::{PassportFields, VehicleFields};
use crate::ports::{DocumentRenderer, RenderError};

/// Scriptable [`DocumentRenderer`]: returns fixed bytes or fails.
#[derive(Debug)]
pub struct MockRenderer {
    result: Option<Vec<u8>>,
}

impl MockRenderer {
    /// Mock returning the given bytes.
    pub fn succeeding(bytes: Vec<u8>) -> Self {
        Self { result: Some(bytes) }
    }

    /// Mock failing every render.
    pub fn failing() -> Self {
        Self { result: None }
    }
}

#[async_trait]
impl DocumentRenderer for MockRenderer {
    async fn render_policy(
        &self,
        _passport: &PassportFields,
        _vehicle: &VehicleFields,
    ) -> Result<Vec<u8>, RenderError> {
        self.result
            .clone()
            .ok_or_else(|| RenderError::Failed("mock failure".to_string()))
    }
}
