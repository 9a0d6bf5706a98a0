//! Mindee Recognition - OCR via Mindee custom endpoints.
//!
//! Posts the document image to the account's custom products
//! (`passport` and `vehicle_id`) and parses the prediction payload of the
//! response into the typed field records.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use tracing::debug;

use crate::domain::documents::{PassportFields, VehicleFields};
use crate::ports::{ExtractionError, RecognitionService};

const PASSPORT_PRODUCT: &str = "passport";
const VEHICLE_PRODUCT: &str = "vehicle_id";

/// Configuration for the Mindee client.
#[derive(Debug, Clone)]
pub struct MindeeConfig {
    api_key: Secret<String>,
    /// Account owning the custom endpoints.
    pub account: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl MindeeConfig {
    /// Creates a configuration with the given API key and account.
    pub fn new(api_key: impl Into<String>, account: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            account: account.into(),
            base_url: "https://api.mindee.net/v1".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Mindee OCR implementation of [`RecognitionService`].
pub struct MindeeRecognition {
    config: MindeeConfig,
    client: Client,
}

impl MindeeRecognition {
    /// Creates a new client with the given configuration.
    pub fn new(config: MindeeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn predict_url(&self, product: &str) -> String {
        format!(
            "{}/products/{}/{}/v1/predict",
            self.config.base_url, self.config.account, product
        )
    }

    /// Posts the image and returns the raw prediction payload.
    async fn predict(
        &self,
        product: &str,
        image: &[u8],
        filename: &str,
    ) -> Result<serde_json::Value, ExtractionError> {
        let form = Form::new().part(
            "document",
            Part::bytes(image.to_vec()).file_name(filename.to_string()),
        );

        let response = self
            .client
            .post(self.predict_url(product))
            .header(
                "Authorization",
                format!("Token {}", self.config.api_key()),
            )
            .multipart(form)
            .send()
            .await
            .map_err(|e| ExtractionError::Unavailable(e.to_string()))?;

        let status = response.status();
        debug!(product = product, status = %status, "mindee prediction response");

        if status.is_client_error() && status != StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Unreadable(body));
        }
        if !status.is_success() {
            return Err(ExtractionError::Unavailable(format!("status {}", status)));
        }

        let envelope: PredictResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))?;

        Ok(envelope.document.inference.prediction)
    }
}

#[async_trait]
impl RecognitionService for MindeeRecognition {
    async fn extract_passport(&self, image: &[u8]) -> Result<PassportFields, ExtractionError> {
        let prediction = self.predict(PASSPORT_PRODUCT, image, "passport.jpg").await?;
        serde_json::from_value(prediction)
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))
    }

    async fn extract_vehicle(&self, image: &[u8]) -> Result<VehicleFields, ExtractionError> {
        let prediction = self.predict(VEHICLE_PRODUCT, image, "vehicle_id.jpg").await?;
        serde_json::from_value(prediction)
            .map_err(|e| ExtractionError::MalformedResponse(e.to_string()))
    }
}

/// Response envelope for the predict endpoint.
#[derive(Debug, Deserialize)]
struct PredictResponse {
    document: DocumentEnvelope,
}

#[derive(Debug, Deserialize)]
struct DocumentEnvelope {
    inference: InferenceEnvelope,
}

#[derive(Debug, Deserialize)]
struct InferenceEnvelope {
    prediction: serde_json::Value,
}
