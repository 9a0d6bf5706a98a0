//! Policybot entrypoint.
//!
//! Loads configuration from the environment, wires the adapters into the
//! conversation engine and dispatcher, and runs the Telegram polling loop.

use std::process::ExitCode;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use policybot::adapters::assistant::{MistralAssistant, MistralConfig};
use policybot::adapters::recognition::{MindeeConfig, MindeeRecognition};
use policybot::adapters::renderer::PdfPolicyRenderer;
use policybot::adapters::telegram::TelegramTransport;
use policybot::application::{Dispatcher, SessionRegistry};
use policybot::config::AppConfig;
use policybot::domain::conversation::ConversationEngine;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.validate() {
        error!(error = %err, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let recognition = Arc::new(MindeeRecognition::new(
        MindeeConfig::new(&config.recognition.api_key, &config.recognition.account)
            .with_base_url(&config.recognition.base_url)
            .with_timeout(config.recognition.timeout()),
    ));
    let assistant = Arc::new(MistralAssistant::new(
        MistralConfig::new(&config.assistant.api_key)
            .with_model(&config.assistant.model)
            .with_base_url(&config.assistant.base_url),
    ));
    let renderer = Arc::new(PdfPolicyRenderer::new(config.policy.price_usd));
    let transport = Arc::new(TelegramTransport::new(&config.telegram.bot_token));

    let engine = ConversationEngine::new(recognition, renderer, config.policy.price_usd);
    let dispatcher = Arc::new(Dispatcher::new(
        SessionRegistry::new(),
        engine,
        assistant,
        transport.clone(),
    ));

    info!(price_usd = config.policy.price_usd, "policybot starting");
    transport.run(dispatcher).await;

    ExitCode::SUCCESS
}
