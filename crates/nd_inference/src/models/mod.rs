use nd_core::{Error, LanguageModel, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

use crate::{ModelConfig, Provider};

pub mod chat;
pub mod echo;
pub mod gemini;

pub use chat::ChatCompletionsModel;
pub use echo::EchoModel;
pub use gemini::GeminiModel;

pub fn create_model(config: &ModelConfig) -> Result<Arc<dyn LanguageModel>> {
    let model: Arc<dyn LanguageModel> = match config.provider {
        Provider::Gemini => Arc::new(GeminiModel::new(config)?),
        Provider::OpenAi => Arc::new(ChatCompletionsModel::new(config)?),
        Provider::Echo => Arc::new(EchoModel::new()),
    };
    Ok(model)
}

pub(crate) fn require_api_key(config: &ModelConfig) -> Result<String> {
    config
        .api_key
        .clone()
        .filter(|key| !key.trim().is_empty())
        .ok_or_else(|| Error::Config(format!("{:?} provider needs an API key", config.provider)))
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

/// Builds an [`Error::Provider`] from a non-success response.
///
/// Understands both the Google (`status`) and OpenAI (`type`) error bodies and
/// falls back to the HTTP reason phrase for anything else.
pub(crate) fn provider_error(status: StatusCode, body: &str) -> Error {
    let reason = status.canonical_reason().unwrap_or("Unknown").to_string();
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => Error::Provider {
            code: status.as_u16(),
            status: envelope.error.status.or(envelope.error.kind).unwrap_or(reason),
            message: envelope.error.message,
        },
        Err(_) => Error::Provider {
            code: status.as_u16(),
            status: reason,
            message: body.trim().to_string(),
        },
    }
}
