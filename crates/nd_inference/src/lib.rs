use std::fmt;

pub mod models;

pub use models::create_model;
pub use nd_core::LanguageModel;

pub const DEFAULT_TEMPERATURE: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Provider {
    /// Google Gemini generateContent API
    #[default]
    Gemini,
    /// Any OpenAI compatible chat completions endpoint
    #[value(name = "openai")]
    OpenAi,
    /// Offline model echoing its prompt back
    Echo,
}

#[derive(Clone)]
pub struct ModelConfig {
    pub provider: Provider,
    pub api_key: Option<String>,
    pub model_name: Option<String>,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            api_key: None,
            model_name: None,
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("provider", &self.provider)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

pub mod prelude {
    pub use super::models::create_model;
    pub use super::{ModelConfig, Provider};
    pub use nd_core::{Error, LanguageModel, Result};
}
