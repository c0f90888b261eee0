use async_trait::async_trait;
use nd_core::{Error, LanguageModel, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use super::{provider_error, require_api_key};
use crate::ModelConfig;

pub const DEFAULT_MODEL: &str = "deepseek-chat";
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com/v1";

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

fn reply_text(model_name: &str, response: ChatResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::Inference(format!("{} returned no choices", model_name)))?;
    Ok(choice.message.content.unwrap_or_default())
}

/// Client for OpenAI style `/chat/completions` endpoints (DeepSeek, OpenAI,
/// Ollama's compatibility layer).
pub struct ChatCompletionsModel {
    client: Client,
    api_key: String,
    base_url: String,
    model_name: String,
    temperature: f32,
}

impl ChatCompletionsModel {
    pub fn new(config: &ModelConfig) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            api_key: require_api_key(config)?,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model_name: config
                .model_name
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
        })
    }
}

impl fmt::Debug for ChatCompletionsModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatCompletionsModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model_name", &self.model_name)
            .finish()
    }
}

#[async_trait]
impl LanguageModel for ChatCompletionsModel {
    fn name(&self) -> &str {
        &self.model_name
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.model_name,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: self.temperature,
        };
        debug!("🤖 Sending {} byte prompt to {}", user.len(), self.model_name);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url.trim_end_matches('/')))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(provider_error(status, &body));
        }

        reply_text(&self.model_name, serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            temperature: 0.5,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "usr");
        assert_eq!(value["temperature"], 0.5);
    }

    #[test]
    fn test_reply_text() {
        let parse = |body: &str| serde_json::from_str::<ChatResponse>(body).unwrap();

        let reply = parse(r#"{"choices":[{"message":{"role":"assistant","content":"Briefing"}}]}"#);
        assert_eq!(reply_text("m", reply).unwrap(), "Briefing");

        let empty = parse(r#"{"choices":[{"message":{"role":"assistant","content":""}}]}"#);
        assert_eq!(reply_text("m", empty).unwrap(), "");

        let none = parse(r#"{"choices":[]}"#);
        assert!(matches!(reply_text("m", none), Err(Error::Inference(_))));
    }

    #[test]
    fn test_defaults() {
        let model = ChatCompletionsModel::new(&ModelConfig {
            api_key: Some("key".to_string()),
            ..ModelConfig::default()
        })
        .unwrap();
        assert_eq!(model.name(), DEFAULT_MODEL);
        assert_eq!(model.base_url, DEFAULT_BASE_URL);
    }
}
