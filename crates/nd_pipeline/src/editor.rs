use async_trait::async_trait;
use nd_core::{LanguageModel, NewsState, Result, Stage, Topic};
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::pipeline::StageRunner;

pub const EDITOR_INSTRUCTION: &str = "You are a Chief News Editor.
Create a concise, well-structured DAILY NEWS BRIEFING from the analyses provided.
Format it clearly with sections, key highlights, and an overall summary.
Make it professional and easy to read.";

/// Composes the daily briefing out of the four topic analyses.
pub struct Editor {
    model: Arc<dyn LanguageModel>,
}

impl fmt::Debug for Editor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Editor")
            .field("model", &self.model.name())
            .finish()
    }
}

impl Editor {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub fn user_message(state: &NewsState) -> String {
        let mut message = String::from("\n");
        for topic in Topic::ALL {
            message.push_str(&format!("{}: {}\n", topic.heading(), state.analysis(topic)));
        }
        message.push_str("Create a unified daily news briefing.");
        message
    }

    pub async fn compose(&self, state: &NewsState) -> Result<NewsState> {
        info!("📋 Asking {} for the daily briefing", self.model.name());
        let summary = self
            .model
            .complete(EDITOR_INSTRUCTION, &Self::user_message(state))
            .await?;
        info!("✨ Briefing ready ({} bytes)", summary.len());
        Ok(state.with_summary(summary))
    }
}

#[async_trait]
impl StageRunner for Editor {
    fn stage(&self) -> Stage {
        Stage::Summarize
    }

    async fn run(&self, state: &NewsState) -> Result<NewsState> {
        self.compose(state).await
    }
}
