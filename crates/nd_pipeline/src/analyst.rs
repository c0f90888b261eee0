use async_trait::async_trait;
use nd_core::{LanguageModel, NewsState, Result, Stage, Topic};
use std::fmt;
use std::sync::Arc;
use tracing::info;

use crate::pipeline::StageRunner;

/// Reads the raw articles and writes one topic's analysis.
pub struct TopicAnalyst {
    topic: Topic,
    model: Arc<dyn LanguageModel>,
}

impl fmt::Debug for TopicAnalyst {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TopicAnalyst")
            .field("topic", &self.topic)
            .field("model", &self.model.name())
            .finish()
    }
}

impl TopicAnalyst {
    pub fn new(topic: Topic, model: Arc<dyn LanguageModel>) -> Self {
        Self { topic, model }
    }

    pub fn topic(&self) -> Topic {
        self.topic
    }

    pub fn user_message(raw_articles: &str) -> String {
        format!("Here are today's newspaper articles:\n\n{}", raw_articles)
    }

    pub async fn analyze(&self, state: &NewsState) -> Result<NewsState> {
        info!("🤖 Asking {} for {} analysis", self.model.name(), self.topic);
        let analysis = self
            .model
            .complete(self.topic.instruction(), &Self::user_message(&state.raw_articles))
            .await?;
        info!("✨ {} analysis ready ({} bytes)", self.topic, analysis.len());
        Ok(state.with_analysis(self.topic, analysis))
    }
}

#[async_trait]
impl StageRunner for TopicAnalyst {
    fn stage(&self) -> Stage {
        match self.topic {
            Topic::Sports => Stage::Sports,
            Topic::Politics => Stage::Politics,
            Topic::Entertainment => Stage::Entertainment,
            Topic::Technology => Stage::Technology,
        }
    }

    async fn run(&self, state: &NewsState) -> Result<NewsState> {
        self.analyze(state).await
    }
}
