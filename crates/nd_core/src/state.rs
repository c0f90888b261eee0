use serde::{Deserialize, Serialize};
use crate::Topic;

/// The record threaded through every stage of a run.
///
/// Stages never mutate a state they were handed. The `with_*` builders return
/// a copy carrying one more populated field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsState {
    pub newspaper_url: String,
    pub raw_articles: String,
    pub sports_analysis: String,
    pub politics_analysis: String,
    pub entertainment_analysis: String,
    pub technology_analysis: String,
    pub summary: String,
}

impl NewsState {
    pub fn new(newspaper_url: impl Into<String>) -> Self {
        Self {
            newspaper_url: newspaper_url.into(),
            ..Self::default()
        }
    }

    pub fn analysis(&self, topic: Topic) -> &str {
        match topic {
            Topic::Sports => &self.sports_analysis,
            Topic::Politics => &self.politics_analysis,
            Topic::Entertainment => &self.entertainment_analysis,
            Topic::Technology => &self.technology_analysis,
        }
    }

    pub fn with_raw_articles(&self, raw_articles: impl Into<String>) -> Self {
        Self {
            raw_articles: raw_articles.into(),
            ..self.clone()
        }
    }

    pub fn with_analysis(&self, topic: Topic, text: impl Into<String>) -> Self {
        let mut next = self.clone();
        let text = text.into();
        match topic {
            Topic::Sports => next.sports_analysis = text,
            Topic::Politics => next.politics_analysis = text,
            Topic::Entertainment => next.entertainment_analysis = text,
            Topic::Technology => next.technology_analysis = text,
        }
        next
    }

    pub fn with_summary(&self, summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..self.clone()
        }
    }

    /// True once every text field has been produced.
    pub fn is_complete(&self) -> bool {
        !self.raw_articles.is_empty()
            && Topic::ALL.iter().all(|t| !self.analysis(*t).is_empty())
            && !self.summary.is_empty()
    }
}
