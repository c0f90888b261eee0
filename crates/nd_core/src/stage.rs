use serde::{Deserialize, Serialize};
use std::fmt;
use crate::Topic;

/// One node of the fixed pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Scrape,
    Sports,
    Politics,
    Entertainment,
    Technology,
    Summarize,
}

impl Stage {
    /// Firing order.
    pub const ALL: [Stage; 6] = [
        Stage::Scrape,
        Stage::Sports,
        Stage::Politics,
        Stage::Entertainment,
        Stage::Technology,
        Stage::Summarize,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Scrape => "scrape",
            Stage::Sports => "sports",
            Stage::Politics => "politics",
            Stage::Entertainment => "entertainment",
            Stage::Technology => "technology",
            Stage::Summarize => "summarize",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Scrape => "🔍 Scraper",
            Stage::Sports => "⚽ Sports Agent",
            Stage::Politics => "🏛️ Politics Agent",
            Stage::Entertainment => "🎬 Entertainment Agent",
            Stage::Technology => "💻 Technology Agent",
            Stage::Summarize => "📋 Summary Editor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Stage::Scrape => "Fetching articles from RSS feed...",
            Stage::Sports => "Analyzing sports news...",
            Stage::Politics => "Analyzing political news...",
            Stage::Entertainment => "Analyzing entertainment news...",
            Stage::Technology => "Analyzing technology news...",
            Stage::Summarize => "Creating daily briefing...",
        }
    }

    pub fn topic(&self) -> Option<Topic> {
        match self {
            Stage::Sports => Some(Topic::Sports),
            Stage::Politics => Some(Topic::Politics),
            Stage::Entertainment => Some(Topic::Entertainment),
            Stage::Technology => Some(Topic::Technology),
            Stage::Scrape | Stage::Summarize => None,
        }
    }

    pub fn calls_model(&self) -> bool {
        !matches!(self, Stage::Scrape)
    }

    pub fn position(&self) -> usize {
        Stage::ALL.iter().position(|s| s == self).unwrap_or_default()
    }

    /// The stage that fires after this one, `None` for the last.
    pub fn next(&self) -> Option<Stage> {
        Stage::ALL.get(self.position() + 1).copied()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
