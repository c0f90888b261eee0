use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Sports,
    Politics,
    Entertainment,
    Technology,
}

const SPORTS_INSTRUCTION: &str = "You are a Sports News Analyst.
Extract and analyze ONLY sports-related news. Provide:
1. Key sports stories found
2. Teams/players mentioned
3. Match results or upcoming events
4. Your analysis of the sports coverage
If no sports news found, state that clearly.";

const POLITICS_INSTRUCTION: &str = "You are a Political News Analyst.
Extract and analyze ONLY politics-related news. Provide:
1. Key political stories and events
2. Politicians, parties, or governments mentioned
3. Policy changes or decisions
4. Your analysis of the political landscape
If no political news found, state that clearly.";

const ENTERTAINMENT_INSTRUCTION: &str = "You are an Entertainment News Analyst.
Extract and analyze ONLY entertainment-related news. Provide:
1. Celebrity news
2. Movies, TV shows, or music mentioned
3. Awards, events, or launches
4. Your analysis of entertainment coverage
If no entertainment news found, state that clearly.";

const TECHNOLOGY_INSTRUCTION: &str = "You are a Technology News Analyst.
Extract and analyze ONLY technology-related news. Provide:
1. Key tech stories (AI, gadgets, companies)
2. Companies or products mentioned
3. Innovations or breakthroughs
4. Your analysis of the tech news landscape
If no tech news found, state that clearly.";

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Sports,
        Topic::Politics,
        Topic::Entertainment,
        Topic::Technology,
    ];

    /// System instruction sent to the model for this topic
    pub fn instruction(&self) -> &'static str {
        match self {
            Topic::Sports => SPORTS_INSTRUCTION,
            Topic::Politics => POLITICS_INSTRUCTION,
            Topic::Entertainment => ENTERTAINMENT_INSTRUCTION,
            Topic::Technology => TECHNOLOGY_INSTRUCTION,
        }
    }

    /// Heading used when the analyses are handed to the editor
    pub fn heading(&self) -> &'static str {
        match self {
            Topic::Sports => "⚽ SPORTS",
            Topic::Politics => "🏛️ POLITICS",
            Topic::Entertainment => "🎬 ENTERTAINMENT",
            Topic::Technology => "💻 TECHNOLOGY",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Topic::Sports => "⚽ Sports Analysis",
            Topic::Politics => "🏛️ Politics Analysis",
            Topic::Entertainment => "🎬 Entertainment Analysis",
            Topic::Technology => "💻 Technology Analysis",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topic::Sports => "sports",
            Topic::Politics => "politics",
            Topic::Entertainment => "entertainment",
            Topic::Technology => "technology",
        };
        f.write_str(name)
    }
}
