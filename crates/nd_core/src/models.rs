use async_trait::async_trait;
use std::fmt;
use crate::Result;

#[async_trait]
pub trait LanguageModel: Send + Sync + fmt::Debug {
    /// Human readable name of the backing model
    fn name(&self) -> &str;

    /// Runs one blocking completion for a system instruction and a user message
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}
