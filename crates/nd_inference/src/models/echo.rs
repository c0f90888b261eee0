use async_trait::async_trait;
use nd_core::{LanguageModel, Result};

/// Answers every request with the prompt it was given.
///
/// Useful for dry runs of the whole pipeline without a provider account.
#[derive(Debug, Clone, Default)]
pub struct EchoModel;

impl EchoModel {
    pub fn new() -> Self {
        Self
    }

    pub fn echo(system: &str, user: &str) -> String {
        format!("{}\n\n{}", system, user)
    }
}

#[async_trait]
impl LanguageModel for EchoModel {
    fn name(&self) -> &str {
        "echo"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        Ok(Self::echo(system, user))
    }
}
