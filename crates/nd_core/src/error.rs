use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Feed error: {0}")]
    Feed(String),

    #[error("Scraping error: {0}")]
    Scraping(String),

    #[error("Inference error: {0}")]
    Inference(String),

    /// A model provider rejected the request. `code` is the HTTP status and
    /// `status` the provider's own status string, e.g. `RESOURCE_EXHAUSTED`.
    #[error("Provider error {code} {status}: {message}")]
    Provider {
        code: u16,
        status: String,
        message: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn failure_class(&self) -> FailureClass {
        FailureClass::classify(&self.to_string())
    }
}

/// Coarse classification of a failed run, used to pick a remediation hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    QuotaExceeded,
    ModelUnavailable,
    Other,
}

impl FailureClass {
    /// Classifies by substring, the same way for every provider.
    pub fn classify(message: &str) -> Self {
        if message.contains("429") || message.contains("RESOURCE_EXHAUSTED") {
            FailureClass::QuotaExceeded
        } else if message.contains("404") || message.contains("NOT_FOUND") {
            FailureClass::ModelUnavailable
        } else {
            FailureClass::Other
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            FailureClass::QuotaExceeded => "Quota exceeded! Wait 1-2 minutes and try again.",
            FailureClass::ModelUnavailable => {
                "Model not found. Check that your API key has access to the configured model."
            }
            FailureClass::Other => "Check your API key and internet connection.",
        }
    }
}

impl fmt::Display for FailureClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FailureClass::QuotaExceeded => "quota exceeded",
            FailureClass::ModelUnavailable => "model unavailable",
            FailureClass::Other => "other",
        };
        f.write_str(label)
    }
}
