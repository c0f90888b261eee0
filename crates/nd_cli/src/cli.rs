use clap::{Parser, Subcommand, ValueEnum};
use futures_util::StreamExt;
use nd_core::{Error, NewsState, Stage};
use nd_fetch::Fetcher;
use nd_inference::{create_model, ModelConfig, Provider, DEFAULT_TEMPERATURE};
use nd_pipeline::{Pipeline, Throttle};
use std::pin::pin;
use std::process::ExitCode;
use tracing::{error, info};

use crate::duration::HumanDuration;
use crate::presets::{default_preset, find_preset, PRESETS};
use crate::render::{format_results, print_failure, RunReport, StatusBoard};

#[derive(Parser, Debug)]
#[command(
    name = "newsdesk",
    author,
    version,
    about = "Topic by topic news analysis and a daily briefing from any RSS feed",
    long_about = None
)]
pub struct Cli {
    /// Model provider used by the analysts and the editor
    #[arg(long, value_enum, default_value_t = Provider::Gemini, global = true)]
    pub provider: Provider,
    /// Provider credential, GEMINI_API_KEY is used when unset
    #[arg(long, env = "NEWSDESK_API_KEY", hide_env_values = true, global = true)]
    pub api_key: Option<String>,
    #[arg(long, global = true)]
    pub model_name: Option<String>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[arg(long, default_value_t = DEFAULT_TEMPERATURE, global = true)]
    pub temperature: f32,
    /// Pause before each model call (e.g. 10s, 1m30s, 0)
    #[arg(long, default_value = "10s", global = true)]
    pub delay: HumanDuration,
    #[arg(short, long, global = true)]
    pub verbose: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the whole pipeline against a feed
    Run {
        /// Feed or page URL; defaults to the first preset
        url: Option<String>,
        /// Use a bundled feed instead of a URL (see `presets`)
        #[arg(long, conflicts_with = "url")]
        preset: Option<String>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Also print the scraped article text
        #[arg(long)]
        show_raw: bool,
    },
    /// Only run the scraper and print the article text
    Fetch { url: String },
    /// List the bundled feeds
    Presets,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn model_config(&self) -> ModelConfig {
        ModelConfig {
            provider: self.provider,
            api_key: self
                .api_key
                .clone()
                .or_else(|| std::env::var("GEMINI_API_KEY").ok()),
            model_name: self.model_name.clone(),
            base_url: self.base_url.clone(),
            temperature: self.temperature,
        }
    }
}

fn resolve_url(url: Option<String>, preset: Option<String>) -> anyhow::Result<String> {
    if let Some(key) = preset {
        let preset = find_preset(&key).ok_or_else(|| {
            Error::Config(format!("Unknown preset '{}', see `newsdesk presets`", key))
        })?;
        return Ok(preset.url.to_string());
    }
    match url.map(|u| u.trim().to_string()) {
        Some(url) if url.is_empty() => Err(Error::Config("Feed URL is empty".to_string()).into()),
        Some(url) => Ok(url),
        None => Ok(default_preset().url.to_string()),
    }
}

pub async fn handle_command(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = cli.model_config();
    let throttle = Throttle::new(cli.delay.0);

    match cli.command {
        Commands::Run {
            url,
            preset,
            format,
            show_raw,
        } => {
            let url = resolve_url(url, preset)?;
            let model = create_model(&config)?;
            info!("🧠 Model initialized (using {})", model.name());
            let pipeline = Pipeline::new(Fetcher::http()?, model).with_throttle(throttle);

            let Some(state) = run_pipeline(&pipeline, &url).await else {
                return Ok(ExitCode::FAILURE);
            };
            let report = RunReport::new(pipeline.model_name(), state);
            match format {
                OutputFormat::Text => println!("{}", format_results(&report, show_raw)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            }
        }
        Commands::Fetch { url } => {
            let fetcher = Fetcher::http()?;
            println!("{}", fetcher.fetch(&url).await);
        }
        Commands::Presets => {
            for preset in PRESETS {
                println!("{:<16} {:<18} {}", preset.key, preset.name, preset.url);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Drives the event stream, keeping the status board in step with it.
/// A failed run is reported here and yields `None`.
async fn run_pipeline(pipeline: &Pipeline, url: &str) -> Option<NewsState> {
    info!("📡 Running {} stages against {}", Stage::ALL.len(), url);
    let mut board = StatusBoard::new();
    board.start(Stage::Scrape);
    board.print(Stage::Scrape);

    let mut events = pin!(pipeline.stream(url));
    let mut state = NewsState::new(url);
    while let Some(event) = events.next().await {
        match event {
            Ok(event) => {
                let next = board.complete(event.stage);
                board.print(event.stage);
                if let Some(next) = next {
                    board.print(next);
                }
                state = event.state;
            }
            Err(e) => {
                if let Some(stage) = board.fail() {
                    board.print(stage);
                    error!("💥 {} failed: {}", stage, e);
                }
                print_failure(&e);
                return None;
            }
        }
    }

    eprintln!("✅ All agents completed successfully!");
    Some(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nd_core::LanguageModel;
    use nd_fetch::PageSource;
    use nd_inference::models::EchoModel;
    use std::sync::Arc;

    struct HeadlineSource;

    #[async_trait]
    impl PageSource for HeadlineSource {
        async fn fetch_feed(&self, _url: &str) -> nd_core::Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn fetch_html(&self, _url: &str) -> nd_core::Result<String> {
            Ok("<h1>Headline</h1>".to_string())
        }
    }

    #[derive(Debug)]
    struct ExhaustedModel;

    #[async_trait]
    impl LanguageModel for ExhaustedModel {
        fn name(&self) -> &str {
            "exhausted"
        }

        async fn complete(&self, _system: &str, _user: &str) -> nd_core::Result<String> {
            Err(Error::Provider {
                code: 429,
                status: "RESOURCE_EXHAUSTED".to_string(),
                message: "quota".to_string(),
            })
        }
    }

    fn offline_pipeline(model: Arc<dyn LanguageModel>) -> Pipeline {
        Pipeline::new(Fetcher::new(Arc::new(HeadlineSource)), model).with_throttle(Throttle::none())
    }

    #[tokio::test]
    async fn test_run_pipeline_reports_failure_once() {
        let pipeline = offline_pipeline(Arc::new(ExhaustedModel));
        assert!(run_pipeline(&pipeline, "https://example.com").await.is_none());
    }

    #[tokio::test]
    async fn test_run_pipeline_returns_final_state() {
        let pipeline = offline_pipeline(Arc::new(EchoModel::new()));
        let state = run_pipeline(&pipeline, "https://example.com").await.unwrap();
        assert_eq!(state.raw_articles, "Headline");
        assert!(state.is_complete());
    }

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "newsdesk",
            "--provider",
            "echo",
            "--delay",
            "0",
            "run",
            "--preset",
            "bbc-sport",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.provider, Provider::Echo);
        assert_eq!(cli.delay.0.as_secs(), 0);
        match cli.command {
            Commands::Run { preset, format, .. } => {
                assert_eq!(preset.as_deref(), Some("bbc-sport"));
                assert_eq!(format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["newsdesk", "run", "https://example.com/rss.xml"]).unwrap();
        assert_eq!(cli.provider, Provider::Gemini);
        assert_eq!(cli.delay.0.as_secs(), 10);
        assert!((cli.temperature - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_url_and_preset_conflict() {
        let parsed = Cli::try_parse_from([
            "newsdesk",
            "run",
            "https://example.com",
            "--preset",
            "bbc-world",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url(None, Some("bbc-technology".to_string())).unwrap(),
            "https://feeds.bbci.co.uk/news/technology/rss.xml"
        );
        assert_eq!(
            resolve_url(Some(" https://example.com ".to_string()), None).unwrap(),
            "https://example.com"
        );
        assert_eq!(resolve_url(None, None).unwrap(), default_preset().url);
        assert!(resolve_url(Some("  ".to_string()), None).is_err());
        assert!(resolve_url(None, Some("nope".to_string())).is_err());
    }
}
