use async_trait::async_trait;
use futures_util::stream::{self, Stream, TryStreamExt};
use nd_core::{LanguageModel, NewsState, Result, Stage, Topic};
use nd_fetch::Fetcher;
use std::fmt;
use std::pin::pin;
use std::sync::Arc;
use tracing::{info, info_span, Instrument};

use crate::analyst::TopicAnalyst;
use crate::editor::Editor;
use crate::throttle::Throttle;

/// One step of the pipeline: takes the current state and returns a new one.
#[async_trait]
pub trait StageRunner: Send + Sync {
    fn stage(&self) -> Stage;

    async fn run(&self, state: &NewsState) -> Result<NewsState>;
}

#[async_trait]
impl StageRunner for Fetcher {
    fn stage(&self) -> Stage {
        Stage::Scrape
    }

    async fn run(&self, state: &NewsState) -> Result<NewsState> {
        let raw_articles = self.fetch(&state.newspaper_url).await;
        Ok(state.with_raw_articles(raw_articles))
    }
}

/// Emitted once per completed stage, carrying the state after that stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageEvent {
    pub stage: Stage,
    pub state: NewsState,
}

pub struct Pipeline {
    stages: Vec<Arc<dyn StageRunner>>,
    model_name: String,
    throttle: Throttle,
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stages.iter().map(|s| s.stage()).collect::<Vec<_>>())
            .field("model", &self.model_name)
            .field("throttle", &self.throttle)
            .finish()
    }
}

impl Pipeline {
    /// Builds the fixed scrape → four analysts → editor sequence.
    pub fn new(fetcher: Fetcher, model: Arc<dyn LanguageModel>) -> Self {
        let mut stages: Vec<Arc<dyn StageRunner>> = vec![Arc::new(fetcher)];
        for topic in Topic::ALL {
            stages.push(Arc::new(TopicAnalyst::new(topic, model.clone())));
        }
        stages.push(Arc::new(Editor::new(model.clone())));

        Self {
            stages,
            model_name: model.name().to_string(),
            throttle: Throttle::default(),
        }
    }

    pub fn with_throttle(mut self, throttle: Throttle) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn stages(&self) -> Vec<Stage> {
        self.stages.iter().map(|s| s.stage()).collect()
    }

    async fn execute(&self, runner: &dyn StageRunner, state: &NewsState) -> Result<NewsState> {
        let stage = runner.stage();
        if stage.calls_model() {
            self.throttle.wait().await;
        }
        info!("🚀 {} started", stage);
        let next = runner.run(state).await?;
        info!("✅ {} done", stage);
        Ok(next)
    }

    /// Lazily runs the stages in order, yielding one event per completed stage.
    ///
    /// A stage only runs when the stream is polled. The first error is yielded
    /// and ends the stream; nothing after the failing stage runs.
    pub fn stream<'a>(&'a self, url: &str) -> impl Stream<Item = Result<StageEvent>> + 'a {
        let initial = NewsState::new(url);
        stream::try_unfold((0usize, initial), move |(index, state)| async move {
            let Some(runner) = self.stages.get(index) else {
                return Ok(None);
            };
            let stage = runner.stage();
            let next = self
                .execute(runner.as_ref(), &state)
                .instrument(info_span!("stage", name = stage.name()))
                .await?;
            let event = StageEvent {
                stage,
                state: next.clone(),
            };
            Ok::<_, nd_core::Error>(Some((event, (index + 1, next))))
        })
    }

    /// Runs every stage and returns the final state.
    pub async fn run(&self, url: &str) -> Result<NewsState> {
        let mut events = pin!(self.stream(url));
        let mut state = NewsState::new(url);
        while let Some(event) = events.try_next().await? {
            state = event.state;
        }
        Ok(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nd_fetch::PageSource;
    use nd_inference::models::EchoModel;

    struct HeadlineSource;

    #[async_trait]
    impl PageSource for HeadlineSource {
        async fn fetch_feed(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(Vec::new())
        }

        async fn fetch_html(&self, _url: &str) -> Result<String> {
            Ok("<h1>Local team wins cup</h1>".to_string())
        }
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(
            Fetcher::new(Arc::new(HeadlineSource)),
            Arc::new(EchoModel::new()),
        )
        .with_throttle(Throttle::none())
    }

    #[test]
    fn test_stage_order() {
        assert_eq!(pipeline().stages(), Stage::ALL.to_vec());
        assert_eq!(pipeline().model_name(), "echo");
    }

    #[tokio::test]
    async fn test_run_fills_state() {
        let state = pipeline().run("https://example.com").await.unwrap();
        assert_eq!(state.newspaper_url, "https://example.com");
        assert_eq!(state.raw_articles, "Local team wins cup");
        assert!(state.is_complete());
    }

    #[tokio::test(start_paused = true)]
    async fn test_throttle_applies_before_model_stages() {
        let pipeline = Pipeline::new(
            Fetcher::new(Arc::new(HeadlineSource)),
            Arc::new(EchoModel::new()),
        )
        .with_throttle(Throttle::new(std::time::Duration::from_secs(10)));

        let start = tokio::time::Instant::now();
        pipeline.run("https://example.com").await.unwrap();
        assert!(start.elapsed() >= std::time::Duration::from_secs(50));
    }
}
