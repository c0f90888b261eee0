use chrono::{DateTime, Utc};
use crossterm::style::Stylize;
use nd_core::{Error, NewsState, Stage, Topic};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Waiting,
    Running,
    Done,
    Failed,
}

/// Per-stage status as seen from the event stream.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    statuses: [StageStatus; Stage::ALL.len()],
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        Self {
            statuses: [StageStatus::Waiting; Stage::ALL.len()],
        }
    }

    pub fn status(&self, stage: Stage) -> StageStatus {
        self.statuses[stage.position()]
    }

    pub fn start(&mut self, stage: Stage) {
        self.statuses[stage.position()] = StageStatus::Running;
    }

    /// Marks `stage` done and the following stage running.
    pub fn complete(&mut self, stage: Stage) -> Option<Stage> {
        self.statuses[stage.position()] = StageStatus::Done;
        let next = stage.next();
        if let Some(next) = next {
            self.start(next);
        }
        next
    }

    /// Marks whichever stage is running as failed.
    pub fn fail(&mut self) -> Option<Stage> {
        let stage = self.running()?;
        self.statuses[stage.position()] = StageStatus::Failed;
        Some(stage)
    }

    pub fn running(&self) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|s| self.status(*s) == StageStatus::Running)
    }

    pub fn percent(&self) -> usize {
        let done = self
            .statuses
            .iter()
            .filter(|s| **s == StageStatus::Done)
            .count();
        done * 100 / self.statuses.len()
    }

    pub fn line(&self, stage: Stage) -> String {
        let status = self.status(stage);
        let (label, detail) = match status {
            StageStatus::Waiting => ("WAITING", ""),
            StageStatus::Running => ("RUNNING", stage.description()),
            StageStatus::Done => ("DONE", "✅ Complete!"),
            StageStatus::Failed => ("FAILED", "❌ Failed"),
        };
        let label = format!("{:<7}", label);
        let badge = match status {
            StageStatus::Waiting => label.dark_grey(),
            StageStatus::Running => label.yellow(),
            StageStatus::Done => label.green(),
            StageStatus::Failed => label.red(),
        };
        format!(
            "[{:>3}%] {} {} {}",
            self.percent(),
            badge,
            stage.label(),
            detail
        )
    }

    pub fn print(&self, stage: Stage) {
        eprintln!("{}", self.line(stage));
    }
}

/// What `--format json` prints.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub model: String,
    pub state: NewsState,
}

impl RunReport {
    pub fn new(model: &str, state: NewsState) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            model: model.to_string(),
            state,
        }
    }
}

pub fn format_results(report: &RunReport, show_raw: bool) -> String {
    let mut out = String::new();
    out.push_str("📊 Analysis Results\n");
    for topic in Topic::ALL {
        out.push_str(&section(topic.title(), report.state.analysis(topic)));
    }
    let heading = format!(
        "📋 Daily News Briefing ({})",
        report.generated_at.format("%A, %d %B %Y")
    );
    out.push_str(&section(&heading, &report.state.summary));
    if show_raw {
        out.push_str(&section("🔍 Raw Scraped Articles", &report.state.raw_articles));
    }
    out
}

fn section(title: &str, body: &str) -> String {
    let body = if body.is_empty() { "No data" } else { body };
    format!("\n{}\n{}\n{}\n", title, "─".repeat(40), body)
}

pub fn print_failure(err: &Error) {
    let class = err.failure_class();
    eprintln!("{} {}", "❌ Error:".red(), err);
    eprintln!("{} {}", format!("[{}]", class).yellow(), class.hint());
}
