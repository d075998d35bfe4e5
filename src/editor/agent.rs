//! The research editor: outline planning and per-section fan-out.

use crate::editor::prompts;
use crate::langgraph::{AgentRunClient, RunExecutor};
use crate::research::{ResearchAgent, ResearchCoordinator};
use crate::types::{
    AppError, Outline, ResearchResult, ResearchState, Result, SectionOutcome, RESEARCH_REPORT,
};
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Fan-out tuning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorOptions {
    /// Report type attached to every section request
    pub report_type: String,
    /// Cap on in-flight section requests; `None` runs them all at once
    pub max_concurrency: Option<usize>,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            report_type: RESEARCH_REPORT.to_string(),
            max_concurrency: None,
        }
    }
}

/// Plans a research outline through a remote agent and researches its
/// sections in parallel.
///
/// # Example
///
/// ```rust,ignore
/// let editor = EditorAgent::new(executor, Arc::new(RunResearchAgent::new(executor.clone())));
///
/// let outline = editor.plan_research(&state).await?;
/// let result = editor.run_parallel_research(&outline).await?;
/// ```
pub struct EditorAgent {
    executor: RunExecutor,
    researcher: Arc<dyn ResearchAgent>,
    options: EditorOptions,
}

impl EditorAgent {
    pub fn new(executor: RunExecutor, researcher: Arc<dyn ResearchAgent>) -> Self {
        Self {
            executor,
            researcher,
            options: EditorOptions::default(),
        }
    }

    pub fn with_options(mut self, options: EditorOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// The agent-run client the editor plans with
    pub fn client(&self) -> &Arc<dyn AgentRunClient> {
        self.executor.client()
    }

    /// Generate an outline for `state` using today's date.
    pub async fn plan_research(&self, state: &ResearchState) -> Result<Outline> {
        self.plan_research_with_cancel(state, &CancellationToken::new())
            .await
    }

    /// [`plan_research`](Self::plan_research) that gives up when `cancel` fires.
    pub async fn plan_research_with_cancel(
        &self,
        state: &ResearchState,
        cancel: &CancellationToken,
    ) -> Result<Outline> {
        self.plan_research_on(state, Local::now().date_naive(), cancel)
            .await
    }

    /// Generate an outline with an explicit prompt date.
    pub async fn plan_research_on(
        &self,
        state: &ResearchState,
        date: NaiveDate,
        cancel: &CancellationToken,
    ) -> Result<Outline> {
        let max_sections = state.max_sections();
        let prompt = prompts::planning_prompt(date, state.initial_research(), max_sections);
        let messages = prompts::as_run_messages(&prompt)?;

        let output = self.executor.execute(messages, cancel).await?;

        let mut outline = parse_outline(&output.content).inspect_err(|e| {
            error!(run_id = %output.handle.run_id, kind = e.kind(), error = %e, "Failed to fetch response");
        })?;

        let dropped = outline.enforce_max_sections(max_sections);
        if dropped > 0 {
            warn!(
                dropped,
                max_sections, "Outline exceeded the section limit and was truncated"
            );
        }

        info!(title = %outline.title, sections = outline.sections.len(), "Outline planned");
        Ok(outline)
    }

    /// Research every section of `outline` concurrently.
    ///
    /// `research_data[i]` is the result for `outline.sections[i]`. Any failing
    /// section fails the whole call.
    pub async fn run_parallel_research(&self, outline: &Outline) -> Result<ResearchResult> {
        let research_data = self.coordinator().research_all(outline).await?;
        Ok(ResearchResult { research_data })
    }

    /// Research every section and report per-section outcomes instead of
    /// failing on the first error.
    pub async fn run_parallel_research_settled(&self, outline: &Outline) -> Vec<SectionOutcome> {
        self.coordinator().research_settled(outline).await
    }

    fn coordinator(&self) -> ResearchCoordinator<'_> {
        ResearchCoordinator::new(self.researcher.as_ref(), &self.options.report_type)
            .with_max_concurrency(self.options.max_concurrency)
    }
}

/// Parse the final message content of a planning run into an [`Outline`].
///
/// Only string content is accepted; anything else is rejected before any
/// parsing is attempted.
pub fn parse_outline(content: &serde_json::Value) -> Result<Outline> {
    let text = content.as_str().ok_or_else(|| {
        AppError::InvalidResponse(format!(
            "expected string content, got {}",
            json_kind(content)
        ))
    })?;
    debug!(len = text.len(), "Parsing outline");

    Ok(serde_json::from_str(text)?)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
