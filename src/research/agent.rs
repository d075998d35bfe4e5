use crate::{
    editor::prompts,
    langgraph::RunExecutor,
    types::Result,
};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Performs research on a single query.
///
/// The fan-out runner calls this once per outline section with the section
/// header as `query`, a fixed report type and the outline title as
/// `parent_query`. The returned value is opaque to the editor.
#[async_trait]
pub trait ResearchAgent: Send + Sync {
    /// Research `query` and return the report
    async fn research(
        &self,
        query: &str,
        report_type: &str,
        parent_query: &str,
    ) -> Result<serde_json::Value>;
}

/// Research agent that runs each query as its own run on the agent-run
/// service.
///
/// The final message of the run is returned as JSON when it parses, and as a
/// plain string otherwise.
pub struct RunResearchAgent {
    executor: RunExecutor,
    cancel: CancellationToken,
}

impl RunResearchAgent {
    pub fn new(executor: RunExecutor) -> Self {
        Self {
            executor,
            cancel: CancellationToken::new(),
        }
    }

    /// Stop polling in-flight runs when `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}

#[async_trait]
impl ResearchAgent for RunResearchAgent {
    async fn research(
        &self,
        query: &str,
        report_type: &str,
        parent_query: &str,
    ) -> Result<serde_json::Value> {
        let messages = prompts::research_messages(query, report_type, parent_query)?;
        let output = self.executor.execute(messages, &self.cancel).await?;
        info!(run_id = %output.handle.run_id, query, "Section research finished");

        Ok(decode_report(output.content))
    }
}

fn decode_report(content: serde_json::Value) -> serde_json::Value {
    match content {
        serde_json::Value::String(text) => {
            serde_json::from_str(&text).unwrap_or(serde_json::Value::String(text))
        }
        other => other,
    }
}
