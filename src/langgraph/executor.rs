//! Run execution: submit messages to an assistant, wait for the run, read
//! back its final message.

use crate::langgraph::client::AgentRunClient;
use crate::langgraph::poller::{PollConfig, RunPoller};
use crate::langgraph::types::{AssistantSearch, RunEvent, RunHandle, RunInput};
use crate::types::{AppError, ChatMessage, Result};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// How the assistant a run is bound to gets chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistantSelector {
    /// Use this assistant directly, skipping the search
    pub assistant_id: Option<String>,
    /// Restrict the search to assistants of this graph
    pub graph_id: Option<String>,
}

/// Final message of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub handle: RunHandle,
    /// `content` of the last output message, as the service returned it
    pub content: serde_json::Value,
}

/// Drives one remote run from submission to its final message.
#[derive(Clone)]
pub struct RunExecutor {
    client: Arc<dyn AgentRunClient>,
    poller: RunPoller,
    selector: AssistantSelector,
}

impl RunExecutor {
    pub fn new(
        client: Arc<dyn AgentRunClient>,
        poll_config: PollConfig,
        selector: AssistantSelector,
    ) -> Self {
        let poller = RunPoller::new(client.clone(), poll_config);
        Self {
            client,
            poller,
            selector,
        }
    }

    pub fn client(&self) -> &Arc<dyn AgentRunClient> {
        &self.client
    }

    /// Pick the assistant runs are bound to.
    ///
    /// A configured id wins; otherwise the first search result is used.
    pub async fn resolve_assistant(&self) -> Result<String> {
        if let Some(id) = &self.selector.assistant_id {
            return Ok(id.clone());
        }

        let search = AssistantSearch {
            graph_id: self.selector.graph_id.clone(),
            ..Default::default()
        };
        let assistants = self.client.search_assistants(&search).await?;
        info!(count = assistants.len(), "Assistants found");

        assistants
            .into_iter()
            .next()
            .map(|a| a.assistant_id)
            .ok_or(AppError::NoAssistant)
    }

    /// Create a thread and start a run carrying `messages`.
    pub async fn start(&self, messages: Vec<ChatMessage>) -> Result<RunHandle> {
        let assistant_id = self.resolve_assistant().await?;
        let thread = self.client.create_thread().await?;
        info!(thread_id = %thread.thread_id, assistant_id = %assistant_id, "Thread created");

        let input = RunInput { messages };
        let run = self
            .client
            .create_run(&thread.thread_id, &assistant_id, &input)
            .await?;
        info!(run_id = %run.run_id, "Run created");

        Ok(RunHandle {
            assistant_id,
            thread_id: thread.thread_id,
            run_id: run.run_id,
        })
    }

    /// Submit `messages`, wait for the run to succeed and return the content
    /// of its final message.
    pub async fn execute(
        &self,
        messages: Vec<ChatMessage>,
        cancel: &CancellationToken,
    ) -> Result<RunOutput> {
        let handle = self.start(messages).await.inspect_err(|e| {
            error!(kind = e.kind(), error = %e, "Failed to start run");
        })?;

        let content = self.complete(&handle, cancel).await.inspect_err(|e| {
            error!(run_id = %handle.run_id, kind = e.kind(), error = %e, "Failed to fetch response");
        })?;

        Ok(RunOutput { handle, content })
    }

    async fn complete(
        &self,
        handle: &RunHandle,
        cancel: &CancellationToken,
    ) -> Result<serde_json::Value> {
        let run = self.poller.wait_for_success(handle, cancel).await?;
        debug!(run_id = %run.run_id, status = %run.status, "Final run status");

        let events = self
            .client
            .list_events(&handle.thread_id, &handle.run_id)
            .await?;
        let latest = latest_event(&events).ok_or_else(|| {
            AppError::MalformedEvent(format!("run {} emitted no events", handle.run_id))
        })?;

        let content = final_message_content(latest)?;
        debug!(content = %content, "Final message content");
        Ok(content)
    }
}

/// Most recent event of a run.
///
/// When every event carries `created_at` the newest timestamp wins, earliest
/// position first on ties; otherwise the list is taken to be newest-first and
/// index 0 is returned.
pub fn latest_event(events: &[RunEvent]) -> Option<&RunEvent> {
    if !events.is_empty() && events.iter().all(|e| e.created_at.is_some()) {
        return events
            .iter()
            .reduce(|best, e| if e.created_at > best.created_at { e } else { best });
    }
    events.first()
}

/// `content` of the last entry of `data.output.messages`.
pub fn final_message_content(event: &RunEvent) -> Result<serde_json::Value> {
    let messages = event
        .data
        .get("output")
        .and_then(|o| o.get("messages"))
        .and_then(|m| m.as_array())
        .ok_or_else(|| AppError::MalformedEvent("missing data.output.messages".to_string()))?;

    let last = messages
        .last()
        .ok_or_else(|| AppError::MalformedEvent("output has no messages".to_string()))?;

    last.get("content")
        .cloned()
        .ok_or_else(|| AppError::MalformedEvent("final message has no content".to_string()))
}
