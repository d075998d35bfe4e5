//! Wire types of the agent-run service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::ChatMessage;

/// Body of `POST /assistants/search`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AssistantSearch {
    pub metadata: Option<serde_json::Value>,
    pub offset: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graph_id: Option<String>,
}

impl Default for AssistantSearch {
    fn default() -> Self {
        Self {
            metadata: None,
            offset: 0,
            limit: 10,
            graph_id: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Assistant {
    pub assistant_id: String,
    #[serde(default)]
    pub graph_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Thread {
    pub thread_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Input payload of a run: `{ "messages": [...] }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunInput {
    pub messages: Vec<ChatMessage>,
}

/// Body of `POST /threads/{thread_id}/runs`.
#[derive(Debug, Clone, Serialize)]
pub struct RunCreate<'a> {
    pub assistant_id: &'a str,
    pub input: &'a RunInput,
}

/// Lifecycle status reported for a run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    Pending,
    Running,
    Success,
    Error,
    Timeout,
    Interrupted,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Terminal statuses other than success; polling stops on these.
    pub fn is_failure(self) -> bool {
        matches!(
            self,
            RunStatus::Error | RunStatus::Timeout | RunStatus::Interrupted
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Success => "success",
            RunStatus::Error => "error",
            RunStatus::Timeout => "timeout",
            RunStatus::Interrupted => "interrupted",
            RunStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Run {
    pub run_id: String,
    #[serde(default)]
    pub thread_id: Option<String>,
    #[serde(default)]
    pub assistant_id: Option<String>,
    pub status: RunStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// One event emitted by a run. `data` is kept untyped; only
/// `data.output.messages` is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunEvent {
    #[serde(default)]
    pub event: Option<String>,
    #[serde(default)]
    pub data: serde_json::Value,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Identifiers of one remote run, valid for the duration of a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHandle {
    pub assistant_id: String,
    pub thread_id: String,
    pub run_id: String,
}
