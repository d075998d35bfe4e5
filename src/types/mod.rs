use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Section count used when the task does not bound it.
pub const DEFAULT_MAX_SECTIONS: usize = 5;

/// Report type attached to every per-section research request.
pub const RESEARCH_REPORT: &str = "research_report";

// ============= Research State =============

/// Task configuration nested in a [`ResearchState`].
///
/// The editor only reads `max_sections`. The other fields belong to the
/// surrounding pipeline stages and are carried through unchanged so a state
/// serializes back the way it was read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TaskConfig {
    /// The research question the task was started with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Upper bound on outline sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_sections: Option<usize>,
    /// Model hint forwarded by callers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub follow_guidelines: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guidelines: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
}

/// Input shared by the editor operations.
///
/// Every field is optional: the plan builder reads `task` and
/// `initial_research`, the fan-out runner reads `title` and `sections`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResearchState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<TaskConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_research: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<String>>,
}

impl ResearchState {
    /// Parse a state from JSON, rejecting malformed shapes at the boundary.
    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| AppError::InvalidInput(format!("Malformed research state: {}", e)))
    }

    /// Section bound for the outline. Zero counts as unset.
    pub fn max_sections(&self) -> usize {
        self.task
            .as_ref()
            .and_then(|t| t.max_sections)
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_SECTIONS)
    }

    /// Summary the outline is derived from, empty when absent.
    pub fn initial_research(&self) -> &str {
        self.initial_research.as_deref().unwrap_or("")
    }

    /// The outline carried by this state, if a previous stage produced one.
    pub fn outline(&self) -> Option<Outline> {
        match (&self.title, &self.sections) {
            (Some(title), Some(sections)) => Some(Outline {
                title: title.clone(),
                date: None,
                sections: sections.clone(),
            }),
            _ => None,
        }
    }
}

// ============= Outline & Results =============

/// Research outline produced by the plan builder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outline {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub sections: Vec<String>,
}

impl Outline {
    /// Drop sections beyond `max_sections`. Returns how many were removed.
    pub fn enforce_max_sections(&mut self, max_sections: usize) -> usize {
        let extra = self.sections.len().saturating_sub(max_sections);
        self.sections.truncate(max_sections);
        extra
    }
}

/// Aggregated fan-out output, one entry per outline section in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResearchResult {
    pub research_data: Vec<serde_json::Value>,
}

/// Per-section outcome collected by the settled fan-out policy.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SectionOutcome {
    pub section: String,
    #[serde(flatten)]
    pub outcome: SectionStatus,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SectionStatus {
    Ok { result: serde_json::Value },
    Failed { error: String },
}

impl SectionOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, SectionStatus::Ok { .. })
    }
}

// ============= Chat Messages =============

/// A chat message exchanged with the remote agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Human,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Human,
    Assistant,
}

// ============= Error Types =============

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No assistant available on the agent service")]
    NoAssistant,

    #[error("Invalid JSON response: {0}")]
    InvalidResponse(String),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Malformed run event: {0}")]
    MalformedEvent(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Agent service returned {status}: {body}")]
    Service { status: u16, body: String },

    #[error("Run {run_id} finished with status '{status}'")]
    RunFailed { run_id: String, status: String },

    #[error("Run did not complete within {0:?}")]
    Timeout(Duration),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Short stable name of the error kind, used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::NoAssistant => "lookup",
            AppError::InvalidResponse(_) => "shape",
            AppError::Parse(_) => "parse",
            AppError::MalformedEvent(_) => "event",
            AppError::Transport(_) | AppError::Service { .. } => "transport",
            AppError::RunFailed { .. } => "run",
            AppError::Timeout(_) => "timeout",
            AppError::Cancelled => "cancelled",
            AppError::Configuration(_) => "config",
            AppError::InvalidInput(_) => "input",
            AppError::Internal(_) => "internal",
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
