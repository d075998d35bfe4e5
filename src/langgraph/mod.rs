//! Agent-Run Service Client
//!
//! This module wraps the remote agent-run service (a LangGraph-compatible
//! agent server) behind a small trait so the editor can be driven against the
//! real HTTP API or a test double.
//!
//! # Architecture
//!
//! - [`AgentRunClient`] - The trait covering assistants, threads, runs and events
//! - [`HttpAgentRunClient`] - reqwest implementation of the trait
//! - [`RunPoller`] - Fixed-interval status polling with a deadline and cancellation
//! - [`RunExecutor`] - Submit messages, wait, and read back the final message
//!
//! # Example
//!
//! ```ignore
//! use research_editor::langgraph::{HttpAgentRunClient, RunExecutor, PollConfig};
//!
//! let client = Arc::new(HttpAgentRunClient::new(url, None, Duration::from_secs(30))?);
//! let executor = RunExecutor::new(client, PollConfig::default(), Default::default());
//! let output = executor.execute(messages, &CancellationToken::new()).await?;
//! ```

/// Client trait and HTTP implementation.
pub mod client;
/// Run submission and final message extraction.
pub mod executor;
/// Run-status polling.
pub mod poller;
/// Wire types of the service API.
pub mod types;

pub use client::{AgentRunClient, HttpAgentRunClient};
pub use executor::{AssistantSelector, RunExecutor, RunOutput};
pub use poller::{PollConfig, RunPoller};
pub use types::{Assistant, AssistantSearch, Run, RunEvent, RunHandle, RunInput, RunStatus, Thread};
