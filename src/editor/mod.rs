//! Research Editor
//!
//! The editor turns a research summary into an outline and then researches
//! every outline section in parallel.
//!
//! # Flow
//!
//! 1. **Plan** - [`EditorAgent::plan_research`] builds the planning prompt,
//!    submits it as a run, polls it and parses the final message as an
//!    [`Outline`](crate::types::Outline)
//! 2. **Fan out** - [`EditorAgent::run_parallel_research`] issues one research
//!    request per section and returns the results in section order
//!
//! # Usage
//!
//! ```ignore
//! use research_editor::editor::EditorAgent;
//!
//! let editor = EditorAgent::from_config(&config, CancellationToken::new())?;
//! let outline = editor.plan_research(&state).await?;
//! let result = editor.run_parallel_research(&outline).await?;
//! ```

/// Editor agent and outline parsing.
pub mod agent;
/// Planning and research prompts.
pub mod prompts;

pub use agent::{parse_outline, EditorAgent, EditorOptions};

use crate::langgraph::{AgentRunClient, HttpAgentRunClient, RunExecutor};
use crate::research::RunResearchAgent;
use crate::types::Result;
use crate::utils::toml_config::EditorConfig;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

impl EditorAgent {
    /// Build an editor talking to the configured agent service over HTTP.
    ///
    /// Section research runs on the same service through a
    /// [`RunResearchAgent`] that observes `cancel`.
    pub fn from_config(config: &EditorConfig, cancel: CancellationToken) -> Result<Self> {
        let api_key = config.api_key()?;
        let client: Arc<dyn AgentRunClient> = Arc::new(HttpAgentRunClient::new(
            config.service.base_url.clone(),
            api_key,
            config.service.request_timeout(),
        )?);

        Ok(Self::with_client(client, config, cancel))
    }

    /// Build an editor around an existing client.
    pub fn with_client(
        client: Arc<dyn AgentRunClient>,
        config: &EditorConfig,
        cancel: CancellationToken,
    ) -> Self {
        let executor = RunExecutor::new(
            client,
            config.polling.poll_config(),
            config.service.assistant_selector(),
        );
        let researcher =
            Arc::new(RunResearchAgent::new(executor.clone()).with_cancellation(cancel));

        EditorAgent::new(executor, researcher).with_options(config.research.editor_options())
    }
}
