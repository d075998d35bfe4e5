//! # Research Editor
//!
//! The editor stage of a multi-agent research pipeline. It asks a remote
//! agent-run service for a research outline and then researches every
//! outline section concurrently.
//!
//! ## Overview
//!
//! The editor can be used in two ways:
//!
//! 1. **As a command-line tool** - Run the `research-editor` binary
//! 2. **As a library** - Embed [`EditorAgent`] in a larger pipeline
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use research_editor::{EditorAgent, EditorConfig, ResearchState};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> research_editor::Result<()> {
//!     let config = EditorConfig::load_or_default("editor.toml")?;
//!     let editor = EditorAgent::from_config(&config, CancellationToken::new())?;
//!
//!     let state = ResearchState::from_json(r#"{"initial_research": "..."}"#)?;
//!     let outline = editor.plan_research(&state).await?;
//!     let result = editor.run_parallel_research(&outline).await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&result)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Modules
//!
//! - [`editor`] - Outline planning and the fan-out entry points
//! - [`langgraph`] - Agent-run service client, polling and run execution
//! - [`research`] - Per-section research agents and aggregation
//! - [`types`] - Research state, outlines and error handling
//! - [`utils`] - TOML configuration and logging setup
//!
//! ## Configuration
//!
//! Settings live in `editor.toml`. Secrets such as the service API key are
//! read from the environment (a `.env` file is honoured by the binary).

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Command-line parsing and terminal output.
pub mod cli;
/// Outline planning and per-section fan-out.
pub mod editor;
/// Client for the remote agent-run service.
pub mod langgraph;
/// Per-section research agents and coordination.
pub mod research;
/// Core types (state, outline, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use editor::{EditorAgent, EditorOptions};
pub use langgraph::{AgentRunClient, HttpAgentRunClient, PollConfig, RunExecutor};
pub use research::{ResearchAgent, RunResearchAgent};
pub use types::{AppError, Outline, ResearchResult, ResearchState, Result, SectionOutcome};
pub use utils::toml_config::{EditorConfig, FanOutPolicy};
