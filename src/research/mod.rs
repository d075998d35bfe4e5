//! Per-Section Research Fan-Out
//!
//! This module provides the pieces the editor uses to research every section
//! of an outline at once.
//!
//! # Architecture
//!
//! - [`agent::ResearchAgent`] - The seam for whatever performs one research request
//! - [`agent::RunResearchAgent`] - Research backed by a run on the agent-run service
//! - [`coordinator::ResearchCoordinator`] - Issues all section requests concurrently
//!   and aggregates them in section order
//!
//! # Usage
//!
//! ```ignore
//! use research_editor::research::{ResearchCoordinator, RunResearchAgent};
//!
//! let agent = RunResearchAgent::new(executor);
//! let coordinator = ResearchCoordinator::new(&agent, "research_report");
//!
//! let research_data = coordinator.research_all(&outline).await?;
//! ```
//!
//! # Failure Policies
//!
//! 1. **Fail fast** (`research_all`) - The first failing section fails the batch
//! 2. **Settled** (`research_settled`) - Every section is awaited and reported

/// Research agent trait and the run-backed implementation.
pub mod agent;
/// Concurrent per-section research and aggregation.
pub mod coordinator;

pub use agent::{ResearchAgent, RunResearchAgent};
pub use coordinator::ResearchCoordinator;
