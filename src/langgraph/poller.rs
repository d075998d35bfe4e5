//! Bounded run-status polling.

use crate::langgraph::client::AgentRunClient;
use crate::langgraph::types::{Run, RunHandle, RunStatus};
use crate::types::{AppError, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Polling cadence and deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    /// Fixed delay between two status requests
    pub interval: Duration,
    /// Total time allowed before giving up with [`AppError::Timeout`]
    pub max_wait: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(1000),
            max_wait: Duration::from_secs(600),
        }
    }
}

/// Polls a run at a fixed interval until it reports success.
#[derive(Clone)]
pub struct RunPoller {
    client: Arc<dyn AgentRunClient>,
    config: PollConfig,
}

impl RunPoller {
    pub fn new(client: Arc<dyn AgentRunClient>, config: PollConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Wait until the run reaches `success`.
    ///
    /// Fails with [`AppError::RunFailed`] on `error`, `timeout` or
    /// `interrupted`, with [`AppError::Timeout`] once `max_wait` elapses, and
    /// with [`AppError::Cancelled`] when `cancel` fires. The in-flight status
    /// request is dropped in the last two cases.
    pub async fn wait_for_success(
        &self,
        handle: &RunHandle,
        cancel: &CancellationToken,
    ) -> Result<Run> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                warn!(run_id = %handle.run_id, "Run polling cancelled");
                Err(AppError::Cancelled)
            }
            outcome = tokio::time::timeout(self.config.max_wait, self.poll_until_success(handle)) => {
                match outcome {
                    Ok(result) => result,
                    Err(_) => {
                        warn!(
                            run_id = %handle.run_id,
                            max_wait = ?self.config.max_wait,
                            "Run did not complete before the deadline"
                        );
                        Err(AppError::Timeout(self.config.max_wait))
                    }
                }
            }
        }
    }

    async fn poll_until_success(&self, handle: &RunHandle) -> Result<Run> {
        let mut polls: u32 = 1;
        let mut run = self
            .client
            .get_run(&handle.thread_id, &handle.run_id)
            .await?;

        loop {
            match run.status {
                RunStatus::Success => {
                    info!(run_id = %run.run_id, polls, "Run completed");
                    return Ok(run);
                }
                status if status.is_failure() => {
                    return Err(AppError::RunFailed {
                        run_id: run.run_id,
                        status: status.to_string(),
                    });
                }
                status => {
                    debug!(run_id = %run.run_id, %status, polls, "Run still in progress");
                }
            }

            tokio::time::sleep(self.config.interval).await;
            run = self
                .client
                .get_run(&handle.thread_id, &handle.run_id)
                .await?;
            polls += 1;
        }
    }
}
