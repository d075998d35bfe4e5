use crate::{
    research::agent::ResearchAgent,
    types::{Outline, Result, SectionOutcome, SectionStatus},
};
use futures::{
    future::{join_all, try_join_all},
    stream, StreamExt, TryStreamExt,
};
use tracing::{debug, error, info};

/// Fans one research request per outline section out to a [`ResearchAgent`].
///
/// Requests run concurrently on the caller's task. Results always come back
/// in section order, whatever order the requests finish in.
pub struct ResearchCoordinator<'a> {
    agent: &'a dyn ResearchAgent,
    report_type: &'a str,
    max_concurrency: Option<usize>,
}

impl<'a> ResearchCoordinator<'a> {
    pub fn new(agent: &'a dyn ResearchAgent, report_type: &'a str) -> Self {
        Self {
            agent,
            report_type,
            max_concurrency: None,
        }
    }

    /// Cap the number of in-flight requests. `None` means no cap.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.map(|n| n.max(1));
        self
    }

    /// Research every section; the first failure fails the whole batch and
    /// drops the requests still in flight.
    pub async fn research_all(&self, outline: &Outline) -> Result<Vec<serde_json::Value>> {
        info!(
            sections = outline.sections.len(),
            title = %outline.title,
            "Starting parallel research"
        );

        let tasks = outline
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| self.research_section(index, section, &outline.title));

        let results: Vec<serde_json::Value> = match self.max_concurrency {
            None => try_join_all(tasks).await?,
            Some(limit) => stream::iter(tasks).buffered(limit).try_collect().await?,
        };

        info!(results = results.len(), "Parallel research complete");
        Ok(results)
    }

    /// Research every section and report each outcome, never failing the batch.
    pub async fn research_settled(&self, outline: &Outline) -> Vec<SectionOutcome> {
        let tasks = outline
            .sections
            .iter()
            .enumerate()
            .map(|(index, section)| async move {
                let outcome = match self.research_section(index, section, &outline.title).await {
                    Ok(result) => SectionStatus::Ok { result },
                    Err(e) => SectionStatus::Failed {
                        error: e.to_string(),
                    },
                };
                SectionOutcome {
                    section: section.clone(),
                    outcome,
                }
            });

        let outcomes: Vec<SectionOutcome> = match self.max_concurrency {
            None => join_all(tasks).await,
            Some(limit) => stream::iter(tasks).buffered(limit).collect().await,
        };

        let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
        info!(
            sections = outcomes.len(),
            failed, "Parallel research settled"
        );
        outcomes
    }

    async fn research_section(
        &self,
        index: usize,
        section: &str,
        title: &str,
    ) -> Result<serde_json::Value> {
        debug!(index, section, "Researching section");

        match self.agent.research(section, self.report_type, title).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(index, section, kind = e.kind(), error = %e, "Section research failed");
                Err(e)
            }
        }
    }
}
