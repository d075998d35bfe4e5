//! Mock implementations for testing.
//!
//! This module provides a scripted agent-run client and a research agent that
//! can be shared across test files without duplication.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use research_editor::langgraph::{
    Assistant, AssistantSearch, Run, RunEvent, RunInput, RunStatus, Thread,
};
use research_editor::research::ResearchAgent;
use research_editor::types::{AppError, Result};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

type Responder = Arc<dyn Fn(&RunInput) -> Value + Send + Sync>;

/// A run created on the mock, as the client saw it.
#[derive(Debug, Clone)]
pub struct CreatedRun {
    pub run_id: String,
    pub thread_id: String,
    pub assistant_id: String,
    pub input: RunInput,
}

/// Scripted agent-run client.
///
/// Statuses are handed out one per `get_run`; the last one repeats once the
/// script is exhausted. Events are either fixed or built from the run input
/// by a responder.
///
/// # Examples
///
/// ```ignore
/// let client = MockAgentRunClient::new()
///     .with_statuses(vec![RunStatus::Pending, RunStatus::Success])
///     .with_final_content(json!(r#"{"title":"T","sections":["a"]}"#));
/// ```
pub struct MockAgentRunClient {
    assistants: Vec<Assistant>,
    statuses: Mutex<VecDeque<RunStatus>>,
    events: Option<Vec<RunEvent>>,
    responder: Responder,
    searches: Mutex<Vec<AssistantSearch>>,
    threads_created: AtomicUsize,
    runs: Mutex<Vec<CreatedRun>>,
    polls: Mutex<Vec<Instant>>,
    events_listed: AtomicUsize,
}

impl Default for MockAgentRunClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockAgentRunClient {
    /// One assistant, runs that succeed on the first poll, empty content.
    pub fn new() -> Self {
        Self {
            assistants: vec![assistant("asst-1")],
            statuses: Mutex::new(VecDeque::from([RunStatus::Success])),
            events: None,
            responder: Arc::new(|_| json!("")),
            searches: Mutex::new(Vec::new()),
            threads_created: AtomicUsize::new(0),
            runs: Mutex::new(Vec::new()),
            polls: Mutex::new(Vec::new()),
            events_listed: AtomicUsize::new(0),
        }
    }

    pub fn with_assistants(mut self, assistants: Vec<Assistant>) -> Self {
        self.assistants = assistants;
        self
    }

    pub fn with_statuses(self, statuses: Vec<RunStatus>) -> Self {
        *self.statuses.lock().unwrap() = statuses.into();
        self
    }

    /// Every run ends with a final message carrying `content`.
    pub fn with_final_content(mut self, content: Value) -> Self {
        self.responder = Arc::new(move |_| content.clone());
        self
    }

    /// Final message content computed from the run's input.
    pub fn with_responder<F>(mut self, responder: F) -> Self
    where
        F: Fn(&RunInput) -> Value + Send + Sync + 'static,
    {
        self.responder = Arc::new(responder);
        self
    }

    /// Return exactly these events for every run.
    pub fn with_events(mut self, events: Vec<RunEvent>) -> Self {
        self.events = Some(events);
        self
    }

    pub fn searches(&self) -> Vec<AssistantSearch> {
        self.searches.lock().unwrap().clone()
    }

    pub fn threads_created(&self) -> usize {
        self.threads_created.load(Ordering::SeqCst)
    }

    pub fn runs(&self) -> Vec<CreatedRun> {
        self.runs.lock().unwrap().clone()
    }

    /// Instants at which `get_run` was called.
    pub fn polls(&self) -> Vec<Instant> {
        self.polls.lock().unwrap().clone()
    }

    pub fn events_listed(&self) -> usize {
        self.events_listed.load(Ordering::SeqCst)
    }

    fn next_status(&self) -> RunStatus {
        let mut statuses = self.statuses.lock().unwrap();
        if statuses.len() > 1 {
            statuses.pop_front().unwrap()
        } else {
            statuses.front().copied().unwrap_or(RunStatus::Success)
        }
    }
}

#[async_trait]
impl research_editor::AgentRunClient for MockAgentRunClient {
    async fn search_assistants(&self, search: &AssistantSearch) -> Result<Vec<Assistant>> {
        self.searches.lock().unwrap().push(search.clone());
        Ok(self.assistants.clone())
    }

    async fn create_thread(&self) -> Result<Thread> {
        let n = self.threads_created.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(Thread {
            thread_id: format!("thread-{}", n),
            created_at: None,
        })
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        input: &RunInput,
    ) -> Result<Run> {
        let mut runs = self.runs.lock().unwrap();
        let run_id = format!("run-{}", runs.len() + 1);
        runs.push(CreatedRun {
            run_id: run_id.clone(),
            thread_id: thread_id.to_string(),
            assistant_id: assistant_id.to_string(),
            input: input.clone(),
        });

        Ok(Run {
            run_id,
            thread_id: Some(thread_id.to_string()),
            assistant_id: Some(assistant_id.to_string()),
            status: RunStatus::Pending,
            created_at: None,
        })
    }

    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.polls.lock().unwrap().push(Instant::now());
        Ok(Run {
            run_id: run_id.to_string(),
            thread_id: Some(thread_id.to_string()),
            assistant_id: None,
            status: self.next_status(),
            created_at: None,
        })
    }

    async fn list_events(&self, _thread_id: &str, run_id: &str) -> Result<Vec<RunEvent>> {
        self.events_listed.fetch_add(1, Ordering::SeqCst);
        if let Some(events) = &self.events {
            return Ok(events.clone());
        }

        let input = self
            .runs
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.run_id == run_id)
            .map(|r| r.input.clone())
            .ok_or_else(|| AppError::Internal(format!("unknown run {}", run_id)))?;

        Ok(vec![final_message_event((self.responder)(&input), None)])
    }
}

pub fn assistant(id: &str) -> Assistant {
    Assistant {
        assistant_id: id.to_string(),
        graph_id: Some("researcher".to_string()),
        name: None,
        created_at: None,
    }
}

/// An event whose output ends with an AI message carrying `content`.
pub fn final_message_event(content: Value, created_at: Option<DateTime<Utc>>) -> RunEvent {
    RunEvent {
        event: Some("values".to_string()),
        data: json!({
            "output": {
                "messages": [
                    {"type": "human", "content": "prompt"},
                    {"type": "ai", "content": content}
                ]
            }
        }),
        created_at,
    }
}

/// One research call as received by [`MockResearchAgent`].
#[derive(Debug, Clone, PartialEq)]
pub struct ResearchCall {
    pub query: String,
    pub report_type: String,
    pub parent_query: String,
}

/// Research agent with per-query latency and failures.
#[derive(Default)]
pub struct MockResearchAgent {
    delays: HashMap<String, Duration>,
    failing: HashSet<String>,
    calls: Mutex<Vec<ResearchCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl MockResearchAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(mut self, query: &str, delay: Duration) -> Self {
        self.delays.insert(query.to_string(), delay);
        self
    }

    pub fn failing_on(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    pub fn calls(&self) -> Vec<ResearchCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Highest number of requests that were running at the same time.
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// The value this agent returns for `query`.
    pub fn report_for(query: &str) -> Value {
        json!({"section": query, "report": format!("Report on {}", query)})
    }
}

#[async_trait]
impl ResearchAgent for MockResearchAgent {
    async fn research(&self, query: &str, report_type: &str, parent_query: &str) -> Result<Value> {
        self.calls.lock().unwrap().push(ResearchCall {
            query: query.to_string(),
            report_type: report_type.to_string(),
            parent_query: parent_query.to_string(),
        });

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        if let Some(delay) = self.delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.failing.contains(query) {
            return Err(AppError::Transport(format!("research failed for {}", query)));
        }
        Ok(Self::report_for(query))
    }
}
