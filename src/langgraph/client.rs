//! Agent-run service client abstraction and its HTTP implementation
//!
//! The editor never talks to the network directly. It is handed an
//! [`AgentRunClient`], which lets tests substitute a scripted double and lets
//! callers share one pooled HTTP client across editors.

use crate::langgraph::types::{
    Assistant, AssistantSearch, Run, RunCreate, RunEvent, RunInput, Thread,
};
use crate::types::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Maximum number of response body characters kept in service errors.
const ERROR_BODY_LIMIT: usize = 800;

/// Operations the editor needs from the remote agent-run service.
#[async_trait]
pub trait AgentRunClient: Send + Sync {
    /// List registered assistants
    async fn search_assistants(&self, search: &AssistantSearch) -> Result<Vec<Assistant>>;

    /// Create an empty conversation thread
    async fn create_thread(&self) -> Result<Thread>;

    /// Start a run of `assistant_id` on `thread_id`
    async fn create_run(&self, thread_id: &str, assistant_id: &str, input: &RunInput)
        -> Result<Run>;

    /// Fetch the current state of a run
    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run>;

    /// List the events a run emitted
    async fn list_events(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunEvent>>;
}

/// reqwest-backed client for a LangGraph-compatible agent server.
///
/// # Example
///
/// ```rust,ignore
/// use research_editor::langgraph::HttpAgentRunClient;
///
/// let client = HttpAgentRunClient::new("http://localhost:8123", None, Duration::from_secs(30))?;
/// let thread = client.create_thread().await?;
/// ```
#[derive(Clone)]
pub struct HttpAgentRunClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpAgentRunClient {
    /// Create a client for `base_url`, sending `api_key` as `x-api-key` when set.
    pub fn new(
        base_url: impl Into<String>,
        api_key: Option<String>,
        request_timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http(http, base_url, api_key))
    }

    /// Create a client around an existing reqwest client.
    pub fn with_http(http: Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("x-api-key", key),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.authorize(request).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(AppError::Service {
        status: status.as_u16(),
        body: body.chars().take(ERROR_BODY_LIMIT).collect(),
    })
}

#[async_trait]
impl AgentRunClient for HttpAgentRunClient {
    async fn search_assistants(&self, search: &AssistantSearch) -> Result<Vec<Assistant>> {
        debug!(limit = search.limit, "Searching assistants");
        self.send(self.http.post(self.url("/assistants/search")).json(search))
            .await
    }

    async fn create_thread(&self) -> Result<Thread> {
        self.send(
            self.http
                .post(self.url("/threads"))
                .json(&serde_json::json!({})),
        )
        .await
    }

    async fn create_run(
        &self,
        thread_id: &str,
        assistant_id: &str,
        input: &RunInput,
    ) -> Result<Run> {
        let body = RunCreate {
            assistant_id,
            input,
        };
        self.send(
            self.http
                .post(self.url(&format!("/threads/{}/runs", thread_id)))
                .json(&body),
        )
        .await
    }

    async fn get_run(&self, thread_id: &str, run_id: &str) -> Result<Run> {
        self.send(
            self.http
                .get(self.url(&format!("/threads/{}/runs/{}", thread_id, run_id))),
        )
        .await
    }

    async fn list_events(&self, thread_id: &str, run_id: &str) -> Result<Vec<RunEvent>> {
        self.send(
            self.http
                .get(self.url(&format!("/threads/{}/runs/{}/events", thread_id, run_id))),
        )
        .await
    }
}
