//! Void backend client struct and builder.

use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;
use void_auth::{CredentialProvider, NoCredentials};
use void_session::{SessionError, SessionStore, resolve_session_id};
use void_stream::consume_stream;
use void_types::{SessionId, StreamError, StreamOutcome, StreamRequest};

use crate::config::ClientConfig;
use crate::error::{map_http_status, map_reqwest_error};
use crate::handle::StreamHandle;

/// Client for the Void System streaming chat endpoint.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use void_auth::EnvCredentials;
/// use void_client::VoidClient;
///
/// let client = VoidClient::new()
///     .base_url("http://localhost:8000")
///     .credentials(Arc::new(EnvCredentials::default()));
/// ```
#[derive(Clone)]
pub struct VoidClient {
    pub(crate) config: ClientConfig,
    pub(crate) credentials: Arc<dyn CredentialProvider>,
    /// Shared HTTP client.
    pub(crate) client: reqwest::Client,
}

impl VoidClient {
    /// Create a client with default settings and no credentials.
    ///
    /// Default endpoint: `http://localhost:8000/api/stream-chat`, with a
    /// cookie store and a 10 s connect timeout.
    #[must_use]
    pub fn new() -> Self {
        let config = ClientConfig::default();
        let client = http_client(&config).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to a plain HTTP client");
            reqwest::Client::new()
        });
        Self {
            config,
            credentials: Arc::new(NoCredentials),
            client,
        }
    }

    /// Create a client from a validated [`ClientConfig`].
    ///
    /// The HTTP client is built with the configured connect timeout and
    /// cookie store.
    pub fn from_config(config: ClientConfig) -> Result<Self, StreamError> {
        config.validate()?;
        let client = http_client(&config).map_err(|e| {
            StreamError::InvalidConfig(format!("failed to build HTTP client: {e}"))
        })?;
        Ok(Self {
            config,
            credentials: Arc::new(NoCredentials),
            client,
        })
    }

    /// Create a client from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self, StreamError> {
        Self::from_config(ClientConfig::from_env()?)
    }

    /// Override the backend origin.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Override the streaming endpoint path, e.g. the legacy `/stream-chat`.
    #[must_use]
    pub fn stream_path(mut self, path: impl Into<String>) -> Self {
        self.config.stream_path = path.into();
        self
    }

    /// Set the provider consulted for a bearer token before each request.
    #[must_use]
    pub fn credentials(mut self, provider: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = provider;
        self
    }

    /// Use a preconfigured [`reqwest::Client`].
    ///
    /// The client's own cookie and timeout settings apply. A timeout is still
    /// reported as [`StreamError::Timeout`] carrying the configured
    /// `connect_timeout_ms`, not the duration the given client enforced.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start one streaming exchange.
    ///
    /// `on_message(content, finished)` runs once per payload, in order.
    /// `on_error` runs at most once, when the request is rejected or the
    /// transport fails before a terminal payload. After cancellation neither
    /// callback runs.
    ///
    /// Must be called from within a tokio runtime.
    pub fn consume<M, E>(
        &self,
        request: StreamRequest,
        on_message: M,
        on_error: E,
    ) -> StreamHandle
    where
        M: FnMut(&str, bool) + Send + 'static,
        E: FnOnce(StreamError) + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let exchange = Exchange {
            client: self.client.clone(),
            credentials: Arc::clone(&self.credentials),
            url: self.config.stream_url(),
            connect_timeout: self.config.connect_timeout(),
            request,
        };
        let token = cancel.clone();
        let task = tokio::spawn(async move {
            match exchange.run(&token, on_message).await {
                Ok(outcome) => Some(outcome),
                Err(_) if token.is_cancelled() => Some(StreamOutcome::Cancelled),
                Err(e) => {
                    tracing::warn!(error = %e, "streaming exchange failed");
                    on_error(e);
                    None
                }
            }
        });
        StreamHandle::new(cancel, task)
    }

    /// Stream a persona chat turn.
    pub fn stream_persona<M, E>(
        &self,
        text: impl Into<String>,
        session_id: Option<SessionId>,
        on_message: M,
        on_error: E,
    ) -> StreamHandle
    where
        M: FnMut(&str, bool) + Send + 'static,
        E: FnOnce(StreamError) + Send + 'static,
    {
        self.consume(StreamRequest::persona(text, session_id), on_message, on_error)
    }

    /// Stream a persona chat turn under the session id persisted in `store`,
    /// creating one on first use.
    pub async fn stream_persona_with_store<M, E>(
        &self,
        text: impl Into<String>,
        store: &dyn SessionStore,
        on_message: M,
        on_error: E,
    ) -> Result<StreamHandle, SessionError>
    where
        M: FnMut(&str, bool) + Send + 'static,
        E: FnOnce(StreamError) + Send + 'static,
    {
        let session_id = resolve_session_id(store).await?;
        Ok(self.stream_persona(text, Some(session_id), on_message, on_error))
    }

    /// Stream an advisor answer on `topic`.
    pub fn stream_advisor<M, E>(
        &self,
        topic: impl Into<String>,
        on_message: M,
        on_error: E,
    ) -> StreamHandle
    where
        M: FnMut(&str, bool) + Send + 'static,
        E: FnOnce(StreamError) + Send + 'static,
    {
        self.consume(StreamRequest::advisor(topic), on_message, on_error)
    }

    /// Stream a Q&A answer to `question`.
    pub fn stream_qa<M, E>(
        &self,
        question: impl Into<String>,
        on_message: M,
        on_error: E,
    ) -> StreamHandle
    where
        M: FnMut(&str, bool) + Send + 'static,
        E: FnOnce(StreamError) + Send + 'static,
    {
        self.consume(StreamRequest::qa(question), on_message, on_error)
    }
}

impl Default for VoidClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for VoidClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoidClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Build the HTTP client for `config`: connect timeout and optional cookie
/// store.
fn http_client(config: &ClientConfig) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(config.connect_timeout())
        .cookie_store(config.cookies)
        .build()
}

/// Everything one spawned exchange owns.
struct Exchange {
    client: reqwest::Client,
    credentials: Arc<dyn CredentialProvider>,
    url: String,
    connect_timeout: std::time::Duration,
    request: StreamRequest,
}

impl Exchange {
    async fn run<M>(
        self,
        cancel: &CancellationToken,
        on_message: M,
    ) -> Result<StreamOutcome, StreamError>
    where
        M: FnMut(&str, bool) + Send,
    {
        let response = tokio::select! {
            biased;
            () = cancel.cancelled() => return Ok(StreamOutcome::Cancelled),
            response = self.send() => response?,
        };
        consume_stream(response.bytes_stream(), cancel, on_message).await
    }

    /// Open the POST and check its status.
    async fn send(&self) -> Result<reqwest::Response, StreamError> {
        let token = self
            .credentials
            .bearer_token()
            .await
            .map_err(|e| StreamError::Credentials(e.to_string()))?;

        let mut builder = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "text/event-stream")
            .json(&self.request);
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            builder = token.with_secret(|secret| builder.bearer_auth(secret));
        }

        tracing::debug!(url = %self.url, kind = %self.request.kind(), "sending streaming request");

        let response = builder
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.connect_timeout))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(map_http_status(status, &body));
        }

        tracing::debug!(status = %status, "stream opened");
        Ok(response)
    }
}
