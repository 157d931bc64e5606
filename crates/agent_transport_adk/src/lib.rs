//! `adk_api`-backed implementation of the `agent_transport` contract.
//!
//! Each blocking call drives one async exchange to completion on a private
//! current-thread runtime and maps `adk_api` failures onto the transport
//! error taxonomy.

use std::sync::Arc;
use std::time::Duration;

use adk_api::{
    reply_text, AdkApiClient, AdkApiConfig, AdkApiError, AgentEvent, RunRequest, SessionRecord,
};
use agent_transport::{AgentTransport, Session, TransportError, TransportInitError};
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Stable transport identifier used for startup selection.
pub const ADK_TRANSPORT_ID: &str = "adk";

/// Startup configuration for the agent API transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdkTransportConfig {
    pub api_key: String,
    pub base_url: Option<String>,
    pub app_name: Option<String>,
    pub user_id: Option<String>,
    pub timeout: Option<Duration>,
}

impl AdkTransportConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
            app_name: None,
            user_id: None,
            timeout: None,
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    #[must_use]
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn into_adk_api_config(self) -> AdkApiConfig {
        let mut config = AdkApiConfig::new(self.api_key);

        if let Some(base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }

        if let Some(app_name) = non_blank(self.app_name) {
            config = config.with_app_name(app_name);
        }

        if let Some(user_id) = non_blank(self.user_id) {
            config = config.with_user_id(user_id);
        }

        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }

        config
    }
}

trait ApiClient: Send + Sync {
    fn create_session(&self, seed: &str) -> Result<SessionRecord, AdkApiError>;

    fn run(&self, request: &RunRequest) -> Result<Vec<AgentEvent>, AdkApiError>;
}

#[derive(Debug)]
struct DefaultApiClient {
    client: AdkApiClient,
    runtime: Runtime,
}

impl ApiClient for DefaultApiClient {
    fn create_session(&self, seed: &str) -> Result<SessionRecord, AdkApiError> {
        self.runtime.block_on(self.client.create_session(seed))
    }

    fn run(&self, request: &RunRequest) -> Result<Vec<AgentEvent>, AdkApiError> {
        self.runtime.block_on(self.client.run(request))
    }
}

/// `AgentTransport` adapter backed by `adk_api`.
pub struct AdkTransport {
    app_name: String,
    user_id: String,
    client: Arc<dyn ApiClient>,
}

impl AdkTransport {
    /// Creates a transport against a real agent API server.
    ///
    /// Fails when the API key is blank or the base URL cannot be used.
    pub fn new(config: AdkTransportConfig) -> Result<Self, TransportInitError> {
        let config = config.into_adk_api_config();
        let app_name = config.app_name.clone();
        let user_id = config.user_id.clone();
        let client = AdkApiClient::new(config).map_err(map_init_error)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|error| {
                TransportInitError::new(format!("failed to initialize tokio runtime: {error}"))
            })?;

        Ok(Self {
            app_name,
            user_id,
            client: Arc::new(DefaultApiClient { client, runtime }),
        })
    }

    #[cfg(test)]
    fn with_client_for_tests(client: Arc<dyn ApiClient>) -> Self {
        Self {
            app_name: adk_api::config::DEFAULT_APP_NAME.to_string(),
            user_id: adk_api::config::DEFAULT_USER_ID.to_string(),
            client,
        }
    }
}

impl AgentTransport for AdkTransport {
    fn transport_id(&self) -> &str {
        ADK_TRANSPORT_ID
    }

    fn bootstrap(&self) -> Result<Session, TransportError> {
        let seed = Uuid::new_v4().to_string();
        tracing::info!(
            seed = %seed,
            app = %self.app_name,
            user = %self.user_id,
            "creating agent session"
        );

        let record = self
            .client
            .create_session(&seed)
            .map_err(|error| TransportError::Bootstrap(error.to_string()))?;
        if record.id != seed {
            tracing::debug!(
                seed = %seed,
                session_id = %record.id,
                "server assigned its own session id"
            );
        }

        Ok(Session::new(
            record.id,
            or_default(record.app_name, &self.app_name),
            or_default(record.user_id, &self.user_id),
        ))
    }

    fn send_message(&self, session: &Session, text: &str) -> Result<String, TransportError> {
        let request = RunRequest::user_text(
            session.app_name.clone(),
            session.user_id.clone(),
            session.id.clone(),
            text,
        );
        let events = self.client.run(&request).map_err(map_send_error)?;
        tracing::debug!(session_id = %session.id, events = events.len(), "run returned events");
        reply_text(&events).map_err(map_send_error)
    }
}

fn map_send_error(error: AdkApiError) -> TransportError {
    if error.is_decode() {
        TransportError::SendDecode(error.to_string())
    } else {
        TransportError::SendTransport(error.to_string())
    }
}

fn map_init_error(error: AdkApiError) -> TransportInitError {
    TransportInitError::new(format!("Failed to initialize adk transport: {error}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn or_default(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
