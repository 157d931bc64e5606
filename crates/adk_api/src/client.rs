use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder};

use crate::config::AdkApiConfig;
use crate::error::{parse_error_message, AdkApiError};
use crate::events::AgentEvent;
use crate::headers::build_headers;
use crate::payload::{CreateSessionRequest, RunRequest};
use crate::session::SessionRecord;
use crate::url::{run_url, sessions_url};

#[derive(Debug)]
pub struct AdkApiClient {
    http: Client,
    config: AdkApiConfig,
}

impl AdkApiClient {
    pub fn new(config: AdkApiConfig) -> Result<Self, AdkApiError> {
        // Fail early on a bad credential or base URL rather than on the first call.
        build_headers(&config)?;
        run_url(&config.base_url)?;

        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &AdkApiConfig {
        &self.config
    }

    pub fn build_headers(&self) -> Result<HeaderMap, AdkApiError> {
        let headers = build_headers(&self.config)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            out.insert(
                HeaderName::from_bytes(key.as_bytes())
                    .map_err(|_| AdkApiError::InvalidHeader(format!("invalid header key: {key}")))?,
                HeaderValue::from_str(&value).map_err(|_| {
                    AdkApiError::InvalidHeader(format!("invalid header value for {key}"))
                })?,
            );
        }
        Ok(out)
    }

    /// Session-create request proposing `seed` as the session id.
    pub fn build_create_session_request(&self, seed: &str) -> Result<RequestBuilder, AdkApiError> {
        let url = sessions_url(
            &self.config.base_url,
            &self.config.app_name,
            &self.config.user_id,
        )?;
        Ok(self
            .http
            .post(url)
            .headers(self.build_headers()?)
            .json(&CreateSessionRequest::proposing(seed)))
    }

    pub fn build_run_request(&self, request: &RunRequest) -> Result<RequestBuilder, AdkApiError> {
        let url = run_url(&self.config.base_url)?;
        Ok(self
            .http
            .post(url)
            .headers(self.build_headers()?)
            .json(request))
    }

    /// Creates a session. The returned record carries the server-assigned id,
    /// which may differ from `seed`.
    pub async fn create_session(&self, seed: &str) -> Result<SessionRecord, AdkApiError> {
        let body = execute(self.build_create_session_request(seed)?).await?;
        let record: SessionRecord = serde_json::from_str(&body)?;
        record.validated()
    }

    /// Runs one user turn and returns every event the agent produced, in order.
    pub async fn run(&self, request: &RunRequest) -> Result<Vec<AgentEvent>, AdkApiError> {
        let body = execute(self.build_run_request(request)?).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

async fn execute(builder: RequestBuilder) -> Result<String, AdkApiError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(AdkApiError::Status {
            status,
            message: parse_error_message(status, &body),
        });
    }
    Ok(body)
}
