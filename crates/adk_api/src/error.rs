pub use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdkApiError {
    #[error("API key is required")]
    MissingApiKey,
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("invalid header: {0}")]
    InvalidHeader(String),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: StatusCode, message: String },
    #[error("malformed JSON: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("response contained no events")]
    EmptyResponse,
    #[error("last event {} carried no text part", .event_id.as_deref().unwrap_or("<unnamed>"))]
    MissingReplyText { event_id: Option<String> },
    #[error("agent reported an error ({code}): {message}")]
    AgentFailure { code: String, message: String },
    #[error("session response carried no id")]
    MissingSessionId,
}

impl AdkApiError {
    /// True when the server answered but the body could not be turned into a
    /// session or a reply.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Self::Serde(_)
                | Self::EmptyResponse
                | Self::MissingReplyText { .. }
                | Self::AgentFailure { .. }
                | Self::MissingSessionId
        )
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    detail: Option<serde_json::Value>,
    error: Option<ErrorPayloadFields>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorPayloadFields {
    Text(String),
    Object { message: Option<String> },
}

impl ErrorPayload {
    fn message(self) -> Option<String> {
        let detail = match self.detail {
            Some(serde_json::Value::String(text)) => Some(text),
            Some(serde_json::Value::Null) | None => None,
            Some(other) => Some(other.to_string()),
        };
        let error = self.error.and_then(|error| match error {
            ErrorPayloadFields::Text(text) => Some(text),
            ErrorPayloadFields::Object { message } => message,
        });

        detail
            .or(error)
            .or(self.message)
            .map(|message| message.trim().to_string())
            .filter(|message| !message.is_empty())
    }
}

/// Best-effort human message for a non-success response body.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        if let Some(message) = payload.message() {
            return message;
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
