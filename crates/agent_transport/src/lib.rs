//! Minimal transport-agnostic contract between the chat session controller and
//! a remote conversational agent.
//!
//! This crate defines only the session identity, the two operations a chat
//! needs (bootstrap and send), and the failure taxonomy. Wire formats and HTTP
//! details live in the transport implementations.

use thiserror::Error;

/// Server-assigned session identity. Immutable once bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: String,
    pub app_name: String,
    pub user_id: String,
}

impl Session {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        app_name: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            app_name: app_name.into(),
            user_id: user_id.into(),
        }
    }
}

/// Failure of one bootstrap or send attempt.
///
/// The message keeps the underlying cause so it can be shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Transport or decode failure while creating the session.
    #[error("session bootstrap failed: {0}")]
    Bootstrap(String),
    /// Network-level failure or non-success status on a send.
    #[error("request failed: {0}")]
    SendTransport(String),
    /// The send succeeded at the HTTP level but the body held no usable reply.
    #[error("response decode failed: {0}")]
    SendDecode(String),
}

impl TransportError {
    /// Returns the underlying cause without the category prefix.
    #[must_use]
    pub fn cause(&self) -> &str {
        match self {
            Self::Bootstrap(cause) | Self::SendTransport(cause) | Self::SendDecode(cause) => cause,
        }
    }
}

/// Error returned while constructing a transport, before any session exists.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportInitError {
    message: String,
}

impl TransportInitError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for TransportInitError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for TransportInitError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// Blocking client for one remote agent.
///
/// Both operations perform exactly one exchange with no retry. Hosts call them
/// from worker threads, never from the thread that owns UI state.
pub trait AgentTransport: Send + Sync + 'static {
    /// Stable identifier used for startup selection and logging.
    fn transport_id(&self) -> &str;

    /// Creates a session and returns the identity the server assigned.
    fn bootstrap(&self) -> Result<Session, TransportError>;

    /// Sends one user message and returns the agent's reply text.
    fn send_message(&self, session: &Session, text: &str) -> Result<String, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::{AgentTransport, Session, TransportError, TransportInitError};

    struct EchoTransport;

    impl AgentTransport for EchoTransport {
        fn transport_id(&self) -> &str {
            "echo"
        }

        fn bootstrap(&self) -> Result<Session, TransportError> {
            Ok(Session::new("s-1", "app", "user"))
        }

        fn send_message(&self, session: &Session, text: &str) -> Result<String, TransportError> {
            Ok(format!("{}: {text}", session.id))
        }
    }

    #[test]
    fn transport_is_object_safe() {
        let transport: Box<dyn AgentTransport> = Box::new(EchoTransport);
        let session = transport.bootstrap().expect("bootstrap");
        assert_eq!(
            transport.send_message(&session, "hi").expect("send"),
            "s-1: hi"
        );
    }

    #[test]
    fn error_display_keeps_cause_behind_category() {
        let error = TransportError::SendTransport("HTTP 502 Bad Gateway: upstream down".to_string());
        assert_eq!(
            error.to_string(),
            "request failed: HTTP 502 Bad Gateway: upstream down"
        );
        assert_eq!(error.cause(), "HTTP 502 Bad Gateway: upstream down");

        let decode = TransportError::SendDecode("response contained no events".to_string());
        assert_eq!(
            decode.to_string(),
            "response decode failed: response contained no events"
        );
    }

    #[test]
    fn init_error_converts_from_strings() {
        let from_str: TransportInitError = "missing key".into();
        let from_string: TransportInitError = String::from("missing key").into();
        assert_eq!(from_str, from_string);
        assert_eq!(from_str.message(), "missing key");
        assert_eq!(from_str.to_string(), "missing key");
    }
}
