//! Deterministic mock implementation of the `agent_transport` contract.
//!
//! No network access. Replies come from a fixed script, which makes the crate
//! useful for offline runs of the chat client and for runtime-level tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;

use agent_transport::{AgentTransport, Session, TransportError};

/// Stable transport identifier used for explicit startup selection.
pub const MOCK_TRANSPORT_ID: &str = "mock";

const MOCK_SESSION_ID: &str = "mock-session";
const MOCK_APP_NAME: &str = "CodePipelineAgent";
const MOCK_USER_ID: &str = "simple_user";

/// One scripted outcome for a send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockReply {
    Text(String),
    TransportFailure(String),
    DecodeFailure(String),
}

impl MockReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}

/// Scripted transport; sends cycle through `replies` in order.
#[derive(Debug)]
pub struct MockTransport {
    replies: Vec<MockReply>,
    delay: Duration,
    bootstrap_failure: Option<String>,
    next_reply: AtomicUsize,
}

impl MockTransport {
    const DEFAULT_DELAY_MS: u64 = 600;

    #[must_use]
    pub fn new(replies: Vec<MockReply>) -> Self {
        let replies = if replies.is_empty() {
            vec![MockReply::text("(no scripted reply)")]
        } else {
            replies
        };

        Self {
            replies,
            delay: Duration::from_millis(Self::DEFAULT_DELAY_MS),
            bootstrap_failure: None,
            next_reply: AtomicUsize::new(0),
        }
    }

    /// Simulated round-trip latency for both operations.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Makes `bootstrap` fail with `cause`.
    #[must_use]
    pub fn with_bootstrap_failure(mut self, cause: impl Into<String>) -> Self {
        self.bootstrap_failure = Some(cause.into());
        self
    }

    fn pause(&self) {
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new(vec![
            MockReply::text("Analysis: the request is a small, self-contained change."),
            MockReply::text("Plan: 1) add the function 2) cover it with a unit test."),
            MockReply::text("```rust\nfn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n```"),
            MockReply::TransportFailure("HTTP 503 Service Unavailable: mock outage".to_string()),
        ])
    }
}

impl AgentTransport for MockTransport {
    fn transport_id(&self) -> &str {
        MOCK_TRANSPORT_ID
    }

    fn bootstrap(&self) -> Result<Session, TransportError> {
        self.pause();
        if let Some(cause) = &self.bootstrap_failure {
            return Err(TransportError::Bootstrap(cause.clone()));
        }
        Ok(Session::new(MOCK_SESSION_ID, MOCK_APP_NAME, MOCK_USER_ID))
    }

    fn send_message(&self, session: &Session, text: &str) -> Result<String, TransportError> {
        self.pause();
        let index = self.next_reply.fetch_add(1, Ordering::AcqRel) % self.replies.len();
        tracing::debug!(
            session_id = %session.id,
            index,
            chars = text.chars().count(),
            "mock send"
        );

        match &self.replies[index] {
            MockReply::Text(reply) => Ok(reply.clone()),
            MockReply::TransportFailure(cause) => {
                Err(TransportError::SendTransport(cause.clone()))
            }
            MockReply::DecodeFailure(cause) => Err(TransportError::SendDecode(cause.clone())),
        }
    }
}
