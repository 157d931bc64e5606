//! Transport-only client primitives for an ADK-style agent API server.
//!
//! This crate owns URL building, request payloads, and response decoding for the
//! session-create and run endpoints. It has no UI coupling and no retry policy:
//! every call is a single HTTP exchange whose failure is reported to the caller.

pub mod client;
pub mod config;
pub mod error;
pub mod events;
pub mod headers;
pub mod payload;
pub mod session;
pub mod url;

pub use client::AdkApiClient;
pub use config::AdkApiConfig;
pub use error::AdkApiError;
pub use events::{reply_text, AgentEvent};
pub use payload::{Content, CreateSessionRequest, Part, RunRequest};
pub use session::SessionRecord;
pub use url::{normalize_base_url, run_url, sessions_url};
