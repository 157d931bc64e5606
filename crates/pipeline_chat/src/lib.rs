//! Terminal chat client for a remote code-pipeline agent.
//!
//! ## Transport selection
//!
//! `PIPELINE_CHAT_TRANSPORT` picks the transport at startup:
//!
//! - `adk` (default) talks to the agent API server. `PIPELINE_CHAT_API_KEY` is
//!   required; `PIPELINE_CHAT_BASE_URL`, `PIPELINE_CHAT_APP_NAME`,
//!   `PIPELINE_CHAT_USER_ID` and `PIPELINE_CHAT_TIMEOUT_SEC` are optional.
//! - `mock` replies from a fixed script with no network access.
//!
//! Any other value fails startup before the terminal is touched.
//!
//! ## Logging
//!
//! Set `PIPELINE_CHAT_LOG` to a file path to enable logs, and
//! `PIPELINE_CHAT_LOG_FILTER` for `tracing` filter directives (default `info`).

pub mod app;
pub mod indicator;
pub mod logging;
pub mod runtime;
pub mod transport;
pub mod tui;
