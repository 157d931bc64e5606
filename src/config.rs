//! Environment configuration.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    /// Show the terminal's own cursor at the input caret instead of only the
    /// reverse-video cell.
    pub hardware_cursor: bool,
    /// Mirror every terminal write into this file.
    pub write_log: Option<PathBuf>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            hardware_cursor: env_flag("PIPELINE_TUI_HARDWARE_CURSOR"),
            write_log: env_string_opt("PIPELINE_TUI_WRITE_LOG").map(PathBuf::from),
        }
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
