//! File logging setup.
//!
//! The terminal belongs to the UI, so logs only ever go to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

pub const LOG_PATH_ENV_VAR: &str = "PIPELINE_CHAT_LOG";
pub const LOG_FILTER_ENV_VAR: &str = "PIPELINE_CHAT_LOG_FILTER";
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub path: Option<PathBuf>,
    pub filter: String,
}

impl LogSettings {
    pub fn from_env() -> Self {
        let path = std::env::var_os(LOG_PATH_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        let filter = std::env::var(LOG_FILTER_ENV_VAR)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self { path, filter }
    }

    /// Parsed filter directives, falling back to the default on bad input.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    }
}

pub fn init_from_env() -> io::Result<bool> {
    init(&LogSettings::from_env())
}

/// Install the global subscriber. Returns false when logging is disabled.
pub fn init(settings: &LogSettings) -> io::Result<bool> {
    let Some(path) = settings.path.as_ref() else {
        return Ok(false);
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    tracing_subscriber::registry()
        .with(settings.env_filter())
        .with(
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .try_init()
        .map_err(io::Error::other)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::{init, LogSettings, DEFAULT_LOG_FILTER};

    #[test]
    fn disabled_without_path() {
        let settings = LogSettings {
            path: None,
            filter: DEFAULT_LOG_FILTER.to_string(),
        };
        assert!(!init(&settings).expect("init"));
    }

    #[test]
    fn bad_filter_falls_back_to_default() {
        let settings = LogSettings {
            path: None,
            filter: "pipeline_chat=notalevel".to_string(),
        };
        assert_eq!(
            settings.env_filter().max_level_hint(),
            Some(tracing::level_filters::LevelFilter::INFO)
        );
    }
}
