//! Startup transport selection.

use std::sync::Arc;
use std::time::Duration;

use agent_transport::{AgentTransport, TransportInitError};
use agent_transport_adk::{AdkTransport, AdkTransportConfig, ADK_TRANSPORT_ID};
use agent_transport_mock::{MockTransport, MOCK_TRANSPORT_ID};

pub const TRANSPORT_ENV_VAR: &str = "PIPELINE_CHAT_TRANSPORT";
pub const API_KEY_ENV_VAR: &str = "PIPELINE_CHAT_API_KEY";
pub const BASE_URL_ENV_VAR: &str = "PIPELINE_CHAT_BASE_URL";
pub const APP_NAME_ENV_VAR: &str = "PIPELINE_CHAT_APP_NAME";
pub const USER_ID_ENV_VAR: &str = "PIPELINE_CHAT_USER_ID";
pub const TIMEOUT_ENV_VAR: &str = "PIPELINE_CHAT_TIMEOUT_SEC";

pub const DEFAULT_TRANSPORT_ID: &str = ADK_TRANSPORT_ID;

/// Transport settings read once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransportSettings {
    pub transport_id: Option<String>,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub app_name: Option<String>,
    pub user_id: Option<String>,
    pub timeout_sec: Option<String>,
}

impl TransportSettings {
    pub fn from_env() -> Self {
        Self {
            transport_id: env_string_opt(TRANSPORT_ENV_VAR),
            api_key: env_string_opt(API_KEY_ENV_VAR),
            base_url: env_string_opt(BASE_URL_ENV_VAR),
            app_name: env_string_opt(APP_NAME_ENV_VAR),
            user_id: env_string_opt(USER_ID_ENV_VAR),
            timeout_sec: env_string_opt(TIMEOUT_ENV_VAR),
        }
    }

    fn timeout(&self) -> Result<Option<Duration>, TransportInitError> {
        let Some(raw) = self.timeout_sec.as_deref() else {
            return Ok(None);
        };
        match raw.trim().parse::<u64>() {
            Ok(seconds) if seconds > 0 => Ok(Some(Duration::from_secs(seconds))),
            _ => Err(TransportInitError::new(format!(
                "{TIMEOUT_ENV_VAR} must be a positive number of seconds, got '{raw}'"
            ))),
        }
    }
}

pub fn transport_from_env() -> Result<Arc<dyn AgentTransport>, TransportInitError> {
    transport_from_settings(&TransportSettings::from_env())
}

pub fn transport_from_settings(
    settings: &TransportSettings,
) -> Result<Arc<dyn AgentTransport>, TransportInitError> {
    let transport_id = settings
        .transport_id
        .as_deref()
        .map(str::trim)
        .unwrap_or(DEFAULT_TRANSPORT_ID);

    match transport_id {
        ADK_TRANSPORT_ID => {
            let Some(api_key) = settings.api_key.as_deref() else {
                return Err(TransportInitError::new(format!(
                    "{API_KEY_ENV_VAR} is required for the '{ADK_TRANSPORT_ID}' transport"
                )));
            };

            let mut config = AdkTransportConfig::new(api_key);
            if let Some(base_url) = settings.base_url.as_deref() {
                config = config.with_base_url(base_url);
            }
            if let Some(app_name) = settings.app_name.as_deref() {
                config = config.with_app_name(app_name);
            }
            if let Some(user_id) = settings.user_id.as_deref() {
                config = config.with_user_id(user_id);
            }
            if let Some(timeout) = settings.timeout()? {
                config = config.with_timeout(timeout);
            }

            Ok(Arc::new(AdkTransport::new(config)?))
        }
        MOCK_TRANSPORT_ID => Ok(Arc::new(MockTransport::default())),
        unknown => Err(TransportInitError::new(format!(
            "Unsupported transport '{unknown}'. Available transports: {ADK_TRANSPORT_ID}, {MOCK_TRANSPORT_ID}"
        ))),
    }
}

fn env_string_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
