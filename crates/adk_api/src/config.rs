use std::collections::BTreeMap;
use std::time::Duration;

use crate::url::DEFAULT_ADK_BASE_URL;

/// Default agent application served by the pipeline server.
pub const DEFAULT_APP_NAME: &str = "CodePipelineAgent";
/// Default user the client speaks as.
pub const DEFAULT_USER_ID: &str = "simple_user";

/// Transport configuration for agent API requests.
#[derive(Debug, Clone)]
pub struct AdkApiConfig {
    /// Credential passed as `Authorization: Bearer`.
    pub api_key: String,
    /// Base URL the `/apps/...` and `/run` paths hang off.
    pub base_url: String,
    /// Agent application name.
    pub app_name: String,
    /// User identifier for session and run calls.
    pub user_id: String,
    /// Optional `User-Agent` override.
    pub user_agent: Option<String>,
    /// Additional headers merged into request headers.
    pub extra_headers: BTreeMap<String, String>,
    /// Optional request timeout.
    pub timeout: Option<Duration>,
}

impl Default for AdkApiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_ADK_BASE_URL.to_string(),
            app_name: DEFAULT_APP_NAME.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
            user_agent: None,
            extra_headers: BTreeMap::new(),
            timeout: None,
        }
    }
}

impl AdkApiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn insert_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(key.into(), value.into());
        self
    }
}
