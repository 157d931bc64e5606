use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::AdkApiError;
use crate::events::{null_as_default, AgentEvent};

/// Session object returned by the session-create endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub app_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub user_id: String,
    pub last_update_time: Option<f64>,
    #[serde(deserialize_with = "null_as_default")]
    pub events: Vec<AgentEvent>,
    #[serde(deserialize_with = "null_as_default")]
    pub state: Map<String, Value>,
}

impl SessionRecord {
    /// Rejects a record without a usable id; the server's id is authoritative.
    pub fn validated(self) -> Result<Self, AdkApiError> {
        if self.id.trim().is_empty() {
            return Err(AdkApiError::MissingSessionId);
        }
        Ok(self)
    }
}
