use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::AdkApiError;
use crate::payload::Content;

/// Servers written in Go encode nil slices and maps as `null`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One event from a `/run` response list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentEvent {
    pub id: Option<String>,
    pub time: Option<f64>,
    pub invocation_id: Option<String>,
    pub branch: Option<String>,
    pub author: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub partial: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub long_running_tool_ids: Vec<String>,
    pub content: Option<Content>,
    #[serde(deserialize_with = "null_as_default")]
    pub turn_complete: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub interrupted: bool,
    pub error_code: Option<String>,
    pub error_message: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub actions: EventActions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventActions {
    #[serde(deserialize_with = "null_as_default")]
    pub state_delta: Map<String, Value>,
    #[serde(deserialize_with = "null_as_default")]
    pub artifact_delta: BTreeMap<String, i64>,
}

impl AgentEvent {
    pub fn text(&self) -> Option<&str> {
        self.content.as_ref().and_then(Content::first_text)
    }

    fn failure(&self) -> Option<AdkApiError> {
        let message = self
            .error_message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())?;
        Some(AdkApiError::AgentFailure {
            code: self
                .error_code
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
            message: message.to_string(),
        })
    }
}

/// Reply text of a run: the first text part of the last event.
///
/// Earlier events are intermediate pipeline output and are ignored.
pub fn reply_text(events: &[AgentEvent]) -> Result<String, AdkApiError> {
    let last = events.last().ok_or(AdkApiError::EmptyResponse)?;
    if let Some(text) = last.text() {
        return Ok(text.to_string());
    }

    Err(last.failure().unwrap_or_else(|| AdkApiError::MissingReplyText {
        event_id: last.id.clone(),
    }))
}
