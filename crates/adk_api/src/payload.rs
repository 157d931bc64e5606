use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::events::null_as_default;

/// Role the client speaks with on `/run`.
pub const USER_ROLE: &str = "user";

/// A message body: an ordered list of parts tagged with the speaking role.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub parts: Vec<Part>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Content {
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![Part::text(text)],
            role: Some(USER_ROLE.to_string()),
        }
    }

    /// Text of the first part, when that part is textual.
    pub fn first_text(&self) -> Option<&str> {
        self.parts.first().and_then(|part| part.text.as_deref())
    }
}

/// One content fragment. Non-text fragments (function calls, inline data) are
/// kept verbatim in `other` so they survive a decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            other: Map::new(),
        }
    }
}

/// Request body for `POST {base}/run`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
    pub app_name: String,
    pub user_id: String,
    pub session_id: String,
    pub new_message: Content,
    /// Always sent; replies are collected as one JSON list.
    #[serde(default)]
    pub streaming: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_delta: Option<Map<String, Value>>,
}

impl RunRequest {
    pub fn user_text(
        app_name: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            new_message: Content::user_text(text),
            streaming: false,
            state_delta: None,
        }
    }
}

/// Optional body for session creation; carries the id the client proposes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

impl CreateSessionRequest {
    pub fn proposing(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
        }
    }
}
