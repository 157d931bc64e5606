use std::collections::BTreeMap;

use crate::config::AdkApiConfig;
use crate::error::AdkApiError;

pub const HEADER_ACCEPT: &str = "accept";
pub const HEADER_CONTENT_TYPE: &str = "content-type";
pub const HEADER_AUTHORIZATION: &str = "authorization";
pub const HEADER_USER_AGENT: &str = "user-agent";

/// Build a deterministic header map for agent API requests.
pub fn build_headers(config: &AdkApiConfig) -> Result<BTreeMap<String, String>, AdkApiError> {
    let api_key = config.api_key.trim();
    if api_key.is_empty() {
        return Err(AdkApiError::MissingApiKey);
    }

    let mut headers = BTreeMap::new();
    headers.insert(HEADER_AUTHORIZATION.to_owned(), format!("Bearer {api_key}"));
    headers.insert(HEADER_ACCEPT.to_owned(), "application/json".to_owned());
    headers.insert(
        HEADER_CONTENT_TYPE.to_owned(),
        "application/json".to_owned(),
    );

    let user_agent = config
        .user_agent
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(default_user_agent);
    headers.insert(HEADER_USER_AGENT.to_owned(), user_agent);

    for (key, value) in &config.extra_headers {
        let key = key.trim().to_ascii_lowercase();
        if key.is_empty() || key == HEADER_AUTHORIZATION {
            continue;
        }
        headers.insert(key, value.trim().to_owned());
    }

    Ok(headers)
}

fn default_user_agent() -> String {
    format!("pipeline_chat/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_headers_cannot_replace_authorization() {
        let config = AdkApiConfig::new("key").insert_header("Authorization", "Bearer other");
        let headers = build_headers(&config).expect("headers");
        assert_eq!(headers[HEADER_AUTHORIZATION], "Bearer key");
    }

    #[test]
    fn blank_user_agent_override_uses_default() {
        let config = AdkApiConfig::new("key").with_user_agent("  ");
        let headers = build_headers(&config).expect("headers");
        assert!(headers[HEADER_USER_AGENT].starts_with("pipeline_chat/"));
    }
}
