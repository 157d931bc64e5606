use url::Url;

use crate::error::AdkApiError;

/// Default base URL of a locally running agent API server.
pub const DEFAULT_ADK_BASE_URL: &str = "http://localhost:8080/api";

/// Normalize a configured base URL.
///
/// Surrounding whitespace and trailing slashes are removed; a blank value falls
/// back to [`DEFAULT_ADK_BASE_URL`].
pub fn normalize_base_url(input: &str) -> String {
    let trimmed = input.trim();
    let base = if trimmed.is_empty() {
        DEFAULT_ADK_BASE_URL
    } else {
        trimmed
    };

    base.trim_end_matches('/').to_string()
}

/// `{base}/apps/{app}/users/{user}/sessions`, with each segment percent-encoded.
pub fn sessions_url(base: &str, app_name: &str, user_id: &str) -> Result<Url, AdkApiError> {
    endpoint(base, &["apps", app_name, "users", user_id, "sessions"])
}

/// `{base}/run`.
pub fn run_url(base: &str) -> Result<Url, AdkApiError> {
    endpoint(base, &["run"])
}

fn endpoint(base: &str, segments: &[&str]) -> Result<Url, AdkApiError> {
    let normalized = normalize_base_url(base);
    let mut url = Url::parse(&normalized)
        .map_err(|error| AdkApiError::InvalidBaseUrl(format!("{normalized}: {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AdkApiError::InvalidBaseUrl(format!(
            "{normalized}: unsupported scheme '{}'",
            url.scheme()
        )));
    }

    url.path_segments_mut()
        .map_err(|()| AdkApiError::InvalidBaseUrl(format!("{normalized}: cannot be a base")))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}
