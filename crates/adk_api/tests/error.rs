use reqwest::StatusCode;

use adk_api::error::parse_error_message;

#[test]
fn parse_error_message_prefers_detail_field() {
    let body = r#"{"detail":"Session not found"}"#;
    assert_eq!(
        parse_error_message(StatusCode::NOT_FOUND, body),
        "Session not found"
    );
}

#[test]
fn parse_error_message_reads_nested_error_message() {
    let body = r#"{"error":{"code":"bad_request","message":"invalid app"}}"#;
    assert_eq!(
        parse_error_message(StatusCode::BAD_REQUEST, body),
        "invalid app"
    );
}

#[test]
fn parse_error_message_reads_string_error() {
    let body = r#"{"error":"app not loaded"}"#;
    assert_eq!(
        parse_error_message(StatusCode::INTERNAL_SERVER_ERROR, body),
        "app not loaded"
    );
}

#[test]
fn parse_error_message_falls_back_to_raw_body() {
    assert_eq!(
        parse_error_message(StatusCode::INTERNAL_SERVER_ERROR, "raw failure text\n"),
        "raw failure text"
    );
}

#[test]
fn parse_error_message_falls_back_to_status_reason_for_empty_body() {
    assert_eq!(
        parse_error_message(StatusCode::BAD_GATEWAY, ""),
        "Bad Gateway"
    );
}
