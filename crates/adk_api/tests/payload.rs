use adk_api::{Content, CreateSessionRequest, Part, RunRequest};
use serde_json::{json, Value};

#[test]
fn run_request_serializes_to_wire_shape() {
    let request = RunRequest::user_text("CodePipelineAgent", "simple_user", "s-1", "hello");
    let body = serde_json::to_value(&request).expect("serialize run request");

    assert_eq!(
        body,
        json!({
            "appName": "CodePipelineAgent",
            "userId": "simple_user",
            "sessionId": "s-1",
            "newMessage": {
                "parts": [{"text": "hello"}],
                "role": "user",
            },
            "streaming": false,
        })
    );
}

#[test]
fn run_request_includes_state_delta_only_when_set() {
    let mut request = RunRequest::user_text("app", "user", "s", "hi");
    assert!(serde_json::to_value(&request)
        .expect("serialize")
        .get("stateDelta")
        .is_none());

    let mut delta = serde_json::Map::new();
    delta.insert("stage".to_string(), Value::String("plan".to_string()));
    request.state_delta = Some(delta);
    let body = serde_json::to_value(&request).expect("serialize");
    assert_eq!(body["stateDelta"]["stage"], "plan");
}

#[test]
fn create_session_request_proposes_seed_id() {
    let body = serde_json::to_value(CreateSessionRequest::proposing("seed-1")).expect("serialize");
    assert_eq!(body, json!({"sessionId": "seed-1"}));
}

#[test]
fn non_text_parts_survive_decode() {
    let content: Content = serde_json::from_value(json!({
        "role": "model",
        "parts": [{"functionCall": {"name": "plan", "args": {}}}, {"text": "later"}],
    }))
    .expect("decode content");

    assert_eq!(content.first_text(), None);
    assert!(content.parts[0].other.contains_key("functionCall"));
    assert_eq!(content.parts[1], Part::text("later"));
}

#[test]
fn null_parts_decode_as_empty() {
    let content: Content =
        serde_json::from_value(json!({"role": "model", "parts": null})).expect("decode content");
    assert!(content.parts.is_empty());
}
