use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use adk_api::{reply_text, AdkApiClient, AdkApiConfig, AdkApiError, RunRequest};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

fn allow_local_integration() -> bool {
    std::env::var("ADK_API_ALLOW_LOCAL_INTEGRATION")
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

async fn send(client: &AdkApiClient, session_id: &str, text: &str) -> Result<String, AdkApiError> {
    let request = RunRequest::user_text("CodePipelineAgent", "simple_user", session_id, text);
    let events = client.run(&request).await?;
    reply_text(&events)
}

#[derive(Clone)]
enum ScriptedResponse {
    Respond { status: u16, body: String },
    Reset,
}

#[derive(Debug, Clone)]
struct ObservedRequest {
    head: String,
    body: Vec<u8>,
}

impl ObservedRequest {
    fn request_line(&self) -> &str {
        self.head.lines().next().unwrap_or_default()
    }

    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body should be JSON")
    }
}

struct ScriptedServer {
    base_url: String,
    observed: Arc<Mutex<Vec<ObservedRequest>>>,
    handle: JoinHandle<()>,
}

impl ScriptedServer {
    async fn new(scripts: Vec<ScriptedResponse>) -> Self {
        let scripts = Arc::new(scripts);
        let request_count = Arc::new(AtomicUsize::new(0));
        let observed = Arc::new(Mutex::new(Vec::new()));
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("local TCP listener should bind");
        let addr = listener
            .local_addr()
            .expect("resolved local listener address");
        let base_url = format!("http://{addr}/api");

        let handle = tokio::spawn({
            let observed = Arc::clone(&observed);

            async move {
                loop {
                    let (socket, _) = match listener.accept().await {
                        Ok(pair) => pair,
                        Err(_) => break,
                    };
                    let scripts = Arc::clone(&scripts);
                    let request_count = Arc::clone(&request_count);
                    let observed = Arc::clone(&observed);
                    tokio::spawn(async move {
                        serve_one(socket, scripts, request_count, observed).await;
                    });
                }
            }
        });

        Self {
            base_url,
            observed,
            handle,
        }
    }

    fn observed(&self) -> Vec<ObservedRequest> {
        self.observed.lock().expect("observed lock").clone()
    }

    fn client(&self) -> AdkApiClient {
        AdkApiClient::new(AdkApiConfig::new("test-key").with_base_url(&self.base_url))
            .expect("client")
    }

    fn shutdown(&self) {
        self.handle.abort();
    }
}

fn response_json(status: u16, body: &str) -> ScriptedResponse {
    ScriptedResponse::Respond {
        status,
        body: body.to_string(),
    }
}

#[tokio::test]
async fn create_session_returns_server_assigned_id() {
    if !allow_local_integration() {
        return;
    }

    let server = ScriptedServer::new(vec![response_json(
        200,
        r#"{"id":"srv-1","appName":"CodePipelineAgent","userId":"simple_user","lastUpdateTime":1,"events":[],"state":{}}"#,
    )])
    .await;

    let record = server
        .client()
        .create_session("client-seed")
        .await
        .expect("session");

    assert_eq!(record.id, "srv-1");
    let observed = server.observed();
    assert_eq!(
        observed[0].request_line(),
        "POST /api/apps/CodePipelineAgent/users/simple_user/sessions HTTP/1.1"
    );
    assert_eq!(observed[0].json()["sessionId"], "client-seed");
    server.shutdown();
}

#[tokio::test]
async fn run_reply_is_last_event_text() {
    if !allow_local_integration() {
        return;
    }

    let server = ScriptedServer::new(vec![response_json(
        200,
        r#"[{"author":"planner","content":{"parts":[{"text":"plan"}]}},{"author":"coder","content":{"parts":[{"text":"code"}]}}]"#,
    )])
    .await;

    let reply = send(&server.client(), "srv-1", "write fizzbuzz")
        .await
        .expect("reply");

    assert_eq!(reply, "code");
    let observed = server.observed();
    assert_eq!(observed[0].request_line(), "POST /api/run HTTP/1.1");
    let body = observed[0].json();
    assert_eq!(body["sessionId"], "srv-1");
    assert_eq!(body["newMessage"]["parts"][0]["text"], "write fizzbuzz");
    assert_eq!(body["streaming"], false);
    server.shutdown();
}

#[tokio::test]
async fn non_success_status_carries_parsed_message() {
    if !allow_local_integration() {
        return;
    }

    let server =
        ScriptedServer::new(vec![response_json(500, r#"{"detail":"pipeline crashed"}"#)]).await;

    let error = send(&server.client(), "srv-1", "hi")
        .await
        .expect_err("500 should fail");

    assert!(matches!(
        &error,
        AdkApiError::Status { status, message }
            if status.as_u16() == 500 && message == "pipeline crashed"
    ));
    assert!(!error.is_decode());
    assert_eq!(server.observed().len(), 1, "failures are not retried");
    server.shutdown();
}

#[tokio::test]
async fn empty_event_list_is_decode_failure() {
    if !allow_local_integration() {
        return;
    }

    let server = ScriptedServer::new(vec![response_json(200, "[]")]).await;

    let error = send(&server.client(), "srv-1", "hi")
        .await
        .expect_err("empty list should fail");

    assert!(matches!(error, AdkApiError::EmptyResponse));
    server.shutdown();
}

#[tokio::test]
async fn malformed_body_is_decode_failure() {
    if !allow_local_integration() {
        return;
    }

    let server = ScriptedServer::new(vec![response_json(200, "<html>oops</html>")]).await;

    let error = send(&server.client(), "srv-1", "hi")
        .await
        .expect_err("html should fail");

    assert!(matches!(error, AdkApiError::Serde(_)));
    assert!(error.is_decode());
    server.shutdown();
}

#[tokio::test]
async fn connection_reset_is_request_error() {
    if !allow_local_integration() {
        return;
    }

    let server = ScriptedServer::new(vec![ScriptedResponse::Reset]).await;

    let error = server
        .client()
        .create_session("seed")
        .await
        .expect_err("reset should fail");

    assert!(matches!(error, AdkApiError::Request(_)));
    server.shutdown();
}

fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Error",
    }
}

async fn serve_one(
    mut socket: TcpStream,
    scripts: Arc<Vec<ScriptedResponse>>,
    request_count: Arc<AtomicUsize>,
    observed: Arc<Mutex<Vec<ObservedRequest>>>,
) {
    let Ok(request) = read_request(&mut socket).await else {
        return;
    };
    observed.lock().expect("observed lock").push(request);

    let index = request_count.fetch_add(1, Ordering::AcqRel);
    let response = scripts
        .get(index)
        .cloned()
        .unwrap_or_else(|| response_json(500, r#"{"detail":"unexpected request"}"#));

    match response {
        ScriptedResponse::Reset => {}
        ScriptedResponse::Respond { status, body } => {
            let response = format!(
                "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                status_reason(status),
                body.len(),
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    }
}

async fn read_request(socket: &mut TcpStream) -> std::io::Result<ObservedRequest> {
    let mut request = Vec::new();
    let mut buffer = [0_u8; 2048];

    let head_end = loop {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            return Err(std::io::ErrorKind::UnexpectedEof.into());
        }
        request.extend_from_slice(&buffer[..n]);
        if let Some(position) = request.windows(4).position(|window| window == b"\r\n\r\n") {
            break position + 4;
        }
    };

    let head = String::from_utf8_lossy(&request[..head_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    while request.len() < head_end + content_length {
        let n = socket.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&buffer[..n]);
    }

    Ok(ObservedRequest {
        head,
        body: request[head_end..].to_vec(),
    })
}
