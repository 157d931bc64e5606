use agent_transport::{Session, TransportError};
use pipeline_chat::app::{App, Command, Event, Phase, Speaker, TranscriptEntry};

fn session() -> Session {
    Session::new("server-assigned", "CodePipelineAgent", "simple_user")
}

fn ready_app() -> App {
    let mut app = App::new();
    let commands = app.handle_event(Event::BootstrapResult(Ok(session())));
    assert!(commands.is_empty());
    assert_eq!(app.phase(), &Phase::Ready);
    app
}

fn send_commands(commands: &[Command]) -> Vec<&Command> {
    commands
        .iter()
        .filter(|command| matches!(command, Command::SendMessage { .. }))
        .collect()
}

fn entry(speaker: Speaker, text: &str) -> TranscriptEntry {
    TranscriptEntry {
        speaker,
        text: text.to_string(),
        pending: false,
    }
}

#[test]
fn submits_while_in_flight_never_issue_a_second_send() {
    let mut app = ready_app();
    let first = app.handle_event(Event::Submit("first".to_string()));
    assert_eq!(send_commands(&first).len(), 1);

    for text in ["again", "and again", "one more"] {
        let commands = app.handle_event(Event::Submit(text.to_string()));
        assert!(commands.is_empty(), "submit of '{text}' issued {commands:?}");
    }
    assert_eq!(app.transcript().len(), 2);

    app.handle_event(Event::ResponseOk {
        request: 1,
        text: "done".to_string(),
    });
    let next = app.handle_event(Event::Submit("after".to_string()));
    assert_eq!(send_commands(&next).len(), 1);
}

#[test]
fn submit_before_bootstrap_resolves_issues_nothing() {
    let mut app = App::new();
    assert_eq!(app.start(), vec![Command::Bootstrap]);

    let commands = app.handle_event(Event::Submit("hello".to_string()));
    assert!(commands.is_empty());
    assert!(app.transcript().is_empty());
    assert_eq!(app.phase(), &Phase::Bootstrapping { failure: None });
}

#[test]
fn submit_then_reply_appends_exactly_one_agent_entry() {
    let mut app = ready_app();
    app.handle_event(Event::Submit("add a health check".to_string()));
    app.handle_event(Event::ResponseOk {
        request: 1,
        text: "Plan: expose /healthz".to_string(),
    });

    assert_eq!(
        app.transcript(),
        &[
            entry(Speaker::User, "add a health check"),
            entry(Speaker::Agent, "Plan: expose /healthz"),
        ]
    );
    assert!(!app.in_flight());
}

#[test]
fn failed_reply_replaces_placeholder_with_error_text() {
    let mut app = ready_app();
    app.handle_event(Event::Submit("hi".to_string()));
    app.handle_event(Event::ResponseFail {
        request: 1,
        error: TransportError::SendDecode("response contained no events".to_string()),
    });

    assert_eq!(
        app.transcript(),
        &[
            entry(Speaker::User, "hi"),
            entry(
                Speaker::Agent,
                "response decode failed: response contained no events"
            ),
        ]
    );
    assert_eq!(app.phase(), &Phase::Ready);
}

#[test]
fn failed_bootstrap_keeps_sends_disabled() {
    let mut app = App::new();
    let commands = app.handle_event(Event::BootstrapResult(Err(TransportError::Bootstrap(
        "connection refused".to_string(),
    ))));
    assert!(commands.is_empty());
    assert_eq!(
        app.phase(),
        &Phase::Bootstrapping {
            failure: Some("connection refused".to_string())
        }
    );

    assert!(app.handle_event(Event::Submit("x".to_string())).is_empty());
    assert!(app.transcript().is_empty());
    assert!(app.session().is_none());
}

#[test]
fn two_quick_submits_send_only_the_first() {
    let mut app = ready_app();
    let mut commands = app.handle_event(Event::Submit("first".to_string()));
    commands.extend(app.handle_event(Event::Submit("second".to_string())));

    let sends = send_commands(&commands);
    assert_eq!(sends.len(), 1);
    assert!(matches!(
        sends[0],
        Command::SendMessage { text, session, .. }
            if text == "first" && session.id == "server-assigned"
    ));
}

#[test]
fn placeholder_renders_with_indicator_until_reply() {
    let mut app = ready_app();
    app.handle_event(Event::Submit("hi".to_string()));

    let state = app.renderable_state();
    assert!(state.contains("⠋"), "{state:?}");
    assert!(state.contains("thinking…"), "{state:?}");

    app.handle_event(Event::ResponseOk {
        request: 1,
        text: "hello".to_string(),
    });
    let state = app.renderable_state();
    assert!(!state.contains("thinking…"));
    assert!(state.ends_with("hello"));
}

#[test]
fn empty_transcript_renders_welcome_text() {
    let app = App::new();
    assert!(app.renderable_state().starts_with("Welcome to the chat room!"));
}

#[test]
fn submitted_text_is_trimmed_before_echo_and_send() {
    let mut app = ready_app();
    let commands = app.handle_event(Event::Submit("  hello  ".to_string()));

    assert_eq!(app.transcript()[0], entry(Speaker::User, "hello"));
    let sends = send_commands(&commands);
    assert_eq!(sends.len(), 1);
    assert!(matches!(
        sends[0],
        Command::SendMessage { text, .. } if text == "hello"
    ));
}
