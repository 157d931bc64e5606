//! Session controller: the chat state machine.
//!
//! [`App::handle_event`] is the only way state changes. It never blocks and
//! never performs I/O; anything asynchronous is returned as a [`Command`] and
//! comes back later as an [`Event`].

use std::time::Duration;

use agent_transport::{Session, TransportError};

use crate::indicator::{Indicator, TICK_INTERVAL};

pub type RequestId = u64;

pub const WELCOME_TEXT: &str = "Welcome to the chat room!\nType a message and press Enter to send.";
pub const PLACEHOLDER_TEXT: &str = "thinking…";

const USER_PREFIX: &str = "You: ";
const AGENT_PREFIX: &str = "AI: ";

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

fn magenta(text: &str) -> String {
    ansi_wrap(text, "\x1b[35m", "\x1b[39m")
}

fn orange(text: &str) -> String {
    ansi_wrap(text, "\x1b[38;5;202m", "\x1b[39m")
}

fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Agent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    pub speaker: Speaker,
    pub text: String,
    /// Placeholder for a reply that has not arrived yet.
    pub pending: bool,
}

impl TranscriptEntry {
    fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            pending: false,
        }
    }

    fn placeholder() -> Self {
        Self {
            speaker: Speaker::Agent,
            text: PLACEHOLDER_TEXT.to_string(),
            pending: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a session. `failure` is set once the single attempt failed.
    Bootstrapping { failure: Option<String> },
    Ready,
    Sending { request: RequestId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    BootstrapResult(Result<Session, TransportError>),
    Submit(String),
    ResponseOk { request: RequestId, text: String },
    ResponseFail { request: RequestId, error: TransportError },
    Tick { request: RequestId },
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Bootstrap,
    SendMessage {
        request: RequestId,
        session: Session,
        text: String,
    },
    ScheduleTick {
        request: RequestId,
        after: Duration,
    },
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    phase: Phase,
    session: Option<Session>,
    transcript: Vec<TranscriptEntry>,
    indicator: Indicator,
    next_request: RequestId,
    should_exit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            phase: Phase::Bootstrapping { failure: None },
            session: None,
            transcript: Vec::new(),
            indicator: Indicator::new(),
            next_request: 1,
            should_exit: false,
        }
    }

    /// Commands to issue once at startup.
    pub fn start(&self) -> Vec<Command> {
        vec![Command::Bootstrap]
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn indicator(&self) -> &Indicator {
        &self.indicator
    }

    pub fn in_flight(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn handle_event(&mut self, event: Event) -> Vec<Command> {
        match event {
            Event::BootstrapResult(result) => self.on_bootstrap_result(result),
            Event::Submit(text) => self.on_submit(text),
            Event::ResponseOk { request, text } => self.on_response(request, text),
            Event::ResponseFail { request, error } => {
                tracing::warn!(request, error = %error, "send failed");
                self.on_response(request, error.to_string())
            }
            Event::Tick { request } => self.on_tick(request),
            Event::Quit => {
                self.should_exit = true;
                vec![Command::Exit]
            }
        }
    }

    fn on_bootstrap_result(&mut self, result: Result<Session, TransportError>) -> Vec<Command> {
        if !matches!(self.phase, Phase::Bootstrapping { failure: None }) {
            tracing::warn!("ignoring duplicate bootstrap result");
            return Vec::new();
        }

        match result {
            Ok(session) => {
                tracing::info!(session_id = %session.id, "session ready");
                self.session = Some(session);
                self.phase = Phase::Ready;
            }
            Err(error) => {
                tracing::error!(error = %error, "session bootstrap failed");
                self.phase = Phase::Bootstrapping {
                    failure: Some(error.cause().to_string()),
                };
            }
        }
        Vec::new()
    }

    fn on_submit(&mut self, text: String) -> Vec<Command> {
        let text = text.trim().to_string();
        if text.is_empty() {
            return Vec::new();
        }

        let session = match (&self.phase, &self.session) {
            (Phase::Ready, Some(session)) => session.clone(),
            (Phase::Sending { request }, _) => {
                tracing::debug!(request, "submit rejected: request in flight");
                return Vec::new();
            }
            _ => {
                tracing::debug!("submit rejected: session not ready");
                return Vec::new();
            }
        };

        let request = self.next_request;
        self.next_request += 1;

        self.transcript.push(TranscriptEntry::user(text.clone()));
        self.transcript.push(TranscriptEntry::placeholder());
        self.indicator.reset();
        self.phase = Phase::Sending { request };
        tracing::info!(request, chars = text.chars().count(), "dispatching message");

        vec![
            Command::SendMessage {
                request,
                session,
                text,
            },
            Command::ScheduleTick {
                request,
                after: TICK_INTERVAL,
            },
        ]
    }

    fn on_response(&mut self, request: RequestId, text: String) -> Vec<Command> {
        if self.phase != (Phase::Sending { request }) {
            tracing::warn!(request, "ignoring response for inactive request");
            return Vec::new();
        }

        match self.transcript.iter_mut().rev().find(|entry| entry.pending) {
            Some(entry) => {
                entry.text = text;
                entry.pending = false;
            }
            None => self.transcript.push(TranscriptEntry {
                speaker: Speaker::Agent,
                text,
                pending: false,
            }),
        }

        self.indicator.reset();
        self.phase = Phase::Ready;
        tracing::info!(request, "request resolved");
        Vec::new()
    }

    fn on_tick(&mut self, request: RequestId) -> Vec<Command> {
        if self.phase != (Phase::Sending { request }) {
            tracing::trace!(request, "stale tick");
            return Vec::new();
        }

        self.indicator.advance();
        vec![Command::ScheduleTick {
            request,
            after: TICK_INTERVAL,
        }]
    }

    /// Scrollback text: the welcome message, or one styled line per entry.
    pub fn renderable_state(&self) -> String {
        if self.transcript.is_empty() {
            return WELCOME_TEXT.to_string();
        }

        self.transcript
            .iter()
            .map(|entry| match (entry.speaker, entry.pending) {
                (Speaker::User, _) => format!("{}{}", magenta(USER_PREFIX), entry.text),
                (Speaker::Agent, true) => format!(
                    "{}{} {}",
                    orange(AGENT_PREFIX),
                    self.indicator.glyph(),
                    dim(&entry.text)
                ),
                (Speaker::Agent, false) => format!("{}{}", orange(AGENT_PREFIX), entry.text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn status_line(&self) -> String {
        match &self.phase {
            Phase::Bootstrapping { failure: None } => "connecting…".to_string(),
            Phase::Bootstrapping {
                failure: Some(cause),
            } => format!("session unavailable: {cause} (sending disabled)"),
            Phase::Ready => match &self.session {
                Some(session) => format!("session {}", session.id),
                None => String::new(),
            },
            Phase::Sending { .. } => format!("{} waiting for agent", self.indicator.glyph()),
        }
    }
}
