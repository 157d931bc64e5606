//! Event loop that connects the controller to the terminal and the transport.
//!
//! Everything that happens off the loop thread (stdin reads, resizes, network
//! replies, indicator ticks) arrives as a [`LoopEvent`] on one queue and is
//! processed in arrival order.

use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use agent_transport::{AgentTransport, Session, TransportError};
use pipeline_tui::config::EnvConfig;
use pipeline_tui::{Component, InputDecoder, Renderer, Terminal, TerminalGuard};

use crate::app::{App, Command, Event, RequestId};
use crate::tui::ChatView;

#[derive(Debug)]
pub enum LoopEvent {
    App(Event),
    Input(String),
    Resize,
}

/// Single timer thread that turns armed deadlines into `Tick` events.
struct TickTimer {
    arm: Option<Sender<(RequestId, Instant)>>,
    thread: Option<JoinHandle<()>>,
}

impl TickTimer {
    fn spawn(events: Sender<LoopEvent>) -> io::Result<Self> {
        let (arm, armed) = mpsc::channel::<(RequestId, Instant)>();
        let thread = thread::Builder::new()
            .name("pipeline-chat-ticks".to_string())
            .spawn(move || run_timer(armed, events))?;
        Ok(Self {
            arm: Some(arm),
            thread: Some(thread),
        })
    }

    fn arm(&self, request: RequestId, after: Duration) {
        if let Some(arm) = self.arm.as_ref() {
            let _ = arm.send((request, Instant::now() + after));
        }
    }
}

impl Drop for TickTimer {
    fn drop(&mut self) {
        // Closing the arm channel ends the timer thread.
        self.arm.take();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run_timer(armed: Receiver<(RequestId, Instant)>, events: Sender<LoopEvent>) {
    let mut pending: Vec<(Instant, RequestId)> = Vec::new();
    loop {
        let next_deadline = pending.iter().map(|(deadline, _)| *deadline).min();
        let received = match next_deadline {
            Some(deadline) => {
                armed.recv_timeout(deadline.saturating_duration_since(Instant::now()))
            }
            None => armed.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };
        match received {
            Ok((request, deadline)) => pending.push((deadline, request)),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }

        let now = Instant::now();
        let mut index = 0;
        while index < pending.len() {
            if pending[index].0 > now {
                index += 1;
                continue;
            }
            let (_, request) = pending.swap_remove(index);
            if events.send(LoopEvent::App(Event::Tick { request })).is_err() {
                return;
            }
        }
    }
}

pub struct ChatRuntime<T: Terminal> {
    app: App,
    view: ChatView,
    renderer: Renderer,
    terminal: TerminalGuard<T>,
    transport: Arc<dyn AgentTransport>,
    sender: Sender<LoopEvent>,
    receiver: Receiver<LoopEvent>,
    decoder: InputDecoder,
    timer: TickTimer,
    hardware_cursor: bool,
    dirty: bool,
    finished: bool,
}

impl<T: Terminal> ChatRuntime<T> {
    /// Start the terminal, enter the alternate screen and issue the bootstrap.
    pub fn start(
        terminal: T,
        transport: Arc<dyn AgentTransport>,
        config: &EnvConfig,
    ) -> io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let timer = TickTimer::spawn(sender.clone())?;

        let input_sender = sender.clone();
        let resize_sender = sender.clone();
        let mut terminal = TerminalGuard::start(
            terminal,
            Box::new(move |data| {
                let _ = input_sender.send(LoopEvent::Input(data));
            }),
            Box::new(move || {
                let _ = resize_sender.send(LoopEvent::Resize);
            }),
        )?;
        terminal.terminal_mut().write(Renderer::enter());

        let columns = usize::from(terminal.terminal().columns());
        let rows = usize::from(terminal.terminal().rows());
        tracing::info!(
            transport = transport.transport_id(),
            columns,
            rows,
            "terminal started"
        );

        let app = App::new();
        let startup = app.start();
        let mut runtime = Self {
            app,
            view: ChatView::new(columns, rows),
            renderer: Renderer::new(),
            terminal,
            transport,
            sender,
            receiver,
            decoder: InputDecoder::new(),
            timer,
            hardware_cursor: config.hardware_cursor,
            dirty: true,
            finished: false,
        };
        runtime.execute(startup);
        runtime.render_if_dirty();
        Ok(runtime)
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn view(&self) -> &ChatView {
        &self.view
    }

    pub fn should_exit(&self) -> bool {
        self.app.should_exit()
    }

    /// Run until the controller asks to exit.
    pub fn run(&mut self) {
        while !self.should_exit() {
            self.run_once(Duration::from_millis(250));
        }
    }

    /// Wait up to `timeout` for one event, then drain whatever else is queued
    /// and render once. Returns false once the controller asked to exit.
    pub fn run_once(&mut self, timeout: Duration) -> bool {
        match self.receiver.recv_timeout(timeout) {
            Ok(event) => self.dispatch(event),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return false,
        }
        while !self.should_exit() {
            match self.receiver.try_recv() {
                Ok(event) => self.dispatch(event),
                Err(_) => break,
            }
        }

        if !self.should_exit() {
            self.render_if_dirty();
        }
        !self.should_exit()
    }

    /// Restore the terminal. Returns the unsent input text.
    ///
    /// Safe to call more than once; later calls only return the text.
    pub fn finish(&mut self) -> io::Result<String> {
        let pending = self.view.pending_input().to_string();
        if self.finished {
            return Ok(pending);
        }
        self.finished = true;
        self.terminal.terminal_mut().write(Renderer::leave());
        self.terminal.stop()?;
        tracing::info!("terminal stopped");
        Ok(pending)
    }

    fn dispatch(&mut self, event: LoopEvent) {
        match event {
            LoopEvent::App(event) => self.apply(event),
            LoopEvent::Input(data) => {
                for input in self.decoder.feed(&data) {
                    if let Some(event) = self.view.handle_input(&input) {
                        self.apply(event);
                        if self.should_exit() {
                            return;
                        }
                    }
                }
                self.dirty = true;
            }
            LoopEvent::Resize => {
                let columns = usize::from(self.terminal.terminal().columns());
                let rows = usize::from(self.terminal.terminal().rows());
                self.view.resize(columns, rows);
                self.renderer.request_full_redraw();
                self.dirty = true;
            }
        }
    }

    fn apply(&mut self, event: Event) {
        let commands = self.app.handle_event(event);
        self.execute(commands);
        self.dirty = true;
    }

    fn execute(&mut self, commands: Vec<Command>) {
        for command in commands {
            match command {
                Command::Bootstrap => self.spawn_bootstrap(),
                Command::SendMessage {
                    request,
                    session,
                    text,
                } => self.spawn_send(request, session, text),
                Command::ScheduleTick { request, after } => self.timer.arm(request, after),
                Command::Exit => {}
            }
        }
    }

    // Workers are detached. A result that lands after exit is dropped with the queue.
    fn spawn_bootstrap(&self) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name("pipeline-chat-bootstrap".to_string())
            .spawn(move || {
                tracing::info!(transport = transport.transport_id(), "bootstrapping session");
                let result = transport.bootstrap();
                let _ = sender.send(LoopEvent::App(Event::BootstrapResult(result)));
            });
        if let Err(error) = spawned {
            let _ = self.sender.send(LoopEvent::App(Event::BootstrapResult(Err(
                TransportError::Bootstrap(format!("failed to spawn worker: {error}")),
            ))));
        }
    }

    fn spawn_send(&self, request: RequestId, session: Session, text: String) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        let spawned = thread::Builder::new()
            .name(format!("pipeline-chat-send-{request}"))
            .spawn(move || {
                let event = match transport.send_message(&session, &text) {
                    Ok(text) => Event::ResponseOk { request, text },
                    Err(error) => Event::ResponseFail { request, error },
                };
                let _ = sender.send(LoopEvent::App(event));
            });
        if let Err(error) = spawned {
            let _ = self.sender.send(LoopEvent::App(Event::ResponseFail {
                request,
                error: TransportError::SendTransport(format!("failed to spawn worker: {error}")),
            }));
        }
    }

    fn render_if_dirty(&mut self) {
        if !self.dirty || self.finished {
            return;
        }
        self.dirty = false;

        self.view.sync(&self.app);
        let (width, height) = self.view.size();
        let lines = self.view.render(width);
        let cursor = self.view.cursor_pos();
        let frame = self
            .renderer
            .render(&lines, cursor, width, height, self.hardware_cursor);
        self.terminal.terminal_mut().write(&frame);
    }
}

impl<T: Terminal> Drop for ChatRuntime<T> {
    fn drop(&mut self) {
        let _ = self.finish();
    }
}
