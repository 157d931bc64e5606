//! Chat view: scrollback, gap line, input box and status line.
//!
//! The view owns presentation state only. Keys that mean something to the
//! session are translated into controller [`Event`]s and handed back.

use pipeline_tui::{Component, CursorPos, InputBox, InputEvent, Viewport};

use crate::app::{App, Event};

pub const INPUT_PROMPT: &str = "│ ";
pub const INPUT_PLACEHOLDER: &str = "Send a message...";
pub const INPUT_CHAR_LIMIT: usize = 280;

/// Rows used below the scrollback: gap, input and status.
const CHROME_ROWS: usize = 3;

fn dim(text: &str) -> String {
    format!("\x1b[2m{text}\x1b[22m")
}

pub struct ChatView {
    input: InputBox,
    viewport: Viewport,
    status: String,
    width: usize,
    height: usize,
    cursor_pos: Option<CursorPos>,
}

impl ChatView {
    pub fn new(width: usize, height: usize) -> Self {
        let input = InputBox::new()
            .with_prompt(INPUT_PROMPT)
            .with_placeholder(INPUT_PLACEHOLDER)
            .with_char_limit(INPUT_CHAR_LIMIT);
        let mut view = Self {
            input,
            viewport: Viewport::new(width, 1),
            status: String::new(),
            width,
            height,
            cursor_pos: None,
        };
        view.resize(width, height);
        view
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        let scrollback_rows = height.saturating_sub(CHROME_ROWS).max(1);
        self.viewport.set_size(width, scrollback_rows);
        self.viewport.scroll_to_bottom();
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Pull the latest transcript and status from the controller.
    ///
    /// The scrollback is pinned to the bottom whenever its content changes.
    pub fn sync(&mut self, app: &App) {
        if self.viewport.set_content(&app.renderable_state()) {
            self.viewport.scroll_to_bottom();
        }
        self.status = app.status_line();
    }

    pub fn pending_input(&self) -> &str {
        self.input.current_text()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Route one input event. Returns the controller event it stands for, if any.
    ///
    /// Enter always clears the input, whether or not the controller accepts
    /// the submission.
    pub fn handle_input(&mut self, event: &InputEvent) -> Option<Event> {
        if let InputEvent::Key { key_id, .. } = event {
            match key_id.as_str() {
                "ctrl+c" | "escape" => return Some(Event::Quit),
                "enter" => {
                    let text = self.input.current_text().to_string();
                    self.input.clear();
                    return Some(Event::Submit(text));
                }
                "up" | "down" | "pageUp" | "pageDown" => {
                    self.viewport.handle_event(event);
                    return None;
                }
                _ => {}
            }
        }
        self.input.handle_event(event);
        None
    }
}

impl Component for ChatView {
    fn render(&mut self, width: usize) -> Vec<String> {
        let mut lines = self.viewport.render(width);
        lines.push(String::new());

        let input_row = lines.len();
        lines.extend(self.input.render(width));
        self.cursor_pos = self.input.cursor_pos().map(|pos| CursorPos {
            row: input_row + pos.row,
            col: pos.col,
        });

        lines.push(dim(&self.status));
        lines
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.cursor_pos
    }
}
