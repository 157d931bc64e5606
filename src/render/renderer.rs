//! Full-screen diff renderer.
//!
//! The session runs on the alternate screen, so every frame is addressed by
//! absolute row. Only rows that differ from the previous frame are rewritten.

use crate::core::component::CursorPos;
use crate::core::text::slice::truncate_to_width;

const SYNC_START: &str = "\x1b[?2026h";
const SYNC_END: &str = "\x1b[?2026l";
const CLEAR_ALL: &str = "\x1b[2J\x1b[H";
const CLEAR_LINE: &str = "\x1b[K";
const SHOW_CURSOR: &str = "\x1b[?25h";
const HIDE_CURSOR: &str = "\x1b[?25l";

const ENTER_SESSION: &str = "\x1b[?1049h\x1b[?2004h\x1b[?25l";
const LEAVE_SESSION: &str = "\x1b[?2004l\x1b[?1049l\x1b[?25h";

#[derive(Debug, Default)]
pub struct Renderer {
    previous_lines: Vec<String>,
    previous_width: usize,
    previous_height: usize,
    full_redraw_next: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes that switch to the alternate screen and enable bracketed paste.
    pub fn enter() -> &'static str {
        ENTER_SESSION
    }

    /// Bytes that undo [`Renderer::enter`].
    pub fn leave() -> &'static str {
        LEAVE_SESSION
    }

    pub fn request_full_redraw(&mut self) {
        self.full_redraw_next = true;
    }

    /// Produce the bytes that bring the screen from the previous frame to `lines`.
    ///
    /// `lines` is clipped to `height` rows and each row to `width` columns. With
    /// `hardware_cursor` set, the terminal cursor is placed at `cursor` and shown;
    /// otherwise it stays hidden (widgets draw their own cursor).
    pub fn render(
        &mut self,
        lines: &[String],
        cursor: Option<CursorPos>,
        width: usize,
        height: usize,
        hardware_cursor: bool,
    ) -> String {
        let lines: Vec<String> = lines
            .iter()
            .take(height)
            .map(|line| truncate_to_width(line, width))
            .collect();

        let full = std::mem::take(&mut self.full_redraw_next)
            || self.previous_lines.is_empty()
            || width != self.previous_width
            || height != self.previous_height;

        let mut buffer = String::from(SYNC_START);
        if full {
            buffer.push_str(CLEAR_ALL);
            for (row, line) in lines.iter().enumerate() {
                move_to(&mut buffer, row, 0);
                buffer.push_str(line);
            }
        } else {
            let rows = lines.len().max(self.previous_lines.len());
            for row in 0..rows {
                let next = lines.get(row);
                if next == self.previous_lines.get(row) {
                    continue;
                }
                move_to(&mut buffer, row, 0);
                if let Some(line) = next {
                    buffer.push_str(line);
                }
                buffer.push_str(CLEAR_LINE);
            }
        }

        match cursor.filter(|_| hardware_cursor) {
            Some(pos) => {
                move_to(&mut buffer, pos.row.min(height.saturating_sub(1)), pos.col);
                buffer.push_str(SHOW_CURSOR);
            }
            None => buffer.push_str(HIDE_CURSOR),
        }
        buffer.push_str(SYNC_END);

        self.previous_lines = lines;
        self.previous_width = width;
        self.previous_height = height;
        buffer
    }
}

fn move_to(buffer: &mut String, row: usize, col: usize) {
    buffer.push_str(&format!("\x1b[{};{}H", row + 1, col + 1));
}
