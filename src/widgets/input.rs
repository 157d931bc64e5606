//! Single-line message input.

use unicode_segmentation::UnicodeSegmentation;

use crate::core::component::{Component, CursorPos};
use crate::core::input_event::InputEvent;
use crate::core::text::slice::truncate_to_width;
use crate::core::text::width::{grapheme_width, visible_width};

const DEFAULT_PROMPT: &str = "> ";
const CURSOR_ON: &str = "\x1b[7m";
const CURSOR_OFF: &str = "\x1b[27m";
const DIM: &str = "\x1b[2m";
const RESET: &str = "\x1b[0m";

/// Single-line input with a character limit and horizontal scrolling.
///
/// Enter and escape are not handled here; the owner decides what they mean.
pub struct InputBox {
    value: String,
    /// Byte offset into `value`, always on a grapheme boundary.
    cursor: usize,
    /// Index of the first visible grapheme.
    scroll: usize,
    prompt: String,
    placeholder: String,
    char_limit: Option<usize>,
    last_cursor_pos: Option<CursorPos>,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            value: String::new(),
            cursor: 0,
            scroll: 0,
            prompt: DEFAULT_PROMPT.to_string(),
            placeholder: String::new(),
            char_limit: None,
            last_cursor_pos: None,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Limit the value to `limit` characters. Extra input is dropped.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    pub fn current_text(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.value = String::new();
        self.cursor = 0;
        self.scroll = 0;
        self.insert_text(&text.into());
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    fn remaining_capacity(&self) -> usize {
        match self.char_limit {
            Some(limit) => limit.saturating_sub(self.value.chars().count()),
            None => usize::MAX,
        }
    }

    fn insert_text(&mut self, text: &str) {
        let capacity = self.remaining_capacity();
        let accepted: String = text
            .chars()
            .filter(|ch| !ch.is_control())
            .take(capacity)
            .collect();
        if accepted.is_empty() {
            return;
        }
        self.value.insert_str(self.cursor, &accepted);
        self.cursor += accepted.len();
    }

    fn handle_paste(&mut self, pasted: &str) {
        let flattened = pasted.replace("\r\n", " ").replace(['\r', '\n'], " ");
        self.insert_text(&flattened);
    }

    fn prev_boundary(&self) -> usize {
        self.value[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(idx, _)| idx)
    }

    fn next_boundary(&self) -> usize {
        self.value[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |grapheme| self.cursor + grapheme.len())
    }

    fn delete_backward(&mut self) {
        let start = self.prev_boundary();
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    fn delete_forward(&mut self) {
        let end = self.next_boundary();
        self.value.replace_range(self.cursor..end, "");
    }

    fn word_start_before_cursor(&self) -> usize {
        let before = &self.value[..self.cursor];
        let trimmed = before.trim_end();
        trimmed
            .char_indices()
            .rev()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(0, |(idx, ch)| idx + ch.len_utf8())
    }

    fn word_end_after_cursor(&self) -> usize {
        let after = &self.value[self.cursor..];
        let skipped = after.len() - after.trim_start().len();
        let rest = &after[skipped..];
        let word_len = rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace())
            .map_or(rest.len(), |(idx, _)| idx);
        self.cursor + skipped + word_len
    }

    fn delete_word_backward(&mut self) {
        let start = self.word_start_before_cursor();
        self.value.replace_range(start..self.cursor, "");
        self.cursor = start;
    }

    fn handle_key(&mut self, key_id: &str) {
        match key_id {
            "backspace" | "ctrl+h" => self.delete_backward(),
            "delete" | "ctrl+d" => self.delete_forward(),
            "left" | "ctrl+b" => self.cursor = self.prev_boundary(),
            "right" | "ctrl+f" => self.cursor = self.next_boundary(),
            "home" | "ctrl+a" => self.cursor = 0,
            "end" | "ctrl+e" => self.cursor = self.value.len(),
            "alt+left" | "ctrl+left" => self.cursor = self.word_start_before_cursor(),
            "alt+right" | "ctrl+right" => self.cursor = self.word_end_after_cursor(),
            "ctrl+w" | "alt+backspace" => self.delete_word_backward(),
            "ctrl+u" => {
                self.value.replace_range(..self.cursor, "");
                self.cursor = 0;
            }
            "ctrl+k" => self.value.truncate(self.cursor),
            _ => {}
        }
    }

    fn render_placeholder(&self, available: usize) -> String {
        let mut graphemes = self.placeholder.graphemes(true);
        let first = graphemes.next().unwrap_or(" ");
        let rest: String = graphemes.collect();
        let rest = truncate_to_width(&rest, available.saturating_sub(grapheme_width(first)));
        format!("{CURSOR_ON}{first}{CURSOR_OFF}{DIM}{rest}{RESET}")
    }
}

impl Component for InputBox {
    fn render(&mut self, width: usize) -> Vec<String> {
        let prompt_width = visible_width(&self.prompt);
        let available = width.saturating_sub(prompt_width);
        self.last_cursor_pos = Some(CursorPos {
            row: 0,
            col: prompt_width,
        });
        if available == 0 {
            return vec![self.prompt.clone()];
        }

        if self.value.is_empty() {
            self.scroll = 0;
            let body = self.render_placeholder(available);
            return vec![format!("{}{body}", self.prompt)];
        }

        let graphemes: Vec<&str> = self.value.graphemes(true).collect();
        let cursor_index = self.value[..self.cursor].graphemes(true).count();
        let cursor_cell = graphemes.get(cursor_index).map_or(1, |g| grapheme_width(g));

        // Keep the cursor cell inside the visible window.
        if cursor_index < self.scroll {
            self.scroll = cursor_index;
        }
        let span = |from: usize, to: usize| -> usize {
            graphemes[from..to].iter().map(|g| grapheme_width(g)).sum()
        };
        while self.scroll < cursor_index && span(self.scroll, cursor_index) + cursor_cell > available
        {
            self.scroll += 1;
        }

        let mut line = self.prompt.clone();
        let mut used = 0;
        let mut cursor_col = prompt_width;
        for (index, grapheme) in graphemes.iter().enumerate().skip(self.scroll) {
            let cols = grapheme_width(grapheme);
            if used + cols > available {
                break;
            }
            if index == cursor_index {
                cursor_col = prompt_width + used;
                line.push_str(CURSOR_ON);
                line.push_str(grapheme);
                line.push_str(CURSOR_OFF);
            } else {
                line.push_str(grapheme);
            }
            used += cols;
        }
        if cursor_index == graphemes.len() && used < available {
            cursor_col = prompt_width + used;
            line.push_str(CURSOR_ON);
            line.push(' ');
            line.push_str(CURSOR_OFF);
        }

        self.last_cursor_pos = Some(CursorPos {
            row: 0,
            col: cursor_col,
        });
        vec![line]
    }

    fn cursor_pos(&self) -> Option<CursorPos> {
        self.last_cursor_pos
    }

    fn handle_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Text { text } => self.insert_text(text),
            InputEvent::Paste { text } => self.handle_paste(text),
            InputEvent::Key { key_id, .. } => self.handle_key(key_id),
            InputEvent::Resize { .. } | InputEvent::UnknownRaw { .. } => {}
        }
    }
}
