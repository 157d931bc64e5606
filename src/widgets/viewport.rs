//! Scrollback viewport.

use crate::core::component::Component;
use crate::core::input_event::InputEvent;
use crate::core::text::wrap::wrap_text;

/// Fixed-height window over word-wrapped content.
///
/// Content is re-wrapped whenever it or the width changes. The offset counts
/// wrapped lines from the top and is clamped so the last page is always full
/// when there is enough content.
#[derive(Debug, Default)]
pub struct Viewport {
    content: String,
    lines: Vec<String>,
    width: usize,
    height: usize,
    offset: usize,
}

impl Viewport {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Replace the content. Returns false when it was already identical.
    pub fn set_content(&mut self, content: &str) -> bool {
        if self.content == content {
            return false;
        }
        self.content = content.to_string();
        self.rewrap();
        true
    }

    pub fn set_size(&mut self, width: usize, height: usize) {
        let width_changed = width != self.width;
        self.width = width;
        self.height = height;
        if width_changed {
            self.rewrap();
        } else {
            self.clamp();
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn total_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height)
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.offset = self.offset.saturating_add(lines).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.height.max(1));
    }

    fn rewrap(&mut self) {
        let was_at_bottom = self.at_bottom();
        self.lines = wrap_text(&self.content, self.width);
        if was_at_bottom {
            self.scroll_to_bottom();
        } else {
            self.clamp();
        }
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

impl Component for Viewport {
    /// Always returns exactly `height` lines, padding with blanks.
    fn render(&mut self, width: usize) -> Vec<String> {
        if width != self.width {
            self.width = width;
            self.rewrap();
        }
        let mut out: Vec<String> = self
            .lines
            .iter()
            .skip(self.offset)
            .take(self.height)
            .cloned()
            .collect();
        out.resize(self.height, String::new());
        out
    }

    fn handle_event(&mut self, event: &InputEvent) {
        let InputEvent::Key { key_id, .. } = event else {
            return;
        };
        match key_id.as_str() {
            "up" => self.scroll_up(1),
            "down" => self.scroll_down(1),
            "pageUp" => self.page_up(),
            "pageDown" => self.page_down(),
            _ => {}
        }
    }
}
