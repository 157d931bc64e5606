//! Component trait and cursor metadata.

use crate::core::input_event::InputEvent;

/// Cursor position relative to the lines returned by a component's last render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorPos {
    pub row: usize,
    pub col: usize,
}

/// Renderable component interface.
pub trait Component {
    /// Render to a list of lines at the given width.
    fn render(&mut self, width: usize) -> Vec<String>;

    /// Handle input events.
    fn handle_event(&mut self, _event: &InputEvent) {}

    /// Optional cursor position metadata for this component's last render.
    fn cursor_pos(&self) -> Option<CursorPos> {
        None
    }
}
