//! Widgets used by the chat view.

pub mod input;
pub mod viewport;

pub use input::InputBox;
pub use viewport::Viewport;
