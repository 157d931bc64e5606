//! Terminal render surface for the pipeline chat client.
//!
//! Invariant: widgets render to line vectors and never touch the terminal; only
//! the bytes produced by [`Renderer`] are written during a session.
//!
//! # Public API Overview
//! - Drive a terminal through the [`Terminal`] trait ([`ProcessTerminal`] for a real TTY).
//! - Decode raw input chunks into [`InputEvent`]s with [`InputDecoder`].
//! - Compose [`InputBox`] and [`Viewport`] and hand their lines to [`Renderer`].
//! - Use [`visible_width`] and [`wrap_text`] for ANSI-safe layout.

pub mod config;

pub mod core;
pub mod platform;
pub mod render;
pub mod widgets;

/// Component contract and cursor metadata.
pub use crate::core::component::{Component, CursorPos};

/// Keyboard input parsing.
pub use crate::core::input::parse_key;
pub use crate::core::input_event::{InputDecoder, InputEvent};

/// Terminal interfaces and process-backed implementation.
pub use crate::core::terminal::{Terminal, TerminalGuard};
pub use crate::platform::process_terminal::ProcessTerminal;

/// Frame diffing renderer.
pub use crate::render::Renderer;

/// Built-in UI components.
pub use crate::widgets::{InputBox, Viewport};

/// Visible width helper that ignores ANSI control sequences.
pub use crate::core::text::width::visible_width;
/// ANSI-aware word wrapping helper.
pub use crate::core::text::wrap::wrap_text;
