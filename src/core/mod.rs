//! Core interfaces and types.

pub mod component;
pub mod input;
pub mod input_event;
pub mod terminal;
pub mod text;
