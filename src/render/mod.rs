//! Rendering: turns component lines into terminal bytes.

pub mod renderer;

pub use renderer::Renderer;
