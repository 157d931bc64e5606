//! Text helpers for ANSI-aware layout.
//!
//! These helpers are pure (string in/string out) so widgets can depend on them
//! without importing anything from the render layer.

pub mod ansi;
pub mod slice;
pub mod width;
pub mod wrap;
