//! Shared helpers for line-oriented source handling

pub mod lines;

pub use lines::{sanitize_line, significant_lines, SourceLine};
