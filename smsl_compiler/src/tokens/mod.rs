//! Token types produced by the tokenizer

pub mod token;
pub mod token_lines;

pub use token::{Token, TokenKind};
pub use token_lines::{group_by_line, TokenLine};
