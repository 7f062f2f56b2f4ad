//! Lexical analysis
//!
//! Turns raw source lines into classified [`Token`](crate::tokens::Token)s
//! plus one diagnostic per rejected lexeme.

pub mod analyzer;

use crate::config::runtime::LexicalPreferences;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalLimits, LexicalMetrics, LexicalOutput};

/// Tokenize with default preferences
pub fn tokenize<S: AsRef<str>>(lines: &[S]) -> LexicalOutput {
    LexicalAnalyzer::new().tokenize(lines)
}

pub fn tokenize_with_preferences<S: AsRef<str>>(
    lines: &[S],
    preferences: LexicalPreferences,
) -> LexicalOutput {
    LexicalAnalyzer::with_preferences(preferences).tokenize(lines)
}
