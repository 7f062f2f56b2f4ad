//! Regex-driven tokenizer
//!
//! Each line is scanned left to right. At every position the longest match
//! among the lexeme patterns wins, with pattern order breaking ties. Text that
//! no pattern accepts becomes a single `Unknown` token and scanning resumes.

use crate::config::compile_time::lexical::{MAX_LEXEME_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::LexicalPreferences;
use crate::diagnostics::{Diagnostic, Stage};
use crate::grammar::Keyword;
use crate::logging::codes;
use crate::tokens::{Token, TokenKind};
use crate::utils::significant_lines;
use crate::{log_debug, log_success, log_warning};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LexerError {
    #[error("Line {line}: Lexical Error - Unknown lexeme '{lexeme}'")]
    UnknownLexeme { line: usize, lexeme: String },

    #[error("Line {line}: Lexical Error - Lexeme too long ({length} characters, max {max})")]
    LexemeTooLong { line: usize, length: usize, max: usize },

    #[error("Line {line}: Lexical Error - Too many tokens (max {max})")]
    TooManyTokens { line: usize, max: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnknownLexeme { .. } => codes::lexical::UNKNOWN_LEXEME,
            LexerError::LexemeTooLong { .. } => codes::lexical::LEXEME_TOO_LONG,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }

    pub fn line(&self) -> usize {
        match self {
            LexerError::UnknownLexeme { line, .. }
            | LexerError::LexemeTooLong { line, .. }
            | LexerError::TooManyTokens { line, .. } => *line,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::Lexical,
            Some(self.line()),
            self.error_code(),
            self.to_string(),
        )
    }
}

/// Limits enforced while scanning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalLimits {
    pub max_lexeme_length: usize,
    pub max_token_count: usize,
}

impl Default for LexicalLimits {
    fn default() -> Self {
        Self {
            max_lexeme_length: MAX_LEXEME_LENGTH,
            max_token_count: MAX_TOKEN_COUNT,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub unknown_lexemes: usize,
    pub skipped_lines: usize,
    /// Per-kind counts; only filled with detailed metrics enabled
    pub tokens_by_kind: BTreeMap<&'static str, usize>,
}

impl LexicalMetrics {
    fn record_token(&mut self, kind: TokenKind, preferences: &LexicalPreferences) {
        self.total_tokens += 1;
        if kind == TokenKind::Unknown {
            self.unknown_lexemes += 1;
        }
        if preferences.collect_detailed_metrics {
            *self.tokens_by_kind.entry(kind.as_str()).or_insert(0) += 1;
        }
    }
}

/// Tokens and lexical diagnostics for one compilation unit
#[derive(Debug, Clone, Default)]
pub struct LexicalOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: LexicalMetrics,
}

impl LexicalOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PatternClass {
    Word,
    Number,
    Quoted,
    Symbol,
}

fn patterns() -> &'static [(PatternClass, Regex)] {
    static PATTERNS: OnceLock<Vec<(PatternClass, Regex)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (PatternClass::Word, r"^[A-Za-z_][A-Za-z0-9_]*"),
            (PatternClass::Number, r"^[0-9]+"),
            (PatternClass::Quoted, r#"^(?:"[^"]*"|'[^']*')"#),
            (PatternClass::Symbol, r"^->"),
            (PatternClass::Symbol, r"^[{}();,:]"),
        ]
        .into_iter()
        .map(|(class, pattern)| {
            (
                class,
                Regex::new(pattern).expect("lexeme patterns are valid"),
            )
        })
        .collect()
    })
}

/// Longest match at the start of `text`; earlier patterns win ties
fn longest_match(text: &str) -> Option<(PatternClass, usize)> {
    let mut best: Option<(PatternClass, usize)> = None;
    for (class, regex) in patterns() {
        if let Some(found) = regex.find(text) {
            let length = found.end();
            if length > 0 && best.map_or(true, |(_, best_length)| length > best_length) {
                best = Some((*class, length));
            }
        }
    }
    best
}

/// Byte length of the unmatched run starting at `text`: up to the next
/// whitespace or the next position where some pattern matches
fn unknown_run_length(text: &str) -> usize {
    text.char_indices()
        .skip(1)
        .find(|&(offset, c)| c.is_whitespace() || longest_match(&text[offset..]).is_some())
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

fn classify(class: PatternClass, lexeme: &str) -> TokenKind {
    match class {
        PatternClass::Word => Keyword::from_str(lexeme)
            .map(TokenKind::from)
            .unwrap_or(TokenKind::Identifier),
        PatternClass::Number => TokenKind::Number,
        PatternClass::Quoted => TokenKind::String,
        PatternClass::Symbol => TokenKind::Symbol,
    }
}

pub struct LexicalAnalyzer {
    preferences: LexicalPreferences,
    limits: LexicalLimits,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self::with_preferences(LexicalPreferences::default())
    }

    pub fn with_preferences(preferences: LexicalPreferences) -> Self {
        Self {
            preferences,
            limits: LexicalLimits::default(),
        }
    }

    pub fn with_limits(mut self, limits: LexicalLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Tokenize raw source lines (1-indexed by position)
    pub fn tokenize<S: AsRef<str>>(&self, lines: &[S]) -> LexicalOutput {
        let mut output = LexicalOutput::default();
        let significant = significant_lines(lines);
        output.metrics.skipped_lines = lines.len() - significant.len();

        'lines: for line in significant {
            let text = line.text;
            let mut position = 0;

            while position < text.len() {
                let rest = &text[position..];
                let trimmed = rest.trim_start();
                if trimmed.is_empty() {
                    break;
                }
                position += rest.len() - trimmed.len();

                if output.tokens.len() >= self.limits.max_token_count {
                    let error = LexerError::TooManyTokens {
                        line: line.number,
                        max: self.limits.max_token_count,
                    };
                    log_warning!("Token limit reached, scanning stopped",
                        "line" => line.number,
                        "max_tokens" => self.limits.max_token_count);
                    output.diagnostics.push(error.to_diagnostic());
                    break 'lines;
                }

                let (kind, length) = match longest_match(trimmed) {
                    Some((class, length)) => (classify(class, &trimmed[..length]), length),
                    None => (TokenKind::Unknown, unknown_run_length(trimmed)),
                };
                let lexeme = &trimmed[..length];
                position += length;

                let kind = if kind == TokenKind::Unknown {
                    let error = LexerError::UnknownLexeme {
                        line: line.number,
                        lexeme: lexeme.to_string(),
                    };
                    log_debug!("Unknown lexeme", "line" => line.number, "lexeme" => lexeme);
                    output.diagnostics.push(error.to_diagnostic());
                    TokenKind::Unknown
                } else if lexeme.chars().count() > self.limits.max_lexeme_length {
                    let error = LexerError::LexemeTooLong {
                        line: line.number,
                        length: lexeme.chars().count(),
                        max: self.limits.max_lexeme_length,
                    };
                    output.diagnostics.push(error.to_diagnostic());
                    TokenKind::Unknown
                } else {
                    kind
                };

                output.metrics.record_token(kind, &self.preferences);
                output.tokens.push(Token::new(line.number, lexeme, kind));
            }
        }

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "tokens" => output.metrics.total_tokens,
            "unknown_lexemes" => output.metrics.unknown_lexemes,
            "diagnostics" => output.diagnostics.len(),
            "skipped_lines" => output.metrics.skipped_lines
        );

        output
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn kinds(output: &LexicalOutput) -> Vec<(TokenKind, &str)> {
        output
            .tokens
            .iter()
            .map(|t| (t.kind, t.lexeme.as_str()))
            .collect()
    }

    #[test]
    fn test_state_header() {
        let output = LexicalAnalyzer::new().tokenize(&["state Idle {"]);

        assert!(!output.has_errors());
        assert_eq!(
            kinds(&output),
            vec![
                (TokenKind::State, "state"),
                (TokenKind::Identifier, "Idle"),
                (TokenKind::Symbol, "{"),
            ]
        );
        assert!(output.tokens.iter().all(|t| t.line_number == 1));
    }

    #[test]
    fn test_transition_line_uses_arrow_symbol() {
        let output = LexicalAnalyzer::new().tokenize(&["transition t1: event e1 -> Busy {"]);

        assert!(!output.has_errors());
        assert_eq!(
            kinds(&output),
            vec![
                (TokenKind::Transition, "transition"),
                (TokenKind::Identifier, "t1"),
                (TokenKind::Symbol, ":"),
                (TokenKind::Event, "event"),
                (TokenKind::Identifier, "e1"),
                (TokenKind::Symbol, "->"),
                (TokenKind::Identifier, "Busy"),
                (TokenKind::Symbol, "{"),
            ]
        );
    }

    #[test]
    fn test_unknown_lexeme_does_not_abort_scanning() {
        let output = LexicalAnalyzer::new().tokenize(&["foo$bar;"]);

        assert_eq!(
            kinds(&output),
            vec![
                (TokenKind::Identifier, "foo"),
                (TokenKind::Unknown, "$"),
                (TokenKind::Identifier, "bar"),
                (TokenKind::Symbol, ";"),
            ]
        );
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(
            output.diagnostics[0].message,
            "Line 1: Lexical Error - Unknown lexeme '$'"
        );
        assert_eq!(output.diagnostics[0].stage, Some(Stage::Lexical));
        assert_eq!(output.metrics.unknown_lexemes, 1);
    }

    #[test]
    fn test_unknown_run_is_one_lexeme() {
        let output = LexicalAnalyzer::new().tokenize(&["action @#! x;"]);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.tokens[1].lexeme, "@#!");
        assert_eq!(output.tokens[1].kind, TokenKind::Unknown);
    }

    #[test]
    fn test_lone_dash_and_unterminated_string_are_unknown() {
        let output = LexicalAnalyzer::new().tokenize(&["a - b", "x \"open"]);
        let unknown: Vec<&str> = output
            .tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Unknown)
            .map(|t| t.lexeme.as_str())
            .collect();
        assert_eq!(unknown, vec!["-", "\""]);
        assert_eq!(output.diagnostics[1].line, Some(2));
    }

    #[test]
    fn test_literals() {
        let output = LexicalAnalyzer::new().tokenize(&["action 42 \"say hi\" 'x';"]);
        assert_eq!(
            kinds(&output),
            vec![
                (TokenKind::Action, "action"),
                (TokenKind::Number, "42"),
                (TokenKind::String, "\"say hi\""),
                (TokenKind::String, "'x'"),
                (TokenKind::Symbol, ";"),
            ]
        );
    }

    #[test]
    fn test_longest_match_keeps_keyword_prefixed_identifiers() {
        let output = LexicalAnalyzer::new().tokenize(&["states start_1 end"]);
        assert_eq!(
            kinds(&output),
            vec![
                (TokenKind::Identifier, "states"),
                (TokenKind::Identifier, "start_1"),
                (TokenKind::End, "end"),
            ]
        );
    }

    #[test]
    fn test_comment_and_blank_lines_produce_nothing() {
        let output = LexicalAnalyzer::new().tokenize(&["// comment", "   ", "", "\t// x"]);
        assert!(output.tokens.is_empty());
        assert!(output.diagnostics.is_empty());
        assert_eq!(output.metrics.skipped_lines, 4);
    }

    #[test]
    fn test_line_numbers_are_original() {
        let output = LexicalAnalyzer::new().tokenize(&["", "// c", "end;"]);
        assert!(output.tokens.iter().all(|t| t.line_number == 3));
    }

    #[test]
    fn test_token_limit_stops_scanning() {
        let analyzer = LexicalAnalyzer::new().with_limits(LexicalLimits {
            max_lexeme_length: 64,
            max_token_count: 2,
        });
        let output = analyzer.tokenize(&["state A {", "action a;"]);

        assert_eq!(output.tokens.len(), 2);
        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(output.diagnostics[0].code, codes::lexical::TOO_MANY_TOKENS);
    }

    #[test]
    fn test_lexeme_length_limit() {
        let analyzer = LexicalAnalyzer::new().with_limits(LexicalLimits {
            max_lexeme_length: 5,
            max_token_count: 100,
        });
        let output = analyzer.tokenize(&["state LongName {"]);

        assert_eq!(output.diagnostics.len(), 1);
        assert_eq!(
            output.diagnostics[0].message,
            "Line 1: Lexical Error - Lexeme too long (8 characters, max 5)"
        );
        assert_eq!(output.tokens[1].kind, TokenKind::Unknown);
    }

    #[test]
    fn test_detailed_metrics_follow_preferences() {
        let detailed = LexicalAnalyzer::with_preferences(LexicalPreferences {
            collect_detailed_metrics: true,
        })
        .tokenize(&["state A {"]);
        assert_eq!(detailed.metrics.tokens_by_kind.get("SYMBOL"), Some(&1));

        let plain = LexicalAnalyzer::with_preferences(LexicalPreferences {
            collect_detailed_metrics: false,
        })
        .tokenize(&["state A {"]);
        assert!(plain.metrics.tokens_by_kind.is_empty());
        assert_eq!(plain.metrics.total_tokens, 3);
    }

    #[test]
    fn test_error_codes() {
        let error = LexerError::UnknownLexeme {
            line: 2,
            lexeme: "$".into(),
        };
        assert_eq!(error.error_code(), codes::lexical::UNKNOWN_LEXEME);
        assert_matches!(error.to_diagnostic().line, Some(2));
    }
}
