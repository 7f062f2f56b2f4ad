//! Diagnostics reported by the analysis stages
//!
//! Stages never abort on a malformed line. They append a [`Diagnostic`] and
//! continue; the pipeline decides whether later stages run.

use crate::logging::{codes, Code};
use serde::Serialize;

/// Analysis stage a diagnostic belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Stage {
    Lexical,
    Syntax,
    Semantic,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Lexical => "Lexical",
            Stage::Syntax => "Syntax",
            Stage::Semantic => "Semantic",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// `None` only for the opaque I/O failure
    pub stage: Option<Stage>,
    pub line: Option<usize>,
    pub code: Code,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Diagnostic {
    pub fn new(stage: Stage, line: Option<usize>, code: Code, message: impl Into<String>) -> Self {
        Self {
            stage: Some(stage),
            line,
            code,
            message: message.into(),
            detail: None,
        }
    }

    /// Unreadable source. Carries no stage and no line.
    pub fn io_failure(code: Code, message: impl Into<String>) -> Self {
        Self {
            stage: None,
            line: None,
            code,
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Stable sort by line number; diagnostics without a line go last
pub fn sort_by_line(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|diagnostic| (diagnostic.line.is_none(), diagnostic.line));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn semantic(line: Option<usize>, message: &str) -> Diagnostic {
        Diagnostic::new(
            Stage::Semantic,
            line,
            codes::semantic::UNDEFINED_STATE_REFERENCE,
            message,
        )
    }

    #[test]
    fn test_sort_puts_unnumbered_last_and_is_stable() {
        let mut diagnostics = vec![
            semantic(None, "first unnumbered"),
            semantic(Some(9), "nine"),
            semantic(None, "second unnumbered"),
            semantic(Some(2), "two"),
            semantic(Some(9), "nine again"),
        ];

        sort_by_line(&mut diagnostics);

        let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "two",
                "nine",
                "nine again",
                "first unnumbered",
                "second unnumbered"
            ]
        );
    }

    #[test]
    fn test_io_failure_has_no_stage() {
        let diagnostic = Diagnostic::io_failure(codes::source::IO_ERROR, "I/O Error - disk gone");
        assert!(diagnostic.stage.is_none());
        assert!(diagnostic.line.is_none());
        assert_eq!(diagnostic.category(), "Source");
    }

    #[test]
    fn test_detail_is_omitted_from_json_when_absent() {
        let plain = semantic(Some(1), "msg");
        let json = serde_json::to_value(&plain).unwrap();
        assert!(json.get("detail").is_none());
        assert_eq!(json["stage"], "Semantic");
        assert_eq!(json["code"], "E110");

        let detailed = plain.with_detail("why");
        assert_eq!(serde_json::to_value(&detailed).unwrap()["detail"], "why");
    }
}
