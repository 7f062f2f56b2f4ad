use crate::diagnostics::{Diagnostic, Stage};
use crate::logging::codes;

/// Statement shape errors. The message is fixed; the reason goes into the
/// diagnostic detail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SyntaxError {
    #[error("Line {line}: Syntax Error [Error]")]
    InvalidStatement { line: usize, reason: String },
}

impl SyntaxError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SyntaxError::InvalidStatement { .. } => codes::syntax::INVALID_STATEMENT,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SyntaxError::InvalidStatement { line, reason } => {
                Diagnostic::new(Stage::Syntax, Some(*line), self.error_code(), self.to_string())
                    .with_detail(reason.clone())
            }
        }
    }
}
