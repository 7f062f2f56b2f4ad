//! Statement validation
//!
//! There is no parser here. Each significant line is matched against the
//! fixed statement shapes and either accepted or reported.

pub mod error;
pub mod validator;

use crate::diagnostics::Diagnostic;
use crate::logging::codes;
use crate::utils::significant_lines;
use crate::{log_debug, log_success};

pub use error::SyntaxError;
pub use validator::{validate_statement, StatementShape, Validation};

/// Accepted statements and syntax diagnostics for one compilation unit
#[derive(Debug, Clone, Default)]
pub struct SyntaxOutput {
    /// (line number, shape) for every accepted line
    pub statements: Vec<(usize, StatementShape)>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SyntaxOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Validate every significant line of the unit
pub fn check_syntax<S: AsRef<str>>(lines: &[S]) -> SyntaxOutput {
    let mut output = SyntaxOutput::default();

    for line in significant_lines(lines) {
        match validate_statement(line.text) {
            Validation::Valid(shape) => output.statements.push((line.number, shape)),
            Validation::Invalid { reason } => {
                log_debug!("Statement rejected", "line" => line.number, "reason" => reason);
                let error = SyntaxError::InvalidStatement {
                    line: line.number,
                    reason,
                };
                output.diagnostics.push(error.to_diagnostic());
            }
        }
    }

    if !output.has_errors() {
        log_success!(
            codes::success::SYNTAX_VALIDATION_PASSED,
            "All statements valid",
            "statements" => output.statements.len()
        );
    }

    output
}
