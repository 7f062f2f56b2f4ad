//! Quadruple generation
//!
//! Re-scans the sanitized lines on its own; nothing from earlier stages is
//! consumed, so generation works on any input.

use super::Quadruple;
use crate::grammar::{StatementKind, TransitionParts};
use crate::logging::codes;
use crate::utils::significant_lines;
use crate::{log_error, log_success};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeneratorError {
    #[error("Line {line}: Invalid action format")]
    InvalidActionFormat { line: usize },

    #[error("Line {line}: Invalid transition format")]
    InvalidTransitionFormat { line: usize },
}

impl GeneratorError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            GeneratorError::InvalidActionFormat { .. } => codes::generation::INVALID_ACTION,
            GeneratorError::InvalidTransitionFormat { .. } => {
                codes::generation::INVALID_TRANSITION
            }
        }
    }

    pub fn line(&self) -> usize {
        match self {
            GeneratorError::InvalidActionFormat { line }
            | GeneratorError::InvalidTransitionFormat { line } => *line,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GenerationOutput {
    pub quadruples: Vec<Quadruple>,
    /// Lines that produced nothing; generation continued past them
    pub errors: Vec<GeneratorError>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IntermediateCodeGenerator;

impl IntermediateCodeGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate<S: AsRef<str>>(&self, lines: &[S]) -> GenerationOutput {
        let mut output = GenerationOutput::default();

        for line in significant_lines(lines) {
            let generated = match StatementKind::classify(line.text) {
                StatementKind::Action => action(line.text, line.number),
                StatementKind::TransitionDeclaration => transition(line.text, line.number),
                _ => continue,
            };

            match generated {
                Ok(quadruple) => output.quadruples.push(quadruple),
                Err(error) => {
                    log_error!(error.error_code(), &error.to_string(), line = error.line());
                    output.errors.push(error);
                }
            }
        }

        log_success!(
            codes::success::INTERMEDIATE_CODE_GENERATED,
            "Intermediate code generated",
            "quadruples" => output.quadruples.len(),
            "errors" => output.errors.len()
        );

        output
    }
}

fn action(text: &str, line: usize) -> Result<Quadruple, GeneratorError> {
    let field = text
        .split_whitespace()
        .nth(1)
        .ok_or(GeneratorError::InvalidActionFormat { line })?;
    let name = field.strip_suffix(';').unwrap_or(field).trim();
    Ok(Quadruple::action(name))
}

fn transition(text: &str, line: usize) -> Result<Quadruple, GeneratorError> {
    let parts =
        TransitionParts::parse(text).ok_or(GeneratorError::InvalidTransitionFormat { line })?;
    Ok(Quadruple::transition(
        parts.name().unwrap_or_default(),
        parts.event(),
        parts.target(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intermediate::Operation;
    use assert_matches::assert_matches;

    #[test]
    fn test_generates_in_source_order() {
        let source = [
            "state Idle {",
            "    action log;",
            "    transition t1: event e1 -> Busy {",
            "    }",
            "}",
            "action  save ; // trailing",
        ];
        let output = IntermediateCodeGenerator::new().generate(&source);

        assert!(output.errors.is_empty());
        assert_eq!(
            output.quadruples,
            vec![
                Quadruple::action("log"),
                Quadruple::transition("t1", "event e1", "Busy"),
                Quadruple::action("save"),
            ]
        );
    }

    #[test]
    fn test_short_transition_is_reported_and_skipped() {
        let source = ["transition t1: e1", "action a;"];
        let output = IntermediateCodeGenerator::new().generate(&source);

        assert_eq!(output.quadruples.len(), 1);
        assert_eq!(output.quadruples[0].operation, Operation::Action);
        assert_matches!(
            output.errors.as_slice(),
            [GeneratorError::InvalidTransitionFormat { line: 1 }]
        );
    }

    #[test]
    fn test_bare_action_keyword_is_reported() {
        let output = IntermediateCodeGenerator::new().generate(&["action"]);

        assert!(output.quadruples.is_empty());
        assert_matches!(
            output.errors.as_slice(),
            [GeneratorError::InvalidActionFormat { line: 1 }]
        );
    }

    #[test]
    fn test_generation_ignores_validity_of_other_lines() {
        let source = ["this is not smsl", "action a;", "@@@"];
        let output = IntermediateCodeGenerator::new().generate(&source);

        assert_eq!(output.quadruples, vec![Quadruple::action("a")]);
    }

    #[test]
    fn test_generation_is_repeatable_and_skips_comments() {
        use crate::optimizer::{Optimizer, OptimizerPolicy};

        let source = [
            "state A {",
            "action log;",
            "action log;",
            "action log;",
            "// c",
            "}",
        ];
        let generator = IntermediateCodeGenerator::new();
        let first = generator.generate(&source);
        let second = generator.generate(&source);

        assert_eq!(first.quadruples, second.quadruples);
        assert_eq!(first.errors, second.errors);
        assert_eq!(first.quadruples, vec![Quadruple::action("log"); 3]);

        let optimized = Optimizer::new(OptimizerPolicy::Deduplicate).optimize(&first.quadruples);
        assert_eq!(optimized.quadruples, vec![Quadruple::action("log")]);
    }

    #[test]
    fn test_comment_only_lines_emit_nothing() {
        let source = ["// action log;", "   // transition t1: event e1 -> A {"];
        let output = IntermediateCodeGenerator::new().generate(&source);

        assert!(output.quadruples.is_empty());
        assert!(output.errors.is_empty());
    }
}
