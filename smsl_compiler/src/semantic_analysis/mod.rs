//! Semantic analysis
//!
//! Walks the whole unit once, collecting state declarations, transition
//! targets and content flags, then checks references and content after the
//! walk so forward references are legal. The walk runs over sanitized lines
//! or over the token stream; both apply the same rules.

mod lines;
mod tokens;
pub mod types;

use crate::config::runtime::SemanticPreferences;
use crate::diagnostics::{sort_by_line, Diagnostic};
use crate::logging::codes;
use crate::tokens::Token;
use crate::{log_debug, log_success};

pub use types::{
    AttributionPolicy, ReferenceSet, SemanticError, SemanticInput, SemanticOutput, StateRecord,
    StateTable,
};

/// Accumulated facts during one walk
#[derive(Debug, Default)]
pub(crate) struct Walk {
    pub table: StateTable,
    pub references: ReferenceSet,
    pub errors: Vec<SemanticError>,
}

impl Walk {
    pub fn declare(&mut self, name: &str, line: usize) {
        if let Err(error) = self.table.declare(name, line) {
            log_debug!("Duplicate state declaration", "line" => line, "state" => name);
            self.errors.push(error);
        }
    }

    pub fn reference(&mut self, target: &str) {
        self.references.insert(target);
    }

    pub fn invalid_transition(&mut self, line: usize) {
        self.errors.push(SemanticError::InvalidTransitionFormat { line });
    }

    /// Give content to states per the attribution policy. `adjacent` is the
    /// state declared on the line directly above the action, if any.
    pub fn attribute(&mut self, policy: AttributionPolicy, adjacent: Option<&str>) {
        match policy {
            AttributionPolicy::AdjacentDeclaration => {
                if let Some(name) = adjacent {
                    self.table.mark_content(name);
                }
            }
            AttributionPolicy::AnyAction => self.table.mark_all_content(),
        }
    }

    /// Reference and content checks, then ordering
    fn finish(self) -> SemanticOutput {
        let Walk {
            table,
            references,
            mut errors,
        } = self;

        let undefined: Vec<String> = references
            .iter()
            .filter(|name| !table.contains(name))
            .map(str::to_string)
            .collect();

        errors.extend(
            undefined
                .iter()
                .map(|name| SemanticError::UndefinedStateReference { name: name.clone() }),
        );
        errors.extend(
            table
                .records()
                .iter()
                .filter(|record| !record.has_content)
                .map(|record| SemanticError::StateWithoutContent {
                    line: record.declaration_line,
                    name: record.name.clone(),
                }),
        );

        let mut diagnostics: Vec<Diagnostic> =
            errors.iter().map(SemanticError::to_diagnostic).collect();
        sort_by_line(&mut diagnostics);

        SemanticOutput {
            states: table.into_records(),
            undefined_references: undefined,
            diagnostics,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SemanticAnalyzer {
    preferences: SemanticPreferences,
}

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: SemanticPreferences) -> Self {
        Self { preferences }
    }

    pub fn preferences(&self) -> &SemanticPreferences {
        &self.preferences
    }

    /// Analyze one unit. `lines` are the raw source lines and `tokens` the
    /// tokenizer output for them; which one is walked depends on the
    /// configured input mode.
    pub fn analyze<S: AsRef<str>>(&self, lines: &[S], tokens: &[Token]) -> SemanticOutput {
        let policy = self.preferences.attribution;
        let walk = match self.preferences.input {
            SemanticInput::Lines => lines::walk_lines(lines, policy),
            SemanticInput::Tokens => tokens::walk_tokens(tokens, policy),
        };

        let output = walk.finish();

        if !output.has_errors() {
            log_success!(
                codes::success::SEMANTIC_ANALYSIS_COMPLETE,
                "Semantic analysis complete",
                "states" => output.states.len(),
                "input" => self.preferences.input.as_str()
            );
        }

        output
    }
}

/// Line-driven analysis with adjacent-declaration attribution
pub fn analyze<S: AsRef<str>>(lines: &[S]) -> SemanticOutput {
    SemanticAnalyzer::with_preferences(SemanticPreferences {
        attribution: AttributionPolicy::AdjacentDeclaration,
        input: SemanticInput::Lines,
    })
    .analyze(lines, &[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;

    const PROGRAM: &[&str] = &[
        "start;",
        "state Idle {",
        "    action log;",
        "    transition t1: event e1 -> Busy {",
        "    }",
        "}",
        "state Busy {",
        "    action work;",
        "}",
        "end;",
    ];

    fn analyzer(input: SemanticInput, attribution: AttributionPolicy) -> SemanticAnalyzer {
        SemanticAnalyzer::with_preferences(SemanticPreferences { attribution, input })
    }

    fn messages(output: &SemanticOutput) -> Vec<&str> {
        output
            .diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect()
    }

    #[test]
    fn test_clean_program_has_no_diagnostics() {
        let output = analyze(PROGRAM);

        assert!(!output.has_errors(), "{:?}", messages(&output));
        assert_eq!(output.states.len(), 2);
        assert!(output.states.iter().all(|s| s.has_content));
        assert!(output.undefined_references.is_empty());
    }

    #[test]
    fn test_forward_reference_is_legal() {
        let source = [
            "state A {",
            "action a;",
            "transition t: go -> B {",
            "}",
            "state B {",
            "action b;",
            "}",
        ];
        assert!(!analyze(&source).has_errors());
    }

    #[test]
    fn test_undefined_reference_reported_once_without_line() {
        let source = [
            "state A {",
            "action a;",
            "transition t1: go -> Ghost {",
            "transition t2: again -> Ghost {",
            "}",
        ];
        let output = analyze(&source);

        assert_eq!(
            messages(&output),
            vec!["Semantic Error - Undefined State Reference: 'Ghost'"]
        );
        assert_eq!(output.undefined_references, vec!["Ghost".to_string()]);
    }

    #[test]
    fn test_duplicate_and_contentless_states_sorted_by_line() {
        let source = [
            "transition t1: go -> Nowhere {",
            "state S {",
            "}",
            "state S {",
            "}",
            "state T {",
            "action t;",
            "}",
        ];
        let output = analyze(&source);

        assert_eq!(
            messages(&output),
            vec![
                "Line 2: Semantic Error - State with No Content: 'S'",
                "Line 4: Semantic Error - Duplicate State Declaration: 'S'",
                "Semantic Error - Undefined State Reference: 'Nowhere'",
            ]
        );
        assert_eq!(output.state("S").map(|s| s.declaration_line), Some(2));
    }

    #[test]
    fn test_short_transition_is_invalid_format() {
        let source = ["state A {", "action a;", "transition t1: e1", "}"];
        let output = analyze(&source);

        assert_eq!(
            messages(&output),
            vec!["Line 3: Semantic Error - Invalid Transition Format"]
        );
    }

    #[test]
    fn test_adjacent_policy_ignores_non_adjacent_actions() {
        let source = [
            "state A {",
            "transition t: go -> A {",
            "action late;",
            "}",
        ];

        let adjacent = analyzer(SemanticInput::Lines, AttributionPolicy::AdjacentDeclaration)
            .analyze(&source, &[]);
        assert_eq!(
            messages(&adjacent),
            vec!["Line 1: Semantic Error - State with No Content: 'A'"]
        );

        let any = analyzer(SemanticInput::Lines, AttributionPolicy::AnyAction)
            .analyze(&source, &[]);
        assert!(!any.has_errors());
    }

    #[test]
    fn test_any_action_marks_only_states_declared_so_far() {
        let source = ["state A {", "action a;", "}", "state B {", "}"];
        let output = analyzer(SemanticInput::Lines, AttributionPolicy::AnyAction)
            .analyze(&source, &[]);

        assert_eq!(
            messages(&output),
            vec!["Line 4: Semantic Error - State with No Content: 'B'"]
        );
    }

    #[test]
    fn test_token_input_agrees_with_line_input() {
        let lexed = tokenize(PROGRAM);
        for policy in [AttributionPolicy::AdjacentDeclaration, AttributionPolicy::AnyAction] {
            let by_lines = analyzer(SemanticInput::Lines, policy).analyze(PROGRAM, &lexed.tokens);
            let by_tokens =
                analyzer(SemanticInput::Tokens, policy).analyze(PROGRAM, &lexed.tokens);

            assert_eq!(by_lines.diagnostics, by_tokens.diagnostics);
            assert_eq!(by_lines.states, by_tokens.states);
        }
    }

    #[test]
    fn test_analysis_is_idempotent() {
        let source = ["state S {", "}", "state S {", "transition t: e -> X {"];
        let first = analyze(&source);
        let second = analyze(&source);

        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.states, second.states);
    }
}
