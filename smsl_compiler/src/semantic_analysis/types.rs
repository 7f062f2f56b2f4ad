//! Semantic analysis types

use crate::diagnostics::{Diagnostic, Stage};
use crate::logging::codes;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Which declared states an action statement gives content to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionPolicy {
    /// The state declared on the line directly above the action
    #[default]
    #[serde(alias = "adjacent")]
    AdjacentDeclaration,
    /// Every state declared so far
    #[serde(alias = "any")]
    AnyAction,
}

impl AttributionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributionPolicy::AdjacentDeclaration => "adjacent-declaration",
            AttributionPolicy::AnyAction => "any-action",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "adjacent" | "adjacent-declaration" => Some(AttributionPolicy::AdjacentDeclaration),
            "any" | "any-action" => Some(AttributionPolicy::AnyAction),
            _ => None,
        }
    }
}

/// What the analyzer walks over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticInput {
    /// Sanitized source lines
    #[default]
    Lines,
    /// The token stream, grouped by line
    Tokens,
}

impl SemanticInput {
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticInput::Lines => "lines",
            SemanticInput::Tokens => "tokens",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "lines" => Some(SemanticInput::Lines),
            "tokens" => Some(SemanticInput::Tokens),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateRecord {
    pub name: String,
    pub declaration_line: usize,
    pub has_content: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SemanticError {
    #[error("Line {line}: Semantic Error - Duplicate State Declaration: '{name}'")]
    DuplicateState { line: usize, name: String },

    #[error("Line {line}: Semantic Error - Invalid Transition Format")]
    InvalidTransitionFormat { line: usize },

    #[error("Semantic Error - Undefined State Reference: '{name}'")]
    UndefinedStateReference { name: String },

    #[error("Line {line}: Semantic Error - State with No Content: '{name}'")]
    StateWithoutContent { line: usize, name: String },
}

impl SemanticError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            SemanticError::DuplicateState { .. } => codes::semantic::DUPLICATE_STATE,
            SemanticError::InvalidTransitionFormat { .. } => {
                codes::semantic::INVALID_TRANSITION_FORMAT
            }
            SemanticError::UndefinedStateReference { .. } => {
                codes::semantic::UNDEFINED_STATE_REFERENCE
            }
            SemanticError::StateWithoutContent { .. } => codes::semantic::STATE_WITHOUT_CONTENT,
        }
    }

    pub fn line(&self) -> Option<usize> {
        match self {
            SemanticError::DuplicateState { line, .. }
            | SemanticError::InvalidTransitionFormat { line }
            | SemanticError::StateWithoutContent { line, .. } => Some(*line),
            SemanticError::UndefinedStateReference { .. } => None,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::new(
            Stage::Semantic,
            self.line(),
            self.error_code(),
            self.to_string(),
        )
    }
}

/// Declared states in declaration order, looked up by name
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    records: Vec<StateRecord>,
    index: HashMap<String, usize>,
}

impl StateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a state. A repeated name leaves the first record untouched.
    pub fn declare(&mut self, name: &str, line: usize) -> Result<(), SemanticError> {
        if self.index.contains_key(name) {
            return Err(SemanticError::DuplicateState {
                line,
                name: name.to_string(),
            });
        }

        self.index.insert(name.to_string(), self.records.len());
        self.records.push(StateRecord {
            name: name.to_string(),
            declaration_line: line,
            has_content: false,
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&StateRecord> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub fn mark_content(&mut self, name: &str) {
        if let Some(&i) = self.index.get(name) {
            self.records[i].has_content = true;
        }
    }

    pub fn mark_all_content(&mut self) {
        for record in &mut self.records {
            record.has_content = true;
        }
    }

    pub fn records(&self) -> &[StateRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<StateRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Transition targets in first-reference order, each recorded once
#[derive(Debug, Clone, Default)]
pub struct ReferenceSet {
    names: Vec<String>,
    seen: HashSet<String>,
}

impl ReferenceSet {
    pub fn insert(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.names.push(name.to_string());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Result of semantic analysis over one compilation unit
#[derive(Debug, Clone, Default)]
pub struct SemanticOutput {
    pub states: Vec<StateRecord>,
    pub undefined_references: Vec<String>,
    /// Sorted by line; unnumbered entries last
    pub diagnostics: Vec<Diagnostic>,
}

impl SemanticOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn state(&self, name: &str) -> Option<&StateRecord> {
        self.states.iter().find(|record| record.name == name)
    }
}
