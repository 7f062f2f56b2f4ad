//! Per-statement shape checks

use crate::grammar::{Keyword, StatementKind, TransitionParts};

/// Accepted statement shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementShape {
    StateDeclaration,
    TransitionDeclaration,
    Action,
    Marker,
    Brace,
}

impl StatementShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementShape::StateDeclaration => "StateDeclaration",
            StatementShape::TransitionDeclaration => "TransitionDeclaration",
            StatementShape::Action => "Action",
            StatementShape::Marker => "Marker",
            StatementShape::Brace => "Brace",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid(StatementShape),
    Invalid { reason: String },
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid(_))
    }

    fn invalid(reason: &str) -> Self {
        Validation::Invalid {
            reason: reason.to_string(),
        }
    }
}

/// Check one sanitized, non-empty line against the five statement shapes
pub fn validate_statement(line: &str) -> Validation {
    match StatementKind::classify(line) {
        StatementKind::StateDeclaration => validate_state(line),
        StatementKind::TransitionDeclaration => validate_transition(line),
        StatementKind::Action => validate_action(line),
        StatementKind::Marker => Validation::Valid(StatementShape::Marker),
        StatementKind::Brace => Validation::Valid(StatementShape::Brace),
        StatementKind::Unrecognized => {
            Validation::invalid("line matches no statement form")
        }
    }
}

fn validate_state(line: &str) -> Validation {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [keyword, _name, "{"] if *keyword == Keyword::State.as_str() => {
            Validation::Valid(StatementShape::StateDeclaration)
        }
        _ => Validation::invalid("state declaration must be `state <name> {`"),
    }
}

fn validate_transition(line: &str) -> Validation {
    let Some(parts) = TransitionParts::parse(line) else {
        return Validation::invalid("transition needs `<header>: <event> -> <target>` parts");
    };

    let header: Vec<&str> = parts.header().split_whitespace().collect();
    if header.len() != 2 || header[0] != Keyword::Transition.as_str() {
        return Validation::invalid("transition header must be `transition <name>`");
    }

    if !parts.last().ends_with('{') {
        return Validation::invalid("transition must end with `{`");
    }

    Validation::Valid(StatementShape::TransitionDeclaration)
}

fn validate_action(line: &str) -> Validation {
    let fields: Vec<&str> = line.split_whitespace().collect();
    match fields.as_slice() {
        [keyword, name] if *keyword == Keyword::Action.as_str() && name.ends_with(';') => {
            Validation::Valid(StatementShape::Action)
        }
        _ => Validation::invalid("action statement must be `action <name>;`"),
    }
}
