//! Statement classification and the transition splitter
//!
//! Every stage that looks at whole lines (syntax, line-driven semantics,
//! code generation) dispatches through [`StatementKind::classify`] and splits
//! transitions with [`split_transition`], so they agree on what a line is.

use regex::Regex;
use std::sync::OnceLock;

pub const TRANSITION_ARROW: &str = "->";

/// Statement kind, decided by the line's leading text only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    StateDeclaration,
    TransitionDeclaration,
    Action,
    Marker,
    Brace,
    Unrecognized,
}

impl StatementKind {
    /// Classify a sanitized line
    pub fn classify(line: &str) -> Self {
        if line.starts_with("state ") {
            StatementKind::StateDeclaration
        } else if line.starts_with("transition") {
            StatementKind::TransitionDeclaration
        } else if line.starts_with("action") {
            StatementKind::Action
        } else if line == "start;" || line == "end;" {
            StatementKind::Marker
        } else if line == "{" || line == "}" {
            StatementKind::Brace
        } else {
            StatementKind::Unrecognized
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::StateDeclaration => "StateDeclaration",
            StatementKind::TransitionDeclaration => "TransitionDeclaration",
            StatementKind::Action => "Action",
            StatementKind::Marker => "Marker",
            StatementKind::Brace => "Brace",
            StatementKind::Unrecognized => "Unrecognized",
        }
    }
}

fn separator() -> &'static Regex {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    SEPARATOR.get_or_init(|| {
        Regex::new(r"\s*(?::|->)\s*").expect("transition separator pattern is valid")
    })
}

/// Split a transition line on `:` and `->` separators (with optional
/// surrounding whitespace). Trailing empty parts are discarded.
pub fn split_transition(line: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = separator().split(line).collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}

/// A transition line split into at least three parts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionParts<'a> {
    parts: Vec<&'a str>,
}

impl<'a> TransitionParts<'a> {
    /// `None` when the split yields fewer than three parts
    pub fn parse(line: &'a str) -> Option<Self> {
        let parts = split_transition(line);
        (parts.len() >= 3).then_some(Self { parts })
    }

    /// Part 0, e.g. `transition t1`
    pub fn header(&self) -> &'a str {
        self.parts[0]
    }

    /// Second whitespace field of the header
    pub fn name(&self) -> Option<&'a str> {
        self.header().split_whitespace().nth(1)
    }

    /// Part 1, trimmed
    pub fn event(&self) -> &'a str {
        self.parts[1].trim()
    }

    /// Part 2 without its trailing `{`, trimmed
    pub fn target(&self) -> &'a str {
        let target = self.parts[2].trim();
        target.strip_suffix('{').unwrap_or(target).trim()
    }

    pub fn last(&self) -> &'a str {
        self.parts[self.parts.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}
