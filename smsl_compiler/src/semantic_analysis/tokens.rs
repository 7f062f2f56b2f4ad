//! Token-driven walk
//!
//! Applies the line rules to the token stream grouped by line number.

use super::{AttributionPolicy, Walk};
use crate::grammar::TRANSITION_ARROW;
use crate::tokens::{group_by_line, Token, TokenKind, TokenLine};

/// Name declared by a line made of exactly `state <Identifier> {`
fn declared_on<'a>(line: &TokenLine<'a>) -> Option<&'a str> {
    match line.tokens {
        [keyword, name, brace]
            if keyword.kind == TokenKind::State
                && name.kind == TokenKind::Identifier
                && brace.is_symbol("{") =>
        {
            Some(name.lexeme.as_str())
        }
        _ => None,
    }
}

/// Identifier directly after the last `->`
fn transition_target(tokens: &[Token]) -> Option<&str> {
    let arrow = tokens.iter().rposition(|t| t.is_symbol(TRANSITION_ARROW))?;
    tokens
        .get(arrow + 1)
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.lexeme.as_str())
}

pub(super) fn walk_tokens(tokens: &[Token], policy: AttributionPolicy) -> Walk {
    let mut walk = Walk::default();
    let lines = group_by_line(tokens);

    for (position, line) in lines.iter().enumerate() {
        let Some(first) = line.tokens.first() else {
            continue;
        };

        match first.kind {
            TokenKind::State => {
                if let Some(name) = line
                    .tokens
                    .get(1)
                    .filter(|t| t.kind == TokenKind::Identifier)
                {
                    walk.declare(&name.lexeme, line.number);
                }
            }
            TokenKind::Transition => match transition_target(line.tokens) {
                Some(target) => walk.reference(target),
                None => walk.invalid_transition(line.number),
            },
            TokenKind::Action => {
                let adjacent = position
                    .checked_sub(1)
                    .map(|index| &lines[index])
                    .filter(|previous| previous.number + 1 == line.number)
                    .and_then(declared_on);
                walk.attribute(policy, adjacent);
            }
            _ => {}
        }
    }

    walk
}
