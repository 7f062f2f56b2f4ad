//! Line-wise view over a flat token stream

use super::Token;

/// Consecutive tokens sharing one source line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenLine<'a> {
    pub number: usize,
    pub tokens: &'a [Token],
}

/// Group a token stream (ordered by line) into per-line slices
pub fn group_by_line(tokens: &[Token]) -> Vec<TokenLine<'_>> {
    let mut lines = Vec::new();
    let mut start = 0;

    for index in 1..=tokens.len() {
        let boundary = index == tokens.len()
            || tokens[index].line_number != tokens[start].line_number;
        if boundary {
            lines.push(TokenLine {
                number: tokens[start].line_number,
                tokens: &tokens[start..index],
            });
            start = index;
        }
    }

    lines
}
