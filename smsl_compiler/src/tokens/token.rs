use crate::grammar::Keyword;
use serde::Serialize;

/// Lexeme classification. Keywords have dedicated kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    State,
    Transition,
    Event,
    Action,
    Start,
    End,
    Identifier,
    Number,
    String,
    Symbol,
    Unknown,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::State => "STATE",
            TokenKind::Transition => "TRANSITION",
            TokenKind::Event => "EVENT",
            TokenKind::Action => "ACTION",
            TokenKind::Start => "START",
            TokenKind::End => "END",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Symbol => "SYMBOL",
            TokenKind::Unknown => "UNKNOWN",
        }
    }

    /// Token index shown in the token table; `Unknown` has none and reports 0
    pub fn index(&self) -> u8 {
        match self {
            TokenKind::State => 1,
            TokenKind::Transition => 2,
            TokenKind::Event => 3,
            TokenKind::Action => 4,
            TokenKind::Start => 5,
            TokenKind::End => 6,
            TokenKind::Identifier => 7,
            TokenKind::Number => 8,
            TokenKind::String => 9,
            TokenKind::Symbol => 10,
            TokenKind::Unknown => 0,
        }
    }

    pub fn is_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::State
                | TokenKind::Transition
                | TokenKind::Event
                | TokenKind::Action
                | TokenKind::Start
                | TokenKind::End
        )
    }
}

impl From<Keyword> for TokenKind {
    fn from(keyword: Keyword) -> Self {
        match keyword {
            Keyword::State => TokenKind::State,
            Keyword::Transition => TokenKind::Transition,
            Keyword::Event => TokenKind::Event,
            Keyword::Action => TokenKind::Action,
            Keyword::Start => TokenKind::Start,
            Keyword::End => TokenKind::End,
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A classified lexeme and the 1-indexed line it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub line_number: usize,
    pub lexeme: String,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(line_number: usize, lexeme: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            line_number,
            lexeme: lexeme.into(),
            kind,
        }
    }

    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.lexeme == symbol
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} '{}'", self.kind, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_indices() {
        assert_eq!(TokenKind::State.index(), 1);
        assert_eq!(TokenKind::Identifier.index(), 7);
        assert_eq!(TokenKind::Symbol.index(), 10);
        assert_eq!(TokenKind::Unknown.index(), 0);
    }

    #[test]
    fn test_keyword_kinds() {
        assert_eq!(TokenKind::from(Keyword::Event), TokenKind::Event);
        assert!(TokenKind::Start.is_keyword());
        assert!(!TokenKind::Identifier.is_keyword());
    }

    #[test]
    fn test_symbol_check() {
        let arrow = Token::new(3, "->", TokenKind::Symbol);
        assert!(arrow.is_symbol("->"));
        assert!(!arrow.is_symbol("{"));
        assert!(!Token::new(3, "->", TokenKind::Unknown).is_symbol("->"));
        assert_eq!(arrow.to_string(), "SYMBOL '->'");
    }
}
