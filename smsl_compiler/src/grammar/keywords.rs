//! Reserved words of the SMSL language
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    State,
    Transition,
    Event,
    Action,
    Start,
    End,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::State,
        Keyword::Transition,
        Keyword::Event,
        Keyword::Action,
        Keyword::Start,
        Keyword::End,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Keyword::State => "state",
            Keyword::Transition => "transition",
            Keyword::Event => "event",
            Keyword::Action => "action",
            Keyword::Start => "start",
            Keyword::End => "end",
        }
    }

    /// Exact, case-sensitive keyword lookup
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|keyword| keyword.as_str() == s)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_round_trips() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_str(keyword.as_str()), Some(keyword));
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert_eq!(Keyword::from_str("State"), None);
        assert_eq!(Keyword::from_str("states"), None);
        assert_eq!(Keyword::from_str(""), None);
    }
}
