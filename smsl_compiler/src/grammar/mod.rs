//! SMSL vocabulary and statement shapes
//!
//! The language has no recursive grammar. Statements are recognised by their
//! leading keyword and a handful of positional checks (see [`statement`]).

pub mod keywords;
pub mod statement;

pub use keywords::Keyword;
pub use statement::{split_transition, StatementKind, TransitionParts, TRANSITION_ARROW};
