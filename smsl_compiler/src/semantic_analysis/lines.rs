//! Line-driven walk

use super::{AttributionPolicy, Walk};
use crate::grammar::{StatementKind, TransitionParts};
use crate::utils::{sanitize_line, significant_lines};

/// Name declared by a line that reads exactly `state <name> {`
fn declared_on(line: &str) -> Option<&str> {
    let name = line.strip_prefix("state ")?.strip_suffix(" {")?;
    (!name.is_empty() && !name.contains(char::is_whitespace)).then_some(name)
}

/// Second whitespace field of a `state` line
fn state_name(line: &str) -> Option<&str> {
    line.split_whitespace().nth(1)
}

pub(super) fn walk_lines<S: AsRef<str>>(lines: &[S], policy: AttributionPolicy) -> Walk {
    let mut walk = Walk::default();

    for line in significant_lines(lines) {
        match StatementKind::classify(line.text) {
            StatementKind::StateDeclaration => {
                if let Some(name) = state_name(line.text) {
                    walk.declare(name, line.number);
                }
            }
            StatementKind::TransitionDeclaration => match TransitionParts::parse(line.text) {
                Some(parts) => walk.reference(parts.target()),
                None => walk.invalid_transition(line.number),
            },
            StatementKind::Action => {
                // The raw line directly above, blank or not
                let previous = line
                    .number
                    .checked_sub(2)
                    .and_then(|index| lines.get(index))
                    .map(|raw| sanitize_line(raw.as_ref()));
                walk.attribute(policy, previous.and_then(declared_on));
            }
            StatementKind::Marker | StatementKind::Brace | StatementKind::Unrecognized => {}
        }
    }

    walk
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_on_requires_exact_shape() {
        assert_eq!(declared_on("state Idle {"), Some("Idle"));
        assert_eq!(declared_on("state Idle{"), None);
        assert_eq!(declared_on("state Idle extra {"), None);
        assert_eq!(declared_on("transition t: e -> Idle {"), None);
    }

    #[test]
    fn test_blank_line_breaks_adjacency() {
        let source = ["state A {", "", "action a;", "}"];
        let walk = walk_lines(&source, AttributionPolicy::AdjacentDeclaration);

        assert_eq!(walk.table.get("A").map(|r| r.has_content), Some(false));
    }

    #[test]
    fn test_comment_after_declaration_keeps_adjacency() {
        let source = ["state A { // entry", "action a;", "}"];
        let walk = walk_lines(&source, AttributionPolicy::AdjacentDeclaration);

        assert_eq!(walk.table.get("A").map(|r| r.has_content), Some(true));
    }

    #[test]
    fn test_targets_collected_in_reference_order() {
        let source = ["transition t1: e -> B {", "transition t2: e -> A {"];
        let walk = walk_lines(&source, AttributionPolicy::AnyAction);

        assert_eq!(walk.references.iter().collect::<Vec<_>>(), vec!["B", "A"]);
        assert!(walk.errors.is_empty());
    }
}
