//! Optimization passes. Each pass keeps survivors in their original order.

use crate::intermediate::Quadruple;
use std::collections::{HashMap, HashSet};

/// Collapse runs of adjacent `ACTION`s with the same name to their first
/// member. Returns the number removed.
pub fn collapse_repeated_actions(quadruples: &mut Vec<Quadruple>) -> usize {
    let before = quadruples.len();
    quadruples.dedup_by(|current, kept| {
        current.is_action() && kept.is_action() && current.arg1 == kept.arg1
    });
    before - quadruples.len()
}

/// Drop every quadruple equal to one seen earlier. Returns the number removed.
pub fn eliminate_common_subexpressions(quadruples: &mut Vec<Quadruple>) -> usize {
    let before = quadruples.len();
    let mut seen: HashSet<Quadruple> = HashSet::with_capacity(before);
    quadruples.retain(|quadruple| seen.insert(quadruple.clone()));
    before - quadruples.len()
}

/// Rename later transitions sharing an (event, target) pair with an earlier
/// one to `<first>_<this>`. Returns the number renamed.
pub fn merge_transitions(quadruples: &mut [Quadruple]) -> usize {
    let mut first_by_key: HashMap<(String, String), String> = HashMap::new();
    let mut renamed = 0;

    for quadruple in quadruples.iter_mut().filter(|q| q.is_transition()) {
        let key = (quadruple.arg2.clone(), quadruple.arg3.clone());
        match first_by_key.get(&key) {
            Some(first) => {
                quadruple.arg1 = format!("{}_{}", first, quadruple.arg1);
                renamed += 1;
            }
            None => {
                first_by_key.insert(key, quadruple.arg1.clone());
            }
        }
    }

    renamed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_adjacent_actions_collapse() {
        let mut quadruples = vec![
            Quadruple::action("a"),
            Quadruple::action("a"),
            Quadruple::action("a"),
            Quadruple::transition("t", "e", "S"),
            Quadruple::action("a"),
        ];

        assert_eq!(collapse_repeated_actions(&mut quadruples), 2);
        assert_eq!(
            quadruples,
            vec![
                Quadruple::action("a"),
                Quadruple::transition("t", "e", "S"),
                Quadruple::action("a"),
            ]
        );
    }

    #[test]
    fn test_adjacent_equal_transitions_are_left_to_cse() {
        let mut quadruples = vec![
            Quadruple::transition("t", "e", "S"),
            Quadruple::transition("t", "e", "S"),
        ];
        assert_eq!(collapse_repeated_actions(&mut quadruples), 0);
        assert_eq!(eliminate_common_subexpressions(&mut quadruples), 1);
    }

    #[test]
    fn test_cse_keeps_first_occurrence_order() {
        let mut quadruples = vec![
            Quadruple::action("b"),
            Quadruple::action("a"),
            Quadruple::action("b"),
            Quadruple::action("c"),
            Quadruple::action("a"),
        ];

        assert_eq!(eliminate_common_subexpressions(&mut quadruples), 2);
        let names: Vec<&str> = quadruples.iter().map(|q| q.arg1.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_merge_renames_against_first_name() {
        let mut quadruples = vec![
            Quadruple::transition("t1", "go", "B"),
            Quadruple::action("x"),
            Quadruple::transition("t2", "go", "B"),
            Quadruple::transition("t3", "go", "B"),
            Quadruple::transition("t4", "stop", "B"),
        ];

        assert_eq!(merge_transitions(&mut quadruples), 2);
        let names: Vec<&str> = quadruples.iter().map(|q| q.arg1.as_str()).collect();
        assert_eq!(names, vec!["t1", "x", "t1_t2", "t1_t3", "t4"]);
    }
}
