//! Policy compilation: prioritized rules -> algebra tree
//!
//! Compilation happens in three steps:
//!
//! 1. **Conflict reduction**: rules constraining the identical
//!    (subject, predicate, object) pattern collapse to the one with the
//!    highest priority, regardless of effect. Ties keep the first-seen
//!    rule, so reduction is deterministic.
//! 2. **Empty input**: no applicable rules means no filtering - the result
//!    is [`Node::Any`] and the role sees the whole dataset.
//! 3. **Fold**: the reduced rules, sorted ascending by priority, fold into
//!    a tree. Consecutive same-effect rules share one `Union` block; each
//!    effect flip wraps the accumulated structure, so later (higher
//!    priority) rules always form the outer layer.

use crate::types::{Effect, Node, Pattern, Rule, Union};

/// Compile a role's selected rules into the filtering-query algebra tree.
pub fn compile(rules: &[&Rule]) -> Node {
    let mut reduced = reduce_conflicts(rules);
    if reduced.is_empty() {
        return Node::Any;
    }

    // Stable sort: equal priorities stay in first-seen order.
    reduced.sort_by_key(|rule| rule.priority());

    let mut root: Option<Node> = None;
    for rule in reduced {
        let pattern = Node::Pattern(Pattern::from_rule(rule));
        root = Some(match (root.take(), rule.effect()) {
            // Extend the current additive run.
            (Some(Node::Union(mut union)), Effect::Allow) => {
                union.push(pattern);
                Node::Union(union)
            }
            // Effect flipped to allow: the accumulated tree becomes the
            // union's first alternative.
            (Some(prev), Effect::Allow) => {
                let mut union = Union::new(prev);
                union.push(pattern);
                Node::Union(union)
            }
            (None, Effect::Allow) => Node::Union(Union::new(pattern)),
            // Extend the current subtractive run.
            (Some(Node::Difference { base, mut subtrahend }), Effect::Deny) => {
                subtrahend.push(pattern);
                Node::Difference { base, subtrahend }
            }
            // Effect flipped to deny: subtract from everything accumulated
            // so far (or from the unconstrained pattern if nothing was).
            (prev, Effect::Deny) => Node::Difference {
                base: Box::new(prev.unwrap_or(Node::Any)),
                subtrahend: Union::new(pattern),
            },
        });
    }

    // The reduced set was non-empty, so the fold produced a root.
    root.unwrap_or(Node::Any)
}

/// Collapse rules targeting the identical (s, p, o) pattern down to the
/// highest-priority one. First-seen order is preserved, and a later rule
/// replaces an earlier one only on strictly greater priority.
fn reduce_conflicts<'a>(rules: &[&'a Rule]) -> Vec<&'a Rule> {
    let mut kept: Vec<&Rule> = Vec::new();
    for &rule in rules {
        match kept.iter_mut().find(|k| k.same_pattern(rule)) {
            Some(winner) => {
                if rule.priority() > winner.priority() {
                    *winner = rule;
                }
            }
            None => kept.push(rule),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize, RuleDecl};
    use crate::types::RuleSet;

    fn rules(json: serde_json::Value) -> RuleSet {
        let decls: Vec<RuleDecl> = serde_json::from_value(json).unwrap();
        normalize(decls)
    }

    fn compile_all(set: &RuleSet) -> Node {
        let selected: Vec<&Rule> = set.rules().iter().collect();
        compile(&selected)
    }

    #[test]
    fn empty_rule_set_compiles_to_any() {
        assert_eq!(compile(&[]), Node::Any);
    }

    #[test]
    fn all_allow_rules_form_a_single_union() {
        let set = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:a>", "priority": 0},
            {"permission": "allow", "subject": "<urn:b>", "priority": 1},
            {"permission": "allow", "subject": "<urn:c>", "priority": 2}
        ]));

        match compile_all(&set) {
            Node::Union(union) => {
                assert_eq!(union.children().len(), 3);
                assert!(union
                    .children()
                    .iter()
                    .all(|c| matches!(c, Node::Pattern(_))));
            }
            other => panic!("expected Union, got {other:?}"),
        }
    }

    #[test]
    fn all_deny_rules_form_a_difference_with_any_base() {
        let set = rules(serde_json::json!([
            {"permission": "deny", "subject": "<urn:a>", "priority": 0},
            {"permission": "deny", "subject": "<urn:b>", "priority": 1}
        ]));

        match compile_all(&set) {
            Node::Difference { base, subtrahend } => {
                assert_eq!(*base, Node::Any);
                assert_eq!(subtrahend.children().len(), 2);
            }
            other => panic!("expected Difference, got {other:?}"),
        }
    }

    #[test]
    fn conflict_reduction_keeps_only_the_highest_priority_rule() {
        let set = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:s>", "priority": 1},
            {"permission": "deny", "subject": "<urn:s>", "priority": 5}
        ]));

        // Both rules target the identical pattern; the deny at priority 5
        // wins outright and the allow disappears entirely.
        match compile_all(&set) {
            Node::Difference { base, subtrahend } => {
                assert_eq!(*base, Node::Any);
                assert_eq!(subtrahend.children().len(), 1);
            }
            other => panic!("expected Difference, got {other:?}"),
        }
    }

    #[test]
    fn conflict_reduction_tie_keeps_first_seen() {
        let set = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:s>", "priority": 2},
            {"permission": "deny", "subject": "<urn:s>", "priority": 2}
        ]));

        match compile_all(&set) {
            Node::Union(union) => assert_eq!(union.children().len(), 1),
            other => panic!("expected Union, got {other:?}"),
        }
    }

    #[test]
    fn rules_differing_in_one_position_are_not_merged() {
        let set = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:s>", "object": "<urn:o1>", "priority": 0},
            {"permission": "allow", "subject": "<urn:s>", "object": "<urn:o2>", "priority": 1}
        ]));

        match compile_all(&set) {
            Node::Union(union) => assert_eq!(union.children().len(), 2),
            other => panic!("expected Union, got {other:?}"),
        }
    }

    #[test]
    fn higher_priority_deny_wraps_lower_priority_allows() {
        let set = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:a>", "priority": 0},
            {"permission": "allow", "subject": "<urn:b>", "priority": 1},
            {"permission": "deny", "subject": "<urn:secret>", "priority": 2}
        ]));

        match compile_all(&set) {
            Node::Difference { base, subtrahend } => {
                match *base {
                    Node::Union(ref union) => assert_eq!(union.children().len(), 2),
                    ref other => panic!("expected Union base, got {other:?}"),
                }
                assert_eq!(subtrahend.children().len(), 1);
            }
            other => panic!("expected Difference, got {other:?}"),
        }
    }

    #[test]
    fn higher_priority_allow_wraps_a_prior_deny_run() {
        let set = rules(serde_json::json!([
            {"permission": "deny", "subject": "<urn:hidden>", "priority": 0},
            {"permission": "allow", "subject": "<urn:override>", "priority": 1}
        ]));

        match compile_all(&set) {
            Node::Union(union) => {
                assert_eq!(union.children().len(), 2);
                assert!(matches!(union.children()[0], Node::Difference { .. }));
                assert!(matches!(union.children()[1], Node::Pattern(_)));
            }
            other => panic!("expected Union, got {other:?}"),
        }
    }

    #[test]
    fn input_order_does_not_change_nesting() {
        let forward = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:a>", "priority": 0},
            {"permission": "deny", "subject": "<urn:b>", "priority": 1}
        ]));
        let reversed = rules(serde_json::json!([
            {"permission": "deny", "subject": "<urn:b>", "priority": 1},
            {"permission": "allow", "subject": "<urn:a>", "priority": 0}
        ]));

        assert_eq!(compile_all(&forward), compile_all(&reversed));
    }

    #[test]
    fn alternating_effects_nest_outward() {
        let set = rules(serde_json::json!([
            {"permission": "allow", "subject": "<urn:a>", "priority": 0},
            {"permission": "deny", "subject": "<urn:b>", "priority": 1},
            {"permission": "allow", "subject": "<urn:c>", "priority": 2},
            {"permission": "deny", "subject": "<urn:d>", "priority": 3}
        ]));

        // Outermost layer is the priority-3 deny; inside it, the priority-2
        // allow union wrapping the earlier difference.
        match compile_all(&set) {
            Node::Difference { base, subtrahend } => {
                assert_eq!(subtrahend.children().len(), 1);
                match *base {
                    Node::Union(ref union) => {
                        assert_eq!(union.children().len(), 2);
                        assert!(matches!(union.children()[0], Node::Difference { .. }));
                    }
                    ref other => panic!("expected Union base, got {other:?}"),
                }
            }
            other => panic!("expected Difference, got {other:?}"),
        }
    }
}
