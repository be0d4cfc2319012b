//! Deterministic ordering for standard IPv4 ACLs.
//!
//! IOS may store standard ACL entries in a different order than they were
//! entered, but never moves an entry past another one whose address range
//! intersects it. Grouping rules into maximal runs of pairwise disjoint
//! ranges and sorting each run by address recovers an order that depends only
//! on the rule set, not on the device's history.

use ctxconf_tree::CommandError;

use crate::acl::{StandardRule, parse_standard_rule};

/// Reorder parsed rules into canonical block order.
///
/// One pass collects rules into a block until one overlaps a block member;
/// the block is then emitted sorted by first address and a new block starts
/// with that rule. A single pass is not always stable: a later rule can join
/// the new block and sort ahead of the rule that opened it, and on the next
/// pass it merges into the previous block instead. Passes repeat until the
/// order stops changing.
///
/// Each pass keeps overlapping rules in their input order. Across passes the
/// sequence of block sizes grows lexicographically (a pass over sorted blocks
/// absorbs every member of a block into the block at the same position), so
/// the loop ends after finitely many passes.
///
/// Identical ranges overlap, so duplicates never share a block and keep their
/// input order.
pub fn order_standard_rules(rules: impl IntoIterator<Item = StandardRule>) -> Vec<StandardRule> {
    let mut current = rules.into_iter().collect::<Vec<_>>();
    loop {
        let next = block_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn block_pass(rules: &[StandardRule]) -> Vec<StandardRule> {
    let mut ordered = Vec::with_capacity(rules.len());
    let mut block: Vec<StandardRule> = Vec::new();

    for rule in rules {
        if block.iter().any(|member| member.overlaps(rule)) {
            ordered.append(&mut block);
        }
        let first = rule.range().0;
        let at = block.partition_point(|member| member.range().0 <= first);
        block.insert(at, *rule);
    }

    ordered.append(&mut block);
    ordered
}

/// Canonicalize a standard ACL given as raw rule text.
///
/// The result is a fixed point of the block ordering, so feeding it back in
/// returns it unchanged.
pub fn canonicalize_standard_acl<S: AsRef<str>>(rules: &[S]) -> Result<Vec<String>, CommandError> {
    let parsed = rules
        .iter()
        .map(|rule| parse_standard_rule(rule.as_ref()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(order_standard_rules(parsed)
        .iter()
        .map(ToString::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_before_any_keeps_input_order() {
        let out = canonicalize_standard_acl(&["permit host 10.1.1.1", "deny any"]).expect("acl");
        assert_eq!(out, vec!["permit 10.1.1.1", "deny any"]);
    }

    #[test]
    fn disjoint_rules_sort_by_address() {
        let out = canonicalize_standard_acl(&[
            "permit 10.0.2.0 0.0.0.255",
            "deny host 10.0.1.5",
            "permit 10.0.0.0 0.0.0.255",
        ])
        .expect("acl");
        assert_eq!(
            out,
            vec![
                "permit 10.0.0.0 0.0.0.255",
                "deny 10.0.1.5",
                "permit 10.0.2.0 0.0.0.255"
            ]
        );
    }

    #[test]
    fn overlap_starts_a_new_block() {
        let out = canonicalize_standard_acl(&[
            "permit 10.0.2.0 0.0.0.255",
            "deny host 10.0.1.5",
            "permit 10.0.1.0 0.0.0.255",
            "permit 10.0.0.9",
        ])
        .expect("acl");
        assert_eq!(
            out,
            vec![
                "permit 10.0.0.9",
                "deny 10.0.1.5",
                "permit 10.0.2.0 0.0.0.255",
                "permit 10.0.1.0 0.0.0.255",
            ]
        );
    }

    #[test]
    fn rule_joining_a_later_block_is_settled_in_one_call() {
        let input = ["permit 10.0.0.64 0.0.0.63", "permit 10.0.0.68", "permit 10.0.0.0"];
        let once = canonicalize_standard_acl(&input).expect("once");
        assert_eq!(
            once,
            vec!["permit 10.0.0.0", "permit 10.0.0.64 0.0.0.63", "permit 10.0.0.68"]
        );
        let twice = canonicalize_standard_acl(&once).expect("twice");
        assert_eq!(once, twice);
    }

    #[test]
    fn single_pass_result_is_kept_when_already_stable() {
        let rules = ["permit 10.0.2.0 0.0.0.255", "permit 10.0.1.0 0.0.0.255", "deny any"]
            .iter()
            .map(|rule| parse_standard_rule(rule).expect("rule"))
            .collect::<Vec<_>>();
        let ordered = order_standard_rules(rules.clone());
        assert_eq!(ordered, block_pass(&rules));
    }

    #[test]
    fn duplicates_are_kept() {
        let out = canonicalize_standard_acl(&["deny 10.0.0.1", "permit 10.0.0.1", "deny 10.0.0.1"])
            .expect("acl");
        assert_eq!(out, vec!["deny 10.0.0.1", "permit 10.0.0.1", "deny 10.0.0.1"]);
    }

    #[test]
    fn malformed_rule_fails_the_list() {
        let err = canonicalize_standard_acl(&["permit any", "permit nothing"]).expect_err("bad");
        assert_eq!(err, CommandError::rule("permit nothing"));
    }

    #[test]
    fn empty_acl_stays_empty() {
        let rules: [&str; 0] = [];
        assert!(canonicalize_standard_acl(&rules).expect("empty").is_empty());
    }
}
