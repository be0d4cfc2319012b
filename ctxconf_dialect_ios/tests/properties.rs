use std::collections::HashSet;
use std::net::Ipv4Addr;

use ctxconf_dialect_ios::{
    SERVICE_PORTS, StandardRule, Verdict, canonicalize_standard_acl, ipv4_network_to_ios_text,
    order_standard_rules, service_name_to_port,
};
use ipnet::Ipv4Net;
use proptest::prelude::*;

fn rule_strategy() -> impl Strategy<Value = StandardRule> {
    (any::<bool>(), any::<u32>(), 0u8..=32).prop_map(|(permit, addr, prefix)| {
        let network = Ipv4Net::new(Ipv4Addr::from(addr), prefix)
            .expect("prefix within range")
            .trunc();
        let verdict = if permit { Verdict::Permit } else { Verdict::Deny };
        StandardRule { verdict, network }
    })
}

/// Small address space so overlaps actually happen.
fn clustered_rule_strategy() -> impl Strategy<Value = StandardRule> {
    (any::<bool>(), 0u32..64, 26u8..=32).prop_map(|(permit, offset, prefix)| {
        let addr = Ipv4Addr::new(10, 0, 0, 0);
        let network = Ipv4Net::new(Ipv4Addr::from(u32::from(addr) + offset * 4), prefix)
            .expect("prefix within range")
            .trunc();
        let verdict = if permit { Verdict::Permit } else { Verdict::Deny };
        StandardRule { verdict, network }
    })
}

fn render(rules: &[StandardRule]) -> Vec<String> {
    rules.iter().map(ToString::to_string).collect()
}

fn unique_by_network(rules: Vec<StandardRule>) -> Vec<StandardRule> {
    let mut seen = HashSet::new();
    rules
        .into_iter()
        .filter(|rule| seen.insert(rule.network))
        .collect()
}

fn disjoint_acl() -> impl Strategy<Value = (Vec<String>, Vec<String>)> {
    prop::collection::btree_set(any::<u16>(), 0..20)
        .prop_flat_map(|subnets| {
            let rules = subnets
                .into_iter()
                .map(|n| format!("permit 10.{}.{}.0 0.0.0.255", n >> 8, n & 0xff))
                .collect::<Vec<_>>();
            (Just(rules.clone()), Just(rules).prop_shuffle())
        })
}

proptest! {
    #[test]
    fn canonicalization_is_idempotent(rules in prop::collection::vec(rule_strategy(), 0..30)) {
        let once = canonicalize_standard_acl(&render(&rules)).expect("first pass");
        let twice = canonicalize_standard_acl(&once).expect("second pass");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn clustered_canonicalization_is_idempotent(
        rules in prop::collection::vec(clustered_rule_strategy(), 0..30)
    ) {
        let once = canonicalize_standard_acl(&render(&rules)).expect("first pass");
        let twice = canonicalize_standard_acl(&once).expect("second pass");
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn ordering_is_a_fixed_point(rules in prop::collection::vec(clustered_rule_strategy(), 0..40)) {
        let ordered = order_standard_rules(rules);
        prop_assert_eq!(order_standard_rules(ordered.clone()), ordered);
    }

    #[test]
    fn disjoint_permutations_canonicalize_equally((original, shuffled) in disjoint_acl()) {
        let a = canonicalize_standard_acl(&original).expect("original");
        let b = canonicalize_standard_acl(&shuffled).expect("shuffled");
        prop_assert_eq!(a, b);
    }

    #[test]
    fn overlapping_rules_keep_relative_order(
        rules in prop::collection::vec(clustered_rule_strategy(), 0..30)
    ) {
        let rules = unique_by_network(rules);
        let ordered = order_standard_rules(rules.clone());
        prop_assert_eq!(ordered.len(), rules.len());

        let position = |rule: &StandardRule| {
            ordered
                .iter()
                .position(|candidate| candidate.network == rule.network)
                .expect("every rule survives")
        };
        for (i, earlier) in rules.iter().enumerate() {
            for later in &rules[i + 1..] {
                if earlier.overlaps(later) {
                    prop_assert!(position(earlier) < position(later));
                }
            }
        }
    }

    #[test]
    fn numeric_ports_pass_through(port in any::<u16>()) {
        prop_assert_eq!(service_name_to_port(&port.to_string()), Ok(port));
    }

    #[test]
    fn ios_text_round_trips_through_the_parser(rule in rule_strategy()) {
        let text = format!("{} {}", rule.verdict, ipv4_network_to_ios_text(&rule.network));
        let parsed = ctxconf_dialect_ios::parse_standard_rule(&text).expect("renders parse back");
        prop_assert_eq!(parsed, rule);
    }
}

#[test]
fn service_table_lookups_match_the_table() {
    for (name, port) in SERVICE_PORTS {
        assert_eq!(service_name_to_port(name), Ok(*port));
    }
}
