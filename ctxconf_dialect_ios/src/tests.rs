use ctxconf_tree::{CommandError, ConfigTree, Key, Value};

use super::{
    IosDialect, IosOptions, TrailingClausePolicy, parse_ios, parse_ios_lines, reorder_standard_acls,
};

fn path(keys: &[&str]) -> Vec<Key> {
    keys.iter().map(|k| Key::from(*k)).collect()
}

fn strings(value: Option<&Value>) -> Vec<&str> {
    value
        .and_then(Value::as_list)
        .map(|list| list.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}

fn ints(value: Option<&Value>) -> Vec<i64> {
    value
        .and_then(Value::as_set)
        .map(|set| set.iter().filter_map(Value::as_int).collect())
        .unwrap_or_default()
}

#[test]
fn numbered_standard_acl_keeps_overlapping_order() {
    let tree = parse_ios_lines(&["access-list 10 permit host 10.1.1.1", "access-list 10 deny any"])
        .expect("parse");
    assert_eq!(
        strings(tree.pointer(&path(&["ip-acl-std", "10"]))),
        vec!["permit 10.1.1.1", "deny any"]
    );
}

#[test]
fn interface_address_lands_under_canonical_name() {
    let tree = parse_ios_lines(&["interface GigabitEthernet0/1", " ip address 10.0.0.1 255.255.255.0"])
        .expect("parse");
    assert_eq!(
        tree.pointer(&path(&["interface", "Gi0/1", "ip-addr"])),
        Some(&Value::from("10.0.0.1 255.255.255.0"))
    );
}

#[test]
fn named_extended_acl_rules_are_canonicalized() {
    let tree = parse_ios("ip access-list extended WEB\n permit tcp any eq www host 10.1.1.1\n")
        .expect("parse");
    assert_eq!(
        strings(tree.pointer(&path(&["ip-acl-ext", "WEB"]))),
        vec!["permit tcp any eq 80 host 10.1.1.1"]
    );
}

#[test]
fn trunk_allowed_vlans_accumulate() {
    let input = "interface Gi1/0/1\n switchport trunk allowed vlan 5,7-9\n description uplink\n switchport trunk allowed vlan add 12\n";
    let tree = parse_ios(input).expect("parse");
    assert_eq!(
        ints(tree.pointer(&path(&["interface", "Gi1/0/1", "swport-trunk-allow"]))),
        vec![5, 7, 8, 9, 12]
    );
}

#[test]
fn cdp_enable_is_stored_as_boolean() {
    let tree = parse_ios("interface Fa0/1\n no cdp enable\ninterface Fa0/2\n cdp enable\n")
        .expect("parse");
    assert_eq!(
        tree.pointer(&path(&["interface", "Fa0/1", "cdp-enable"])),
        Some(&Value::Bool(false))
    );
    assert_eq!(
        tree.pointer(&path(&["interface", "Fa0/2", "cdp-enable"])),
        Some(&Value::Bool(true))
    );
}

#[test]
fn malformed_extended_rule_aborts_the_parse() {
    let lines = ["hostname edge", "ip access-list extended BAD", " permit bogus any any"];
    let err = parse_ios_lines(&lines).expect_err("unknown protocol");
    assert_eq!(err.line_no, Some(3));
    assert_eq!(err.line, "permit bogus any any");
    assert_eq!(err.cause, CommandError::rule("permit bogus any any"));
}

#[test]
fn interface_spellings_share_one_key() {
    let input = "int gi1/0/1\n description a\ninterface GigabitEthernet1/0/1\n mtu 9000\ninterface gigabitEthernet 1/0/1\n shutdown\n";
    let tree = parse_ios(input).expect("parse");
    let interfaces = tree.get("interface").and_then(Value::as_map).expect("interfaces");
    assert_eq!(interfaces.len(), 1);
    let gi = &interfaces[&Key::from("Gi1/0/1")];
    assert_eq!(gi.get("description"), Some(&Value::from("a")));
    assert_eq!(gi.get("mtu"), Some(&Value::Int(9000)));
    assert_eq!(gi.get("shutdown"), Some(&Value::Bool(true)));
}

#[test]
fn numbered_and_named_acls_share_storage() {
    let input = "access-list 20 permit 10.0.0.0 0.0.0.255\nip access-list standard 20\n deny host 192.168.1.1\n";
    let tree = parse_ios(input).expect("parse");
    assert_eq!(
        strings(tree.pointer(&path(&["ip-acl-std", "20"]))),
        vec!["permit 10.0.0.0 0.0.0.255", "deny 192.168.1.1"]
    );
}

#[test]
fn standard_acl_order_is_device_independent() {
    let one = parse_ios(
        "ip access-list standard MGMT\n permit 10.0.2.0 0.0.0.255\n permit host 10.0.1.1\n deny any\n",
    )
    .expect("one");
    let two = parse_ios(
        "ip access-list standard MGMT\n permit 10.0.1.1\n permit 10.0.2.0 0.0.0.255\n deny 0.0.0.0 255.255.255.255\n",
    )
    .expect("two");

    assert_eq!(one, two);
    assert_eq!(
        strings(one.pointer(&path(&["ip-acl-std", "MGMT"]))),
        vec!["permit 10.0.1.1", "permit 10.0.2.0 0.0.0.255", "deny any"]
    );
}

#[test]
fn malformed_standard_rule_reports_its_line() {
    let err = parse_ios("ip access-list standard X\n permit 10.0.0.0 0.255.0.255\n")
        .expect_err("split wildcard");
    assert_eq!(err.line_no, Some(2));
    assert_eq!(err.cause, CommandError::address("0.255.0.255"));
}

#[test]
fn reordering_can_be_disabled() {
    let dialect = IosDialect::new(IosOptions::default().with_reorder_standard_acls(false));
    let tree = dialect
        .parse("access-list 5 permit 10.0.2.1\naccess-list 5 permit host 10.0.1.1\n")
        .expect("parse");
    assert_eq!(
        strings(tree.pointer(&path(&["ip-acl-std", "5"]))),
        vec!["permit 10.0.2.1", "permit host 10.0.1.1"]
    );
}

#[test]
fn ipv6_acl_follows_trailing_clause_option() {
    let input = "ipv6 access-list V6\n sequence 10 permit icmp any any nd-ns\n permit tcp any host 2001:DB8::1 eq 22\n";

    let lossy = parse_ios(input).expect("lossy");
    assert_eq!(
        strings(lossy.pointer(&path(&["ipv6-acl", "V6"]))),
        vec!["permit icmp any any", "permit tcp any host 2001:db8::1 eq 22"]
    );

    let strict = IosDialect::new(IosOptions::default().with_ipv6_trailing(TrailingClausePolicy::Reject));
    let err = strict.parse(input).expect_err("strict");
    assert_eq!(err.line_no, Some(2));
}

#[test]
fn unsupported_blocks_are_skipped_whole() {
    let input = "router bgp 65000\n neighbor 10.0.0.2 remote-as 65001\n description not-an-interface\nline vty 0 4\n transport input ssh\nhostname core-1\n";
    let tree = parse_ios(input).expect("parse");
    assert_eq!(tree.sections().collect::<Vec<_>>(), vec![&Key::from("hostname")]);
}

#[test]
fn vlan_and_spanning_tree_sections_use_integer_keys() {
    let input = "vlan 10\n name users\nvlan 20,30-31\nspanning-tree vlan 10,20 priority 4096\nno spanning-tree vlan 30-31\n";
    let tree = parse_ios(input).expect("parse");

    assert_eq!(
        tree.pointer(&[Key::from("vlan"), Key::Int(10), Key::from("name")]),
        Some(&Value::from("users"))
    );
    assert_eq!(
        tree.pointer(&[Key::from("vlan"), Key::Int(31), Key::from("exists")]),
        Some(&Value::Bool(true))
    );
    assert_eq!(
        tree.pointer(&[Key::from("stp-priority"), Key::Int(20)]),
        Some(&Value::Int(4096))
    );
    assert_eq!(ints(tree.get("no-stp")), vec![30, 31]);
}

#[test]
fn options_load_from_json() {
    let options: IosOptions =
        serde_json::from_str(r#"{"ipv6-trailing": "reject"}"#).expect("options json");
    assert_eq!(options.ipv6_trailing, TrailingClausePolicy::Reject);
    assert!(options.reorder_standard_acls);
}

#[test]
fn reorder_failure_names_the_tree_entry() {
    let mut tree = ConfigTree::new();
    tree.root_mut()
        .list_entry(&path(&["ip-acl-std", "10"]))
        .expect("list")
        .push(Value::from("permit bogus"));

    let err = reorder_standard_acls(&mut tree).expect_err("bad stored rule");
    assert_eq!(err.line_no, None);
    assert_eq!(err.line, "ip-acl-std/10");
    assert_eq!(err.cause, CommandError::rule("permit bogus"));
    assert!(!err.to_string().contains("ip access-list"));
}

#[test]
fn oversized_vlan_range_is_rejected() {
    let err = parse_ios("interface Gi0/1\n switchport trunk allowed vlan 1-9000000000000\n")
        .expect_err("range too wide");
    assert_eq!(err.line_no, Some(2));
    assert!(matches!(err.cause, CommandError::Format(ref f) if f.token == "1-9000000000000"));
}
