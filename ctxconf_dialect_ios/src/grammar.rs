//! IOS command grammar table.
//!
//! Registration order matters: inside one context the first matching grammar
//! wins, so every pattern that extends another one's prefix (for example
//! `ip address ... secondary` over `ip address ...`) is registered first.

use std::sync::LazyLock;

use ctxconf_tree::{CommandError, GrammarTable, Key, Value};
use regex::Captures;
use tracing::debug;

use crate::IosDialect;
use crate::acl::{canonicalize_extended_rule, canonicalize_ipv6_rule, parse_standard_rule};
use crate::convert::{canonicalize_interface_name, expand_numeric_set, parse_int};

/// Nesting context a grammar is valid in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Root,
    Interface,
    Vlan,
    Vrf,
    IpAclStd,
    IpAclExt,
    Ipv6Acl,
}

type Outcome = Result<Option<Vec<Key>>, CommandError>;

static GRAMMARS: LazyLock<GrammarTable<IosDialect>> =
    LazyLock::new(|| build().expect("built-in IOS grammar patterns compile"));

/// The process-wide IOS grammar table.
pub fn grammar_table() -> &'static GrammarTable<IosDialect> {
    &GRAMMARS
}

fn build() -> Result<GrammarTable<IosDialect>, regex::Error> {
    use Context::*;

    let mut t = GrammarTable::new();

    // Top level.
    t.register("hostname", Root, r"^hostname\s+(?P<value>\S+)$", None, hostname)?;
    t.register("interface", Root, r"^int(?:erface)?\s+(?P<name>.+?)$", Some(Interface), interface)?;
    t.register("vlan-list", Root, r"^vlan\s+(?P<tags>\d+(?:\s*[,-]\s*\d+)+)$", None, vlan_list)?;
    t.register("vlan", Root, r"^vlan\s+(?P<tag>\d+)$", Some(Vlan), vlan)?;
    t.register("no-stp", Root, r"^no\s+spanning-tree\s+vlan\s+(?P<tags>[\d,-]+)$", None, no_stp)?;
    t.register(
        "stp-priority",
        Root,
        r"^spanning-tree\s+vlan\s+(?P<tags>[\d,-]+)\s+priority\s+(?P<priority>\d+)$",
        None,
        stp_priority,
    )?;
    t.register("stp-mode", Root, r"^spanning-tree\s+mode\s+(?P<value>\S+)$", None, stp_mode)?;
    t.register(
        "ip-route-vrf",
        Root,
        r"^ip\s+route\s+vrf\s+(?P<vrf>\S+)\s+(?P<value>.+)$",
        None,
        ip_route_vrf,
    )?;
    t.register("ip-route", Root, r"^ip\s+route\s+(?P<value>.+)$", None, ip_route)?;
    t.register("ipv6-route", Root, r"^ipv6\s+route\s+(?P<value>.+)$", None, ipv6_route)?;
    t.register(
        "ip-acl-std",
        Root,
        r"^ip\s+access-list\s+standard\s+(?P<name>\S+)$",
        Some(IpAclStd),
        ip_acl_std,
    )?;
    t.register(
        "ip-acl-ext",
        Root,
        r"^ip\s+access-list\s+extended\s+(?P<name>\S+)$",
        Some(IpAclExt),
        ip_acl_ext,
    )?;
    t.register(
        "ipv6-acl",
        Root,
        r"^ipv6\s+access-list\s+(?P<name>\S+)$",
        Some(Ipv6Acl),
        ipv6_acl,
    )?;
    t.register(
        "access-list",
        Root,
        r"^access-list\s+(?P<number>\d+)\s+(?P<rule>(?:permit|deny)\s.*)$",
        None,
        numbered_acl,
    )?;
    t.register(
        "ip-pfx",
        Root,
        r"^ip\s+prefix-list\s+(?P<list>\S+)\s+(?P<rule>.+)$",
        None,
        ip_pfx,
    )?;
    t.register(
        "ipv6-pfx",
        Root,
        r"^ipv6\s+prefix-list\s+(?P<list>\S+)\s+(?P<rule>.+)$",
        None,
        ipv6_pfx,
    )?;
    t.register("domain-name", Root, r"^ip\s+domain[-\s]name\s+(?P<value>\S+)$", None, domain_name)?;
    t.register("name-server", Root, r"^ip\s+name-server\s+(?P<value>.+)$", None, name_server)?;
    t.register(
        "default-gateway",
        Root,
        r"^ip\s+default-gateway\s+(?P<value>\S+)$",
        None,
        default_gateway,
    )?;
    t.register(
        "ntp-server",
        Root,
        r"^ntp\s+server\s+(?:vrf\s+\S+\s+)?(?P<value>\S+)",
        None,
        ntp_server,
    )?;
    t.register(
        "logging-host",
        Root,
        r"^logging\s+(?:host\s+)?(?P<value>\d+\.\d+\.\d+\.\d+)",
        None,
        logging_host,
    )?;
    t.register(
        "snmp-community",
        Root,
        r"^snmp-server\s+community\s+(?P<community>\S+)(?:\s+(?P<access>.+))?$",
        None,
        snmp_community,
    )?;
    t.register("ip-routing", Root, r"^(?P<no>no\s+)?ip\s+routing$", None, ip_routing)?;
    t.register(
        "ipv6-unicast-routing",
        Root,
        r"^(?P<no>no\s+)?ipv6\s+unicast-routing$",
        None,
        ipv6_unicast_routing,
    )?;
    t.register("vtp-mode", Root, r"^vtp\s+mode\s+(?P<value>\S+)$", None, vtp_mode)?;
    t.register("vtp-domain", Root, r"^vtp\s+domain\s+(?P<value>\S+)$", None, vtp_domain)?;
    t.register("service", Root, r"^(?P<no>no\s+)?service\s+(?P<service>.+)$", None, service)?;
    t.register(
        "vrf",
        Root,
        r"^(?:vrf\s+definition|ip\s+vrf)\s+(?P<name>\S+)$",
        Some(Vrf),
        vrf,
    )?;

    // vrf definition / ip vrf
    t.register("vrf-rd", Vrf, r"^rd\s+(?P<value>\S+)$", None, vrf_rd)?;
    t.register(
        "vrf-route-target",
        Vrf,
        r"^route-target\s+(?P<direction>import|export|both)\s+(?P<value>\S+)$",
        None,
        vrf_route_target,
    )?;
    t.register("vrf-description", Vrf, r"^description\s+(?P<value>.+)$", None, description)?;

    t.register("vlan-name", Vlan, r"^name\s+(?P<value>\S+)$", None, vlan_name)?;

    // Interface.
    t.register("if-description", Interface, r"^description\s+(?P<value>.+)$", None, description)?;
    t.register(
        "if-ip-addr-sec",
        Interface,
        r"^ip\s+address\s+(?P<value>\S+\s+\S+)\s+secondary",
        None,
        ip_addr_secondary,
    )?;
    t.register(
        "if-ip-addr-dynamic",
        Interface,
        r"^ip\s+address\s+(?P<value>dhcp|negotiated)\b",
        None,
        ip_addr,
    )?;
    t.register("if-ip-addr", Interface, r"^ip\s+address\s+(?P<value>\S+\s+\S+)", None, ip_addr)?;
    t.register("if-ipv6-addr", Interface, r"^ipv6\s+address\s+(?P<value>\S+)", None, ipv6_addr)?;
    t.register(
        "if-ip-helper",
        Interface,
        r"^ip\s+helper-address\s+(?P<value>\S+)$",
        None,
        ip_helper,
    )?;
    t.register(
        "if-vrf-forwarding",
        Interface,
        r"^(?:ip\s+)?vrf\s+forwarding\s+(?P<value>\S+)$",
        None,
        vrf_forwarding,
    )?;
    t.register("if-shutdown", Interface, r"^(?P<no>no\s+)?shutdown$", None, shutdown)?;
    t.register("if-cdp-enable", Interface, r"^(?P<no>no\s+)?cdp\s+enable$", None, cdp_enable)?;
    t.register("if-switchport", Interface, r"^(?P<no>no\s+)?switchport$", None, switchport)?;
    t.register(
        "if-swport-mode",
        Interface,
        r"^switchport\s+mode\s+(?P<value>\S+)$",
        None,
        swport_mode,
    )?;
    t.register(
        "if-swport-access-vlan",
        Interface,
        r"^switchport\s+access\s+vlan\s+(?P<value>\d+)$",
        None,
        swport_access_vlan,
    )?;
    t.register(
        "if-swport-voice-vlan",
        Interface,
        r"^switchport\s+voice\s+vlan\s+(?P<value>\d+)$",
        None,
        swport_voice_vlan,
    )?;
    t.register(
        "if-swport-trunk-native",
        Interface,
        r"^switchport\s+trunk\s+native\s+vlan\s+(?P<value>\d+)$",
        None,
        swport_trunk_native,
    )?;
    t.register(
        "if-swport-trunk-allow",
        Interface,
        r"^switchport\s+trunk\s+allowed\s+vlan\s+(?:add\s+)?(?P<tags>[\d,-]+)$",
        None,
        swport_trunk_allow,
    )?;
    t.register(
        "if-channel-group",
        Interface,
        r"^channel-group\s+(?P<group>\d+)\s+mode\s+(?P<mode>\S+)$",
        None,
        channel_group,
    )?;
    t.register(
        "if-ip-access-group",
        Interface,
        r"^ip\s+access-group\s+(?P<acl>\S+)\s+(?P<direction>in|out)$",
        None,
        ip_access_group,
    )?;
    t.register(
        "if-ipv6-traffic-filter",
        Interface,
        r"^ipv6\s+traffic-filter\s+(?P<acl>\S+)\s+(?P<direction>in|out)$",
        None,
        ipv6_traffic_filter,
    )?;
    t.register("if-mtu", Interface, r"^mtu\s+(?P<value>\d+)$", None, mtu)?;
    t.register("if-speed", Interface, r"^speed\s+(?P<value>\S+)$", None, speed)?;
    t.register("if-duplex", Interface, r"^duplex\s+(?P<value>\S+)$", None, duplex)?;
    t.register(
        "if-standby-ip",
        Interface,
        r"^standby\s+(?P<group>\d+)\s+ip\s+(?P<value>\S+)$",
        None,
        standby_ip,
    )?;
    t.register(
        "if-standby-priority",
        Interface,
        r"^standby\s+(?P<group>\d+)\s+priority\s+(?P<value>\d+)$",
        None,
        standby_priority,
    )?;
    t.register(
        "if-standby-preempt",
        Interface,
        r"^standby\s+(?P<group>\d+)\s+preempt\b",
        None,
        standby_preempt,
    )?;
    t.register("if-stp-portfast", Interface, r"^spanning-tree\s+portfast\b", None, stp_portfast)?;
    t.register(
        "if-stp-bpduguard",
        Interface,
        r"^spanning-tree\s+bpduguard\s+(?P<value>enable|disable)$",
        None,
        stp_bpduguard,
    )?;
    t.register("if-ip-proxy-arp", Interface, r"^(?P<no>no\s+)?ip\s+proxy-arp$", None, ip_proxy_arp)?;
    t.register("if-ip-redirects", Interface, r"^(?P<no>no\s+)?ip\s+redirects$", None, ip_redirects)?;
    t.register(
        "if-encapsulation-dot1q",
        Interface,
        r"^encapsulation\s+dot1q\s+(?P<value>\d+)",
        None,
        encapsulation_dot1q,
    )?;
    t.register(
        "if-service-policy",
        Interface,
        r"^service-policy\s+(?P<direction>input|output)\s+(?P<policy>\S+)$",
        None,
        service_policy,
    )?;

    // ACL bodies. Sequence numbers are not part of the rule.
    t.register(
        "std-rule",
        IpAclStd,
        r"^(?:\d+\s+)?(?P<rule>(?:permit|deny)\s.*)$",
        None,
        std_rule,
    )?;
    t.register(
        "ext-rule",
        IpAclExt,
        r"^(?:\d+\s+)?(?P<rule>(?:permit|deny)\s.*)$",
        None,
        ext_rule,
    )?;
    t.register(
        "ipv6-rule",
        Ipv6Acl,
        r"^(?:sequence\s+\d+\s+)?(?P<rule>(?:permit|deny)\s.*)$",
        None,
        ipv6_rule,
    )?;

    Ok(t)
}

fn capture<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn key(name: &str) -> Key {
    Key::from(name)
}

fn negated(caps: &Captures<'_>) -> bool {
    caps.name("no").is_some()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn tags(caps: &Captures<'_>) -> Result<Vec<i64>, CommandError> {
    let spec = capture(caps, "tags")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>();
    Ok(expand_numeric_set(&spec)?.into_iter().collect())
}

macro_rules! store_text {
    ($action:ident, $key:literal) => {
        fn $action(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
            node.assign(&[key($key)], Value::from(capture(caps, "value")))?;
            Ok(None)
        }
    };
}

macro_rules! store_int {
    ($action:ident, $key:literal) => {
        fn $action(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
            let value = parse_int(capture(caps, "value"))?;
            node.assign(&[key($key)], Value::Int(value))?;
            Ok(None)
        }
    };
}

macro_rules! store_flag {
    ($action:ident, $key:literal) => {
        fn $action(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
            node.assign(&[key($key)], Value::Bool(!negated(caps)))?;
            Ok(None)
        }
    };
}

macro_rules! add_text {
    ($action:ident, $key:literal) => {
        fn $action(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
            node.set_entry(&[key($key)])?
                .insert(Value::from(collapse_whitespace(capture(caps, "value"))));
            Ok(None)
        }
    };
}

store_text!(hostname, "hostname");
store_text!(stp_mode, "stp-mode");
store_text!(domain_name, "domain-name");
store_text!(default_gateway, "default-gateway");
store_text!(vtp_mode, "vtp-mode");
store_text!(vtp_domain, "vtp-domain");
store_text!(vrf_rd, "rd");
store_text!(vlan_name, "name");
store_text!(description, "description");
store_text!(ip_addr, "ip-addr");
store_text!(vrf_forwarding, "vrf-forwarding");
store_text!(swport_mode, "swport-mode");
store_text!(speed, "speed");
store_text!(duplex, "duplex");

store_int!(swport_access_vlan, "swport-access-vlan");
store_int!(swport_voice_vlan, "swport-voice-vlan");
store_int!(swport_trunk_native, "swport-trunk-native");
store_int!(mtu, "mtu");
store_int!(encapsulation_dot1q, "encapsulation-dot1q");

store_flag!(ip_routing, "ip-routing");
store_flag!(ipv6_unicast_routing, "ipv6-unicast-routing");
store_flag!(shutdown, "shutdown");
store_flag!(cdp_enable, "cdp-enable");
store_flag!(switchport, "switchport");
store_flag!(stp_portfast, "stp-portfast");
store_flag!(ip_proxy_arp, "ip-proxy-arp");
store_flag!(ip_redirects, "ip-redirects");

add_text!(ip_route, "ip-route");
add_text!(ipv6_route, "ipv6-route");
add_text!(ntp_server, "ntp-server");
add_text!(logging_host, "logging-host");
add_text!(ip_addr_secondary, "ip-addr-sec");
add_text!(ip_helper, "ip-helper-addr");

fn interface(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let raw = capture(caps, "name")
        .split_whitespace()
        .collect::<String>();
    let path = vec![key("interface"), Key::from(canonicalize_interface_name(&raw))];
    node.map_entry(&path)?;
    Ok(Some(path))
}

fn vlan_list(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    for tag in tags(caps)? {
        node.assign(&[key("vlan"), Key::Int(tag), key("exists")], Value::Bool(true))?;
    }
    Ok(None)
}

fn vlan(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let tag = parse_int(capture(caps, "tag"))?;
    let path = vec![key("vlan"), Key::Int(tag)];
    node.map_entry(&path)?
        .insert(key("exists"), Value::Bool(true));
    Ok(Some(path))
}

fn no_stp(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let disabled = node.set_entry(&[key("no-stp")])?;
    disabled.extend(tags(caps)?.into_iter().map(Value::Int));
    Ok(None)
}

fn stp_priority(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let priority = parse_int(capture(caps, "priority"))?;
    let priorities = node.map_entry(&[key("stp-priority")])?;
    for tag in tags(caps)? {
        priorities.insert(Key::Int(tag), Value::Int(priority));
    }
    Ok(None)
}

fn ip_route_vrf(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let vrf = Key::from(capture(caps, "vrf"));
    node.set_entry(&[key("ip-route-vrf"), vrf])?
        .insert(Value::from(collapse_whitespace(capture(caps, "value"))));
    Ok(None)
}

fn open_list(node: &mut Value, section: &str, caps: &Captures<'_>) -> Outcome {
    let path = vec![key(section), Key::from(capture(caps, "name"))];
    node.list_entry(&path)?;
    Ok(Some(path))
}

fn ip_acl_std(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    open_list(node, "ip-acl-std", caps)
}

fn ip_acl_ext(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    open_list(node, "ip-acl-ext", caps)
}

fn ipv6_acl(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    open_list(node, "ipv6-acl", caps)
}

/// Standard rules are checked here so a bad rule is reported with its line,
/// but stored raw: ordering happens once the whole list is known.
fn push_standard(rules: &mut Vec<Value>, rule: &str) -> Result<(), CommandError> {
    parse_standard_rule(rule)?;
    rules.push(Value::from(collapse_whitespace(rule)));
    Ok(())
}

fn push_extended(rules: &mut Vec<Value>, rule: &str) -> Result<(), CommandError> {
    rules.push(Value::from(canonicalize_extended_rule(rule)?));
    Ok(())
}

fn numbered_acl(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let number = capture(caps, "number");
    let rule = capture(caps, "rule");
    match parse_int(number)? {
        1..=99 | 1300..=1999 => push_standard(node.list_entry(&[key("ip-acl-std"), key(number)])?, rule)?,
        100..=199 | 2000..=2699 => push_extended(node.list_entry(&[key("ip-acl-ext"), key(number)])?, rule)?,
        other => debug!(number = other, "access-list number is neither standard nor extended"),
    }
    Ok(None)
}

fn std_rule(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    push_standard(node.list_entry(&[])?, capture(caps, "rule"))?;
    Ok(None)
}

fn ext_rule(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    push_extended(node.list_entry(&[])?, capture(caps, "rule"))?;
    Ok(None)
}

fn ipv6_rule(dialect: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let rule = canonicalize_ipv6_rule(capture(caps, "rule"), dialect.options().ipv6_trailing)?;
    node.list_entry(&[])?.push(Value::from(rule));
    Ok(None)
}

fn prefix_rule(node: &mut Value, section: &str, caps: &Captures<'_>) -> Outcome {
    node.list_entry(&[key(section), Key::from(capture(caps, "list"))])?
        .push(Value::from(collapse_whitespace(capture(caps, "rule"))));
    Ok(None)
}

fn ip_pfx(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    prefix_rule(node, "ip-pfx", caps)
}

fn ipv6_pfx(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    prefix_rule(node, "ipv6-pfx", caps)
}

fn name_server(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let servers = node.set_entry(&[key("name-server")])?;
    servers.extend(capture(caps, "value").split_whitespace().map(Value::from));
    Ok(None)
}

fn snmp_community(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let community = Key::from(capture(caps, "community"));
    let access = collapse_whitespace(capture(caps, "access"));
    node.assign(&[key("snmp-community"), community], Value::from(access))?;
    Ok(None)
}

fn service(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let name = Key::from(collapse_whitespace(capture(caps, "service")));
    node.assign(&[key("service"), name], Value::Bool(!negated(caps)))?;
    Ok(None)
}

fn vrf(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let path = vec![key("vrf"), Key::from(capture(caps, "name"))];
    node.map_entry(&path)?;
    Ok(Some(path))
}

fn vrf_route_target(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let value = Value::from(capture(caps, "value"));
    let sections: &[&str] = match capture(caps, "direction") {
        "import" => &["route-target-import"],
        "export" => &["route-target-export"],
        _ => &["route-target-import", "route-target-export"],
    };
    for section in sections {
        node.set_entry(&[key(section)])?.insert(value.clone());
    }
    Ok(None)
}

fn ipv6_addr(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    node.set_entry(&[key("ipv6-addr")])?
        .insert(Value::from(capture(caps, "value").to_lowercase()));
    Ok(None)
}

fn swport_trunk_allow(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let allowed = node.set_entry(&[key("swport-trunk-allow")])?;
    allowed.extend(tags(caps)?.into_iter().map(Value::Int));
    Ok(None)
}

fn channel_group(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let group = parse_int(capture(caps, "group"))?;
    node.assign(&[key("channel-group")], Value::Int(group))?;
    node.assign(&[key("channel-group-mode")], Value::from(capture(caps, "mode")))?;
    Ok(None)
}

fn directional(node: &mut Value, section: &str, caps: &Captures<'_>, target: &str) -> Outcome {
    let direction = Key::from(capture(caps, "direction"));
    node.assign(&[key(section), direction], Value::from(capture(caps, target)))?;
    Ok(None)
}

fn ip_access_group(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    directional(node, "ip-access-group", caps, "acl")
}

fn ipv6_traffic_filter(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    directional(node, "ipv6-traffic-filter", caps, "acl")
}

fn service_policy(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    directional(node, "service-policy", caps, "policy")
}

fn standby_path(caps: &Captures<'_>, field: &str) -> Result<Vec<Key>, CommandError> {
    let group = parse_int(capture(caps, "group"))?;
    Ok(vec![key("standby"), Key::Int(group), key(field)])
}

fn standby_ip(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    node.assign(&standby_path(caps, "ip")?, Value::from(capture(caps, "value")))?;
    Ok(None)
}

fn standby_priority(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let priority = parse_int(capture(caps, "value"))?;
    node.assign(&standby_path(caps, "priority")?, Value::Int(priority))?;
    Ok(None)
}

fn standby_preempt(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    node.assign(&standby_path(caps, "preempt")?, Value::Bool(true))?;
    Ok(None)
}

fn stp_bpduguard(_: &IosDialect, caps: &Captures<'_>, node: &mut Value) -> Outcome {
    let enabled = capture(caps, "value") == "enable";
    node.assign(&[key("stp-bpduguard")], Value::Bool(enabled))?;
    Ok(None)
}
