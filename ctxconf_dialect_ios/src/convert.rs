//! Token-level conversions shared by the grammar table and rule parsers.

use std::collections::{BTreeSet, HashMap};
use std::net::Ipv4Addr;
use std::sync::LazyLock;

use ctxconf_tree::FormatError;
use ipnet::Ipv4Net;
use regex::Regex;

/// Well-known service names IOS prints in place of port numbers.
pub const SERVICE_PORTS: &[(&str, u16)] = &[
    ("bootps", 67),
    ("bootpc", 68),
    ("discard", 9),
    ("domain", 53),
    ("ftp", 21),
    ("ftp-data", 20),
    ("gopher", 70),
    ("ident", 113),
    ("isakmp", 500),
    ("lpd", 515),
    ("mail", 25),
    ("non500-isakmp", 4500),
    ("ntp", 123),
    ("smtp", 25),
    ("snmp", 161),
    ("tftp", 69),
    ("www", 80),
];

/// Lower-case interface type prefixes and their short form.
pub const INTERFACE_ABBREVIATIONS: &[(&str, &str)] = &[
    ("ethernet", "Eth"),
    ("fastethernet", "Fa"),
    ("gigabitethernet", "Gi"),
    ("tengigabitethernet", "Te"),
    ("fortygigabitethernet", "Fo"),
    ("port-channel", "Po"),
    ("vl", "Vlan"),
];

static SERVICE_MAP: LazyLock<HashMap<&'static str, u16>> =
    LazyLock::new(|| SERVICE_PORTS.iter().copied().collect());

static ABBREVIATION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| INTERFACE_ABBREVIATIONS.iter().copied().collect());

static INTERFACE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([-a-z]+)([0-9/.]*)$").expect("interface name pattern"));

/// Widest range [`expand_numeric_set`] accepts, enough for every 802.1Q tag.
pub const MAX_RANGE_SPAN: i64 = 4096;

/// Expand `"1,3-5"` into `{1, 3, 4, 5}`. Ranges are inclusive and may cover
/// at most [`MAX_RANGE_SPAN`] values.
pub fn expand_numeric_set(spec: &str) -> Result<BTreeSet<i64>, FormatError> {
    let mut out = BTreeSet::new();
    for token in spec.split(',').map(str::trim) {
        let bounds = token.split('-').collect::<Vec<_>>();
        match bounds.as_slice() {
            [single] => {
                out.insert(parse_int(single)?);
            }
            [low, high] => {
                let (low, high) = (parse_int(low)?, parse_int(high)?);
                if high.saturating_sub(low) >= MAX_RANGE_SPAN {
                    return Err(FormatError::range_too_wide(token, MAX_RANGE_SPAN));
                }
                out.extend(low..=high);
            }
            // More than one hyphen: let the integer parser name the problem.
            _ => {
                out.insert(parse_int(token)?);
            }
        }
    }
    Ok(out)
}

/// Render a network the way IOS ACLs spell it: `any`, a bare host, or
/// `address wildcard`.
pub fn ipv4_network_to_ios_text(net: &Ipv4Net) -> String {
    if net.prefix_len() == 0 && net.addr() == Ipv4Addr::UNSPECIFIED {
        "any".to_string()
    } else if net.prefix_len() == 32 {
        net.addr().to_string()
    } else {
        format!("{} {}", net.network(), net.hostmask())
    }
}

/// Resolve a service name or decimal port.
pub fn service_name_to_port(token: &str) -> Result<u16, FormatError> {
    match SERVICE_MAP.get(token) {
        Some(port) => Ok(*port),
        None => token
            .parse::<u16>()
            .map_err(|source| FormatError::new(token, source)),
    }
}

/// Canonical short interface name: `GigabitEthernet1/0/1` and `gi1/0/1`
/// both become `Gi1/0/1`.
///
/// Names that do not look like `<type><number>` are returned unchanged.
pub fn canonicalize_interface_name(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let Some(caps) = INTERFACE_NAME.captures(&lower) else {
        return raw.to_string();
    };
    let kind = caps.get(1).map_or("", |m| m.as_str());
    let number = caps.get(2).map_or("", |m| m.as_str());
    match ABBREVIATION_MAP.get(kind) {
        Some(short) => format!("{short}{number}"),
        None => format!("{}{number}", capitalize(kind)),
    }
}

pub(crate) fn parse_int(token: &str) -> Result<i64, FormatError> {
    token
        .trim()
        .parse::<i64>()
        .map_err(|source| FormatError::new(token, source))
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use ctxconf_tree::FormatReason;

    use super::*;

    fn net(text: &str) -> Ipv4Net {
        text.parse().expect("valid network")
    }

    #[test]
    fn numeric_sets_expand_ranges_inclusively() {
        let set = expand_numeric_set("1,3-5").expect("valid set");
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
        assert_eq!(expand_numeric_set("7").expect("single").len(), 1);
    }

    #[test]
    fn numeric_set_errors_name_the_token() {
        let err = expand_numeric_set("1,x-3").expect_err("x is not a number");
        assert_eq!(err.token, "x");

        let err = expand_numeric_set("1-2-3").expect_err("two hyphens");
        assert_eq!(err.token, "1-2-3");
    }

    #[test]
    fn numeric_set_ranges_are_bounded() {
        assert_eq!(expand_numeric_set("1-4094").expect("all tags").len(), 4094);
        assert_eq!(expand_numeric_set("0-4095").expect("full span").len(), 4096);

        let err = expand_numeric_set("5,1-9000000000000").expect_err("too wide");
        assert_eq!(err.token, "1-9000000000000");
        assert_eq!(
            err.reason,
            FormatReason::RangeTooWide {
                limit: MAX_RANGE_SPAN
            }
        );
    }

    #[test]
    fn ios_network_text_uses_wildcard_masks() {
        assert_eq!(ipv4_network_to_ios_text(&net("0.0.0.0/0")), "any");
        assert_eq!(ipv4_network_to_ios_text(&net("10.1.1.5/32")), "10.1.1.5");
        assert_eq!(
            ipv4_network_to_ios_text(&net("10.1.1.0/24")),
            "10.1.1.0 0.0.0.255"
        );
    }

    #[test]
    fn service_names_resolve_through_the_table() {
        for (name, port) in SERVICE_PORTS {
            assert_eq!(service_name_to_port(name), Ok(*port));
        }
        assert_eq!(service_name_to_port("8080"), Ok(8080));

        let err = service_name_to_port("telnetish").expect_err("unknown service");
        assert_eq!(err.token, "telnetish");
    }

    #[test]
    fn interface_names_are_abbreviated() {
        assert_eq!(canonicalize_interface_name("Gi1/0/1"), "Gi1/0/1");
        assert_eq!(canonicalize_interface_name("gigabitethernet1/0/1"), "Gi1/0/1");
        assert_eq!(canonicalize_interface_name("GigabitEthernet1/0/1"), "Gi1/0/1");
        assert_eq!(canonicalize_interface_name("Fa0/1"), "Fa0/1");
        assert_eq!(canonicalize_interface_name("Port-channel10"), "Po10");
        assert_eq!(canonicalize_interface_name("Vl20"), "Vlan20");
        assert_eq!(canonicalize_interface_name("Loopback0"), "Loopback0");
    }

    #[test]
    fn unmatched_interface_names_pass_through() {
        assert_eq!(canonicalize_interface_name("Dialer1:2"), "Dialer1:2");
    }
}
