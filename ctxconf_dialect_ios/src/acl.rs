//! Per-protocol ACL rule parsers.
//!
//! Each parser decomposes one `permit`/`deny` line into a structured rule and
//! renders it back in canonical form, so equivalent spellings (service names
//! vs. port numbers, `host X` vs. `X 0.0.0.0`, IPv6 hex case) compare equal.

use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;
use std::sync::LazyLock;

use ctxconf_tree::CommandError;
use ipnet::{Ipv4Net, Ipv6Net};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::convert::{ipv4_network_to_ios_text, service_name_to_port};

const V4: &str = r"\d{1,3}(?:\.\d{1,3}){3}";
const V6: &str = r"[0-9A-Fa-f:.]*:[0-9A-Fa-f:.]*";
const SERVICE: &str = r"[\w-]+";

static STANDARD_RULE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(
        r"^(?P<action>permit|deny)\s+(?:(?P<any>any)|(?:host\s+)?(?P<host>{V4})|(?P<addr>{V4})\s+(?P<mask>{V4}))\s*$"
    );
    Regex::new(&pattern).expect("standard rule pattern")
});

static EXTENDED_RULE: LazyLock<Regex> = LazyLock::new(|| {
    let address = format!(r"any|host\s+{V4}|{V4}\s+{V4}");
    let port = format!(
        r"(?:eq|neq)(?:\s+{SERVICE})+?|(?:lt|gt)\s+{SERVICE}|range\s+{SERVICE}\s+{SERVICE}"
    );
    let pattern = format!(
        concat!(
            r"^(?P<action>permit|deny)\s+(?P<protocol>ip|icmp|tcp|udp|igmp|pim|gre|esp)",
            r"\s+(?P<src>{address})(?:\s+(?P<src_port>{port}))?",
            r"\s+(?P<dst>{address})(?:\s+(?P<dst_port>{port}|echo-reply|echo))?",
            r"(?P<established>\s+established)?(?:\s+dscp\s+(?P<dscp>\S+))?",
            r"(?:\s+(?P<log>log-input|log))?\s*$"
        ),
        address = address,
        port = port,
    );
    Regex::new(&pattern).expect("extended rule pattern")
});

// Not anchored after the last clause: `rest` collects whatever trails the
// recognized clauses and must start at a token boundary.
static IPV6_RULE: LazyLock<Regex> = LazyLock::new(|| {
    let address = format!(r"any|host\s+{V6}|{V6}/\d{{1,3}}");
    let port = format!(r"(?:eq|neq|lt|gt)\s+{SERVICE}|range\s+{SERVICE}\s+{SERVICE}");
    let pattern = format!(
        concat!(
            r"^(?P<action>permit|deny)(?:\s+(?P<protocol>ipv6|icmp|tcp|udp|sctp|esp|ahp|gre|pim|\d+))?",
            r"\s+(?P<src>{address})(?:\s+(?P<src_port>{port}))?",
            r"\s+(?P<dst>{address})(?:\s+(?P<dst_port>{port}|echo-reply|echo))?",
            r"(?P<established>\s+established)?(?:\s+(?P<log>log-input|log))?",
            r"(?P<rest>(?:\s.*)?)$"
        ),
        address = address,
        port = port,
    );
    Regex::new(&pattern).expect("ipv6 rule pattern")
});

/// Rule verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verdict {
    Permit,
    Deny,
}

impl Verdict {
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Permit => "permit",
            Verdict::Deny => "deny",
        }
    }
}

impl FromStr for Verdict {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "permit" => Ok(Verdict::Permit),
            "deny" => Ok(Verdict::Deny),
            other => Err(CommandError::rule(other)),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What to do with IPv6 rule text the grammar does not cover (for example
/// ICMPv6 message types other than `echo`/`echo-reply`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrailingClausePolicy {
    /// Drop the unrecognized tail from the canonical form and log a warning.
    #[default]
    Drop,
    /// Fail the rule.
    Reject,
}

/// One parsed standard ACL entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StandardRule {
    pub verdict: Verdict,
    pub network: Ipv4Net,
}

impl StandardRule {
    /// Inclusive integer address range matched by this rule.
    pub fn range(&self) -> (u32, u32) {
        (
            u32::from(self.network.network()),
            u32::from(self.network.broadcast()),
        )
    }

    pub fn overlaps(&self, other: &StandardRule) -> bool {
        let (a_first, a_last) = self.range();
        let (b_first, b_last) = other.range();
        a_first <= b_last && b_first <= a_last
    }
}

impl fmt::Display for StandardRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.verdict,
            ipv4_network_to_ios_text(&self.network)
        )
    }
}

/// Parse `permit|deny any | [host] A | A WILDCARD`.
///
/// `0.0.0.0 255.255.255.255` is the same network as `any`.
pub fn parse_standard_rule(line: &str) -> Result<StandardRule, CommandError> {
    let line = line.trim();
    let caps = STANDARD_RULE
        .captures(line)
        .ok_or_else(|| CommandError::rule(line))?;
    let verdict = caps["action"].parse()?;

    let (addr, prefix) = if caps.name("any").is_some() {
        (Ipv4Addr::UNSPECIFIED, 0)
    } else if let Some(host) = caps.name("host") {
        (parse_v4(host.as_str())?, 32)
    } else {
        let mask = capture(&caps, "mask");
        let prefix = hostmask_prefix(parse_v4(mask)?).ok_or_else(|| CommandError::address(mask))?;
        (parse_v4(capture(&caps, "addr"))?, prefix)
    };
    let network = Ipv4Net::new(addr, prefix)
        .map_err(|_| CommandError::rule(line))?
        .trunc();

    Ok(StandardRule { verdict, network })
}

/// Canonical text of one extended IPv4 ACL rule.
pub fn canonicalize_extended_rule(line: &str) -> Result<String, CommandError> {
    let line = line.trim();
    let caps = EXTENDED_RULE
        .captures(line)
        .ok_or_else(|| CommandError::rule(line))?;

    let rule = ParsedRule {
        verdict: caps["action"].parse()?,
        protocol: capture(&caps, "protocol").to_string(),
        src: parse_v4_match(capture(&caps, "src"))?,
        src_port: caps
            .name("src_port")
            .map(|m| parse_port_match(m.as_str()))
            .transpose()?,
        dst: parse_v4_match(capture(&caps, "dst"))?,
        dst_port: caps
            .name("dst_port")
            .map(|m| parse_port_match(m.as_str()))
            .transpose()?,
        established: caps.name("established").is_some(),
        dscp: caps.name("dscp").map(|m| m.as_str().to_string()),
        log: caps.name("log").map(|m| m.as_str().to_string()),
    };
    Ok(rule.to_string())
}

/// Canonical text of one IPv6 ACL rule. A missing protocol means `ipv6`.
pub fn canonicalize_ipv6_rule(
    line: &str,
    trailing: TrailingClausePolicy,
) -> Result<String, CommandError> {
    let line = line.trim();
    let caps = IPV6_RULE
        .captures(line)
        .ok_or_else(|| CommandError::rule(line))?;

    let rest = capture(&caps, "rest").trim();
    if !rest.is_empty() {
        match trailing {
            TrailingClausePolicy::Reject => return Err(CommandError::rule(line)),
            TrailingClausePolicy::Drop => {
                warn!(rule = line, dropped = rest, "ipv6 rule clause not canonicalized");
            }
        }
    }

    let rule = ParsedRule {
        verdict: caps["action"].parse()?,
        protocol: caps
            .name("protocol")
            .map_or("ipv6", |m| m.as_str())
            .to_string(),
        src: parse_v6_match(capture(&caps, "src"))?,
        src_port: caps
            .name("src_port")
            .map(|m| parse_port_match(m.as_str()))
            .transpose()?,
        dst: parse_v6_match(capture(&caps, "dst"))?,
        dst_port: caps
            .name("dst_port")
            .map(|m| parse_port_match(m.as_str()))
            .transpose()?,
        established: caps.name("established").is_some(),
        dscp: None,
        log: caps.name("log").map(|m| m.as_str().to_string()),
    };
    Ok(rule.to_string())
}

/// Address side of an extended or IPv6 rule.
#[derive(Debug, Clone, PartialEq, Eq)]
enum AddressMatch {
    Any,
    Host(String),
    Masked(String),
}

impl fmt::Display for AddressMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddressMatch::Any => f.write_str("any"),
            AddressMatch::Host(addr) => write!(f, "host {addr}"),
            AddressMatch::Masked(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PortMatch {
    Eq(Vec<u16>),
    Neq(Vec<u16>),
    Lt(u16),
    Gt(u16),
    Range(u16, u16),
    IcmpType(String),
}

impl fmt::Display for PortMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let join = |ports: &[u16]| {
            ports
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        };
        match self {
            PortMatch::Eq(ports) => write!(f, "eq {}", join(ports)),
            PortMatch::Neq(ports) => write!(f, "neq {}", join(ports)),
            PortMatch::Lt(port) => write!(f, "lt {port}"),
            PortMatch::Gt(port) => write!(f, "gt {port}"),
            PortMatch::Range(low, high) => write!(f, "range {low} {high}"),
            PortMatch::IcmpType(kind) => f.write_str(kind),
        }
    }
}

/// Structured form of an extended or IPv6 rule; lives only long enough to be
/// rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ParsedRule {
    verdict: Verdict,
    protocol: String,
    src: AddressMatch,
    src_port: Option<PortMatch>,
    dst: AddressMatch,
    dst_port: Option<PortMatch>,
    established: bool,
    dscp: Option<String>,
    log: Option<String>,
}

impl fmt::Display for ParsedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.verdict, self.protocol, self.src)?;
        if let Some(port) = &self.src_port {
            write!(f, " {port}")?;
        }
        write!(f, " {}", self.dst)?;
        if let Some(port) = &self.dst_port {
            write!(f, " {port}")?;
        }
        if self.established {
            f.write_str(" established")?;
        }
        if let Some(dscp) = &self.dscp {
            write!(f, " dscp {dscp}")?;
        }
        if let Some(log) = &self.log {
            write!(f, " {log}")?;
        }
        Ok(())
    }
}

fn capture<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map_or("", |m| m.as_str())
}

fn parse_v4(token: &str) -> Result<Ipv4Addr, CommandError> {
    token
        .parse::<Ipv4Addr>()
        .map_err(|_| CommandError::address(token))
}

/// Prefix length for a contiguous wildcard mask (`0.0.0.255` -> 24).
fn hostmask_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits & bits.wrapping_add(1) != 0 {
        return None;
    }
    u8::try_from(bits.leading_zeros()).ok()
}

fn parse_v4_match(text: &str) -> Result<AddressMatch, CommandError> {
    let tokens = text.split_whitespace().collect::<Vec<_>>();
    match tokens.as_slice() {
        ["any"] => Ok(AddressMatch::Any),
        ["host", addr] => Ok(AddressMatch::Host(parse_v4(addr)?.to_string())),
        [addr, mask] => {
            let wildcard = u32::from(parse_v4(mask)?);
            let addr = u32::from(parse_v4(addr)?) & !wildcard;
            Ok(match wildcard {
                0 => AddressMatch::Host(Ipv4Addr::from(addr).to_string()),
                u32::MAX => AddressMatch::Any,
                _ => AddressMatch::Masked(format!(
                    "{} {}",
                    Ipv4Addr::from(addr),
                    Ipv4Addr::from(wildcard)
                )),
            })
        }
        _ => Err(CommandError::address(text)),
    }
}

fn parse_v6_match(text: &str) -> Result<AddressMatch, CommandError> {
    let tokens = text.split_whitespace().collect::<Vec<_>>();
    match tokens.as_slice() {
        ["any"] => Ok(AddressMatch::Any),
        ["host", addr] => {
            let addr = addr
                .parse::<Ipv6Addr>()
                .map_err(|_| CommandError::address(*addr))?;
            Ok(AddressMatch::Host(addr.to_string()))
        }
        [prefix] => {
            let net = prefix
                .parse::<Ipv6Net>()
                .map_err(|_| CommandError::address(*prefix))?;
            Ok(match net.prefix_len() {
                0 if net.addr() == Ipv6Addr::UNSPECIFIED => AddressMatch::Any,
                128 => AddressMatch::Host(net.addr().to_string()),
                _ => AddressMatch::Masked(net.to_string()),
            })
        }
        _ => Err(CommandError::address(text)),
    }
}

fn parse_port_match(text: &str) -> Result<PortMatch, CommandError> {
    let mut tokens = text.split_whitespace();
    let op = tokens.next().unwrap_or_default();
    let services = tokens
        .map(service_name_to_port)
        .collect::<Result<Vec<_>, _>>();
    Ok(match (op, services?.as_slice()) {
        ("eq", ports) if !ports.is_empty() => PortMatch::Eq(ports.to_vec()),
        ("neq", ports) if !ports.is_empty() => PortMatch::Neq(ports.to_vec()),
        ("lt", [port]) => PortMatch::Lt(*port),
        ("gt", [port]) => PortMatch::Gt(*port),
        ("range", [low, high]) => PortMatch::Range(*low, *high),
        (kind @ ("echo" | "echo-reply"), []) => PortMatch::IcmpType(kind.to_string()),
        _ => return Err(CommandError::rule(text)),
    })
}
