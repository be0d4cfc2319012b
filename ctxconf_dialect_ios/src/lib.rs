//! Cisco IOS dialect for `ctxconf_tree`.
//!
//! This crate provides:
//! - the IOS command grammar table (interfaces, VLANs, routes, ACLs, prefix lists)
//! - canonical per-line forms for extended IPv4 and IPv6 ACL rules
//! - canonical block ordering for standard IPv4 ACLs, applied after parsing
//!
//! Two configs that differ only in how the device chose to spell or order
//! equivalent rules parse to equal trees.
//!
//! # Example
//!
//! ```rust
//! use ctxconf_dialect_ios::parse_ios;
//! use ctxconf_tree::{Key, Value};
//!
//! let cfg = "interface GigabitEthernet0/1\n ip address 10.0.0.1 255.255.255.0\n";
//! let tree = parse_ios(cfg).expect("valid config");
//! let addr = tree.pointer(&[Key::from("interface"), Key::from("Gi0/1"), Key::from("ip-addr")]);
//! assert_eq!(addr, Some(&Value::from("10.0.0.1 255.255.255.0")));
//! ```

mod acl;
mod canonical;
mod convert;
mod grammar;

#[cfg(test)]
mod tests;

use ctxconf_tree::{
    CommandError, ConfigTree, Dialect, GrammarTable, Key, ParseError, ShapeError, Value,
    parse_lines, parse_text,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use acl::{
    StandardRule, TrailingClausePolicy, Verdict, canonicalize_extended_rule,
    canonicalize_ipv6_rule, parse_standard_rule,
};
pub use canonical::{canonicalize_standard_acl, order_standard_rules};
pub use convert::{
    INTERFACE_ABBREVIATIONS, MAX_RANGE_SPAN, SERVICE_PORTS, canonicalize_interface_name,
    expand_numeric_set, ipv4_network_to_ios_text, service_name_to_port,
};
pub use grammar::{Context, grammar_table};

/// Options controlling IOS parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct IosOptions {
    /// Handling of IPv6 ACL text beyond the recognized clauses.
    pub ipv6_trailing: TrailingClausePolicy,
    /// Put standard ACLs into canonical block order after parsing.
    pub reorder_standard_acls: bool,
}

impl Default for IosOptions {
    fn default() -> Self {
        Self {
            ipv6_trailing: TrailingClausePolicy::Drop,
            reorder_standard_acls: true,
        }
    }
}

impl IosOptions {
    /// Override the IPv6 trailing-clause policy.
    pub fn with_ipv6_trailing(mut self, policy: TrailingClausePolicy) -> Self {
        self.ipv6_trailing = policy;
        self
    }

    /// Enable or disable standard ACL reordering.
    pub fn with_reorder_standard_acls(mut self, enabled: bool) -> Self {
        self.reorder_standard_acls = enabled;
        self
    }
}

/// Dialect implementation for Cisco IOS-style configuration text.
#[derive(Debug, Clone, Default)]
pub struct IosDialect {
    options: IosOptions,
}

impl IosDialect {
    pub fn new(options: IosOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &IosOptions {
        &self.options
    }

    /// Parse configuration text with these options.
    pub fn parse(&self, input: &str) -> Result<ConfigTree, ParseError> {
        parse_text(self, input)
    }

    /// Parse pre-split configuration lines with these options.
    pub fn parse_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<ConfigTree, ParseError> {
        parse_lines(self, lines)
    }
}

/// Parse text using [`IosDialect`] with default options.
pub fn parse_ios(input: &str) -> Result<ConfigTree, ParseError> {
    IosDialect::default().parse(input)
}

/// Parse lines using [`IosDialect`] with default options.
pub fn parse_ios_lines<S: AsRef<str>>(lines: &[S]) -> Result<ConfigTree, ParseError> {
    IosDialect::default().parse_lines(lines)
}

impl Dialect for IosDialect {
    type Context = Context;

    fn root_context(&self) -> Context {
        Context::Root
    }

    fn grammars(&self) -> &GrammarTable<Self> {
        grammar_table()
    }

    fn post_parse(&self, tree: &mut ConfigTree) -> Result<(), ParseError> {
        if self.options.reorder_standard_acls {
            reorder_standard_acls(tree)?;
        }
        Ok(())
    }
}

/// Replace every `ip-acl-std` list with its canonical ordering.
fn reorder_standard_acls(tree: &mut ConfigTree) -> Result<(), ParseError> {
    let Some(acls) = tree
        .root_mut()
        .pointer_mut(&[Key::from("ip-acl-std")])
        .and_then(Value::as_map_mut)
    else {
        return Ok(());
    };

    for (name, rules) in acls.iter_mut() {
        // Numbered and named lists share this section, so name the tree entry
        // rather than a config header the input may not contain.
        let entry = format!("ip-acl-std/{name}");
        let detached = |cause: CommandError| ParseError::detached(entry.as_str(), cause);

        let raw = rules
            .as_list()
            .ok_or_else(|| detached(ShapeError::new("list", rules.kind()).into()))?
            .iter()
            .map(|rule| {
                rule.as_str()
                    .ok_or_else(|| detached(ShapeError::new("string", rule.kind()).into()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let canonical = canonical::canonicalize_standard_acl(&raw).map_err(detached)?;
        debug!(acl = %name, rules = canonical.len(), "standard acl reordered");
        *rules = Value::List(canonical.into_iter().map(Value::from).collect());
    }
    Ok(())
}
