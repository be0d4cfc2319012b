//! Hierarchical config tree and context-stack parser for indented network
//! device configuration text.
//!
//! This crate provides:
//! - a dictionary-shaped tree model (`ConfigTree`, `Value`, `Key`)
//! - a dialect-neutral engine (`Dialect`, `GrammarTable`, `parse_lines`)
//! - the error taxonomy shared by dialects (`FormatError`, `CommandError`, `ParseError`)
//!
//! The engine knows nothing about vendors:
//! - indentation decides which context is active
//! - each line runs the first grammar registered for that context that matches
//! - lines no grammar recognizes are skipped, together with their indented children
//!
//! # Example
//!
//! ```rust
//! use ctxconf_tree::{Dialect, GrammarTable, Key, Value, parse_text};
//! use std::sync::LazyLock;
//!
//! struct Hostnames;
//!
//! static GRAMMARS: LazyLock<GrammarTable<Hostnames>> = LazyLock::new(|| {
//!     let mut table = GrammarTable::new();
//!     table
//!         .register("hostname", (), r"^hostname (?P<name>\S+)$", None, |_, caps, node| {
//!             node.assign(&[Key::from("hostname")], Value::from(&caps["name"]))?;
//!             Ok(None)
//!         })
//!         .expect("valid pattern");
//!     table
//! });
//!
//! impl Dialect for Hostnames {
//!     type Context = ();
//!     fn root_context(&self) {}
//!     fn grammars(&self) -> &GrammarTable<Self> {
//!         &GRAMMARS
//!     }
//! }
//!
//! let tree = parse_text(&Hostnames, "hostname edge-1\n").expect("parse");
//! assert_eq!(tree.get("hostname"), Some(&Value::from("edge-1")));
//! ```

mod engine;
mod error;
mod value;

pub use engine::{
    Action, ContextFrame, Dialect, Dispatch, Grammar, GrammarTable, ParserState, dispatch,
    parse_lines, parse_text,
};
pub use error::{CommandError, FormatError, FormatReason, ParseError, ShapeError};
pub use value::{ConfigTree, Key, Value};
