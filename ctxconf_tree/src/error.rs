use std::num::ParseIntError;

use thiserror::Error;

/// A primitive token (integer, service name, numeric range) could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{token}`: {reason}")]
pub struct FormatError {
    pub token: String,
    #[source]
    pub reason: FormatReason,
}

/// Why a [`FormatError`] token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatReason {
    #[error(transparent)]
    Int(#[from] ParseIntError),
    #[error("range covers more than {limit} values")]
    RangeTooWide { limit: i64 },
}

impl FormatError {
    pub fn new(token: impl Into<String>, source: ParseIntError) -> Self {
        Self {
            token: token.into(),
            reason: source.into(),
        }
    }

    pub fn range_too_wide(token: impl Into<String>, limit: i64) -> Self {
        Self {
            token: token.into(),
            reason: FormatReason::RangeTooWide { limit },
        }
    }
}

/// A grammar action found a tree node of an unexpected kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected} node, found {found}")]
pub struct ShapeError {
    pub expected: &'static str,
    pub found: &'static str,
}

impl ShapeError {
    pub fn new(expected: &'static str, found: &'static str) -> Self {
        Self { expected, found }
    }
}

/// Failure raised by a grammar action or a rule parser for one command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Format(#[from] FormatError),
    /// The rule body did not match its protocol grammar.
    #[error("unparseable rule `{line}`")]
    Rule { line: String },
    #[error("invalid address or mask `{token}`")]
    Address { token: String },
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("context path `{path}` does not resolve in the tree")]
    Context { path: String },
}

impl CommandError {
    pub fn rule(line: impl Into<String>) -> Self {
        CommandError::Rule { line: line.into() }
    }

    pub fn address(token: impl Into<String>) -> Self {
        CommandError::Address {
            token: token.into(),
        }
    }
}

/// Error that aborts a whole parse.
///
/// `line_no` is the 1-based position of the offending line in the input; it
/// is `None` only when the failure comes from the post-parse pass.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {cause}", location(.line_no, .line))]
pub struct ParseError {
    pub line_no: Option<usize>,
    pub line: String,
    #[source]
    pub cause: CommandError,
}

impl ParseError {
    /// Error attributed to a specific input line.
    pub fn at(line_no: usize, line: impl Into<String>, cause: CommandError) -> Self {
        Self {
            line_no: Some(line_no),
            line: line.into(),
            cause,
        }
    }

    /// Error raised outside line dispatch (post-parse hook).
    pub fn detached(line: impl Into<String>, cause: CommandError) -> Self {
        Self {
            line_no: None,
            line: line.into(),
            cause,
        }
    }
}

fn location(line_no: &Option<usize>, line: &str) -> String {
    match line_no {
        Some(n) => format!("line {n} `{line}`"),
        None => format!("`{line}`"),
    }
}
