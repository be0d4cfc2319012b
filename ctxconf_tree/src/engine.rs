use std::fmt;

use regex::{Captures, Regex};
use tracing::{debug, trace};

use crate::error::{CommandError, ParseError};
use crate::value::{ConfigTree, Key, Value};

/// Action run when a grammar matches.
///
/// It receives the node of the active context and may return a path,
/// relative to that node, of the sub-tree an entered context should mutate.
pub type Action<D> =
    fn(&D, &Captures<'_>, &mut Value) -> Result<Option<Vec<Key>>, CommandError>;

/// Dialect extension point: which grammars exist and how to finish a parse.
pub trait Dialect: Sized {
    /// Nesting context a grammar is valid in.
    type Context: Copy + Eq + fmt::Debug;

    /// Context active at indentation level zero.
    fn root_context(&self) -> Self::Context;

    /// Ordered grammar registry.
    fn grammars(&self) -> &GrammarTable<Self>;

    /// Whether a dedented line is a comment.
    fn is_comment(&self, text: &str) -> bool {
        text.starts_with('!')
    }

    /// Runs once after the last line has been dispatched.
    fn post_parse(&self, _tree: &mut ConfigTree) -> Result<(), ParseError> {
        Ok(())
    }
}

/// One line grammar: valid in `context`, matched by `pattern`.
pub struct Grammar<D: Dialect> {
    pub name: &'static str,
    pub context: D::Context,
    pub pattern: Regex,
    pub enter: Option<D::Context>,
    pub action: Action<D>,
}

impl<D: Dialect> fmt::Debug for Grammar<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grammar")
            .field("name", &self.name)
            .field("context", &self.context)
            .field("pattern", &self.pattern.as_str())
            .field("enter", &self.enter)
            .finish()
    }
}

/// Grammars in registration order.
///
/// Within one context the first matching grammar wins, so a more specific
/// pattern must be registered before a general one sharing its prefix.
pub struct GrammarTable<D: Dialect> {
    entries: Vec<Grammar<D>>,
}

impl<D: Dialect> Default for GrammarTable<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dialect> GrammarTable<D> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Compile `pattern` and append a grammar.
    pub fn register(
        &mut self,
        name: &'static str,
        context: D::Context,
        pattern: &str,
        enter: Option<D::Context>,
        action: Action<D>,
    ) -> Result<&mut Self, regex::Error> {
        self.entries.push(Grammar {
            name,
            context,
            pattern: Regex::new(pattern)?,
            enter,
            action,
        });
        Ok(self)
    }

    /// First grammar valid in `context` whose pattern matches `text`.
    pub fn matching<'t>(
        &self,
        context: D::Context,
        text: &'t str,
    ) -> Option<(&Grammar<D>, Captures<'t>)> {
        self.entries
            .iter()
            .filter(|grammar| grammar.context == context)
            .find_map(|grammar| grammar.pattern.captures(text).map(|caps| (grammar, caps)))
    }

    /// Look up a grammar by name.
    pub fn get(&self, name: &str) -> Option<&Grammar<D>> {
        self.entries.iter().find(|grammar| grammar.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Grammar<D>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs of grammar names that repeat a name, or share both context and
    /// pattern (the later one could never fire).
    pub fn duplicates(&self) -> Vec<(&'static str, &'static str)> {
        let mut out = Vec::new();
        for (idx, first) in self.entries.iter().enumerate() {
            for second in &self.entries[idx + 1..] {
                let same_pattern = first.context == second.context
                    && first.pattern.as_str() == second.pattern.as_str();
                if same_pattern || first.name == second.name {
                    out.push((first.name, second.name));
                }
            }
        }
        out
    }
}

/// One level of the context stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextFrame<C> {
    /// `None` for lines that opened no context; their children are skipped.
    pub context: Option<C>,
    /// Indentation of the line that pushed this frame; `None` for the root.
    pub indent: Option<usize>,
    /// Path from the tree root to the node commands in this frame mutate.
    pub path: Vec<Key>,
}

/// Nesting bookkeeping for one parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState<C> {
    pub context_stack: Vec<ContextFrame<C>>,
}

impl<C: Copy> ParserState<C> {
    pub fn new(root: C) -> Self {
        Self {
            context_stack: vec![ContextFrame {
                context: Some(root),
                indent: None,
                path: Vec::new(),
            }],
        }
    }

    /// Innermost frame. The root frame is never popped.
    pub fn top(&self) -> &ContextFrame<C> {
        let last = self.context_stack.len() - 1;
        &self.context_stack[last]
    }

    pub fn depth(&self) -> usize {
        self.context_stack.len()
    }

    /// Pop every frame opened at `indent` or deeper.
    pub fn unwind(&mut self, indent: usize) {
        while self.context_stack.len() > 1
            && self.top().indent.is_some_and(|frame| frame >= indent)
        {
            self.context_stack.pop();
        }
    }

    fn push(&mut self, frame: ContextFrame<C>) {
        self.context_stack.push(frame);
    }
}

/// Outcome of dispatching one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied {
        grammar: &'static str,
        entered: bool,
    },
    /// No grammar matched in the active context.
    Unrecognized,
    /// The line sits inside a block that opened no context.
    Ignored,
}

/// Dispatch one dedented line against the grammar table.
///
/// Pops frames the line closes, runs the first matching grammar against the
/// active node, and pushes the frame the line opens.
pub fn dispatch<D: Dialect>(
    dialect: &D,
    state: &mut ParserState<D::Context>,
    tree: &mut ConfigTree,
    indent: usize,
    text: &str,
) -> Result<Dispatch, CommandError> {
    state.unwind(indent);
    let frame = state.top();
    let path = frame.path.clone();

    let Some(context) = frame.context else {
        state.push(ContextFrame {
            context: None,
            indent: Some(indent),
            path,
        });
        return Ok(Dispatch::Ignored);
    };

    let Some((grammar, caps)) = dialect.grammars().matching(context, text) else {
        trace!(?context, line = text, "no grammar matched");
        state.push(ContextFrame {
            context: None,
            indent: Some(indent),
            path,
        });
        return Ok(Dispatch::Unrecognized);
    };

    let node = tree
        .root_mut()
        .pointer_mut(&path)
        .ok_or_else(|| CommandError::Context {
            path: render_path(&path),
        })?;
    let sub_path = (grammar.action)(dialect, &caps, node)?;

    let next = match grammar.enter {
        Some(entered) => {
            let mut path = path;
            path.extend(sub_path.unwrap_or_default());
            debug!(grammar = grammar.name, context = ?entered, path = %render_path(&path), "entering context");
            ContextFrame {
                context: Some(entered),
                indent: Some(indent),
                path,
            }
        }
        None => ContextFrame {
            context: None,
            indent: Some(indent),
            path,
        },
    };
    state.push(next);

    Ok(Dispatch::Applied {
        grammar: grammar.name,
        entered: grammar.enter.is_some(),
    })
}

/// Parse configuration lines into a [`ConfigTree`].
///
/// Blank lines are skipped, comments are discarded without touching the
/// context stack, and a context closes on the first line indented no deeper
/// than the line that opened it. Unrecognized lines are skipped; any
/// [`CommandError`] aborts the parse with the offending line attached.
pub fn parse_lines<D, S>(dialect: &D, lines: &[S]) -> Result<ConfigTree, ParseError>
where
    D: Dialect,
    S: AsRef<str>,
{
    let mut tree = ConfigTree::new();
    let mut state = ParserState::new(dialect.root_context());

    for (idx, raw) in lines.iter().enumerate() {
        let raw = raw.as_ref();
        let text = raw.trim();
        if text.is_empty() || dialect.is_comment(text) {
            continue;
        }

        dispatch(dialect, &mut state, &mut tree, count_indent(raw), text)
            .map_err(|cause| ParseError::at(idx + 1, text, cause))?;
    }

    dialect.post_parse(&mut tree)?;
    Ok(tree)
}

/// Split `input` into lines and run [`parse_lines`].
pub fn parse_text<D: Dialect>(dialect: &D, input: &str) -> Result<ConfigTree, ParseError> {
    let lines = input.lines().collect::<Vec<_>>();
    parse_lines(dialect, &lines)
}

fn count_indent(raw: &str) -> usize {
    let mut width = 0usize;
    for ch in raw.chars() {
        match ch {
            ' ' => width += 1,
            '\t' => width += 4,
            _ => break,
        }
    }
    width
}

fn render_path(path: &[Key]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indentation_counts_tabs_as_four_columns() {
        assert_eq!(count_indent("interface Gi0/1"), 0);
        assert_eq!(count_indent("  description x"), 2);
        assert_eq!(count_indent("\t description x"), 5);
    }

    #[test]
    fn unwind_keeps_root_frame() {
        let mut state = ParserState::new(0u8);
        state.push(ContextFrame {
            context: Some(1),
            indent: Some(0),
            path: vec![Key::from("interface")],
        });
        state.push(ContextFrame {
            context: None,
            indent: Some(2),
            path: Vec::new(),
        });

        state.unwind(2);
        assert_eq!(state.depth(), 2);
        state.unwind(0);
        assert_eq!(state.depth(), 1);
        assert_eq!(state.top().context, Some(0));
    }
}
