//! AST types for the pattern reverser.

use std::collections::HashMap;
use std::fmt;

/// A single node in the pattern AST.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    /// Exact text to emit. Adjacent literal characters of a concatenation
    /// are merged into one node once quantifiers have been bound.
    Literal(String),
    /// Any character except newline.
    Dot,
    /// Shorthand class: `\d`, `\w`, `\s`, or their uppercase negations.
    CharClass { kind: ClassKind, negated: bool },
    /// Bracketed set like `[abc]`, `[a-z]`, `[^\d_]`.
    CharSet {
        items: Vec<SetItem>,
        negated: bool,
        /// Set under the `i` flag; a negated set must then also exclude the
        /// other case of each member.
        case_insensitive: bool,
    },
    /// Concatenation of nodes (implicit in `ab`). May be empty.
    Concat(Vec<AstNode>),
    /// Alternation (`a|b`). Exactly one branch is realized per generation.
    Alternation(Vec<AstNode>),
    /// Capturing group `(...)` or `(?P<name>...)`.
    Group {
        /// 1-based, assigned by order of the opening parenthesis.
        index: usize,
        name: Option<String>,
        node: Box<AstNode>,
    },
    /// Non-capturing group `(?:...)`, also used for scoped flags `(?i:...)`.
    NonCapturingGroup { node: Box<AstNode> },
    /// Repetition of a sub-expression. `max == None` is unbounded.
    Repeat {
        node: Box<AstNode>,
        min: u32,
        max: Option<u32>,
        mode: RepeatMode,
    },
    /// `\1`, `\g<name>`, `(?P=name)`.
    Backreference(GroupRef),
    /// Zero-width position assertion.
    Anchor(AnchorKind),
    /// Lookahead `(?=...)` or `(?!...)`.
    Lookahead { node: Box<AstNode>, positive: bool },
    /// Lookbehind `(?<=...)` or `(?<!...)`.
    Lookbehind { node: Box<AstNode>, positive: bool },
    /// Atomic group `(?>...)`.
    Atomic { node: Box<AstNode> },
}

/// Predicate-defined shorthand class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Digit,
    Word,
    Space,
}

/// Item within a bracketed set.
#[derive(Debug, Clone, PartialEq)]
pub enum SetItem {
    /// Single character.
    Literal(char),
    /// Inclusive character range `a-z`.
    Range(char, char),
    /// Shorthand within a set, e.g. `[\d]` or `[\S]`.
    Class { kind: ClassKind, negated: bool },
}

/// How a quantifier was written. Only affects which constructs are supported;
/// greedy and lazy repeats generate identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatMode {
    Greedy,
    Lazy,
    Possessive,
}

/// Anchor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorKind {
    /// `^` or `\A`.
    Start,
    /// `$` or `\Z`.
    End,
    /// `^` under the `m` flag: start of the text or just after a newline.
    LineStart,
    /// `$` under the `m` flag: end of the text or just before a newline.
    LineEnd,
    /// `\b`.
    WordBoundary,
    /// `\B`.
    NonWordBoundary,
}

/// Reference to a capturing group, either by 1-based index or by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupRef {
    Index(usize),
    Name(String),
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRef::Index(index) => write!(f, "group {}", index),
            GroupRef::Name(name) => write!(f, "group '{}'", name),
        }
    }
}

/// Capturing groups of a parsed pattern: their count and name aliases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupTable {
    /// `names[i]` is the alias of group `i + 1`, if any.
    names: Vec<Option<String>>,
    by_name: HashMap<String, usize>,
}

impl GroupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next group id. Returns `None` if `name` is already taken.
    pub(crate) fn push(&mut self, name: Option<String>) -> Option<usize> {
        let index = self.names.len() + 1;
        if let Some(name) = &name {
            if self.by_name.contains_key(name) {
                return None;
            }
            self.by_name.insert(name.clone(), index);
        }
        self.names.push(name);
        Some(index)
    }

    /// Total number of capturing groups.
    pub fn count(&self) -> usize {
        self.names.len()
    }

    /// Name alias of group `index`, if it has one.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index.checked_sub(1)?)?.as_deref()
    }

    /// Group id aliased by `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    /// Resolve a reference to a group id present in this table.
    pub fn resolve(&self, target: &GroupRef) -> Option<usize> {
        match target {
            GroupRef::Index(index) if (1..=self.count()).contains(index) => Some(*index),
            GroupRef::Index(_) => None,
            GroupRef::Name(name) => self.index_of(name),
        }
    }

    /// Iterate `(index, name)` for every named group, in id order.
    pub fn names(&self) -> impl Iterator<Item = (usize, &str)> {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(i, name)| name.as_deref().map(|name| (i + 1, name)))
    }
}

/// A parsed pattern: AST root plus its group table.
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub root: AstNode,
    pub groups: GroupTable,
}
