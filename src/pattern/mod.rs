//! # Pattern Module
//!
//! Path matching is a collaborator of the routing table, not part of it.
//! The table only needs a compiled pattern that can say whether a path
//! matches and what it captured; [`PathMatcher`] is that contract and
//! [`RegexPattern`] is the bundled implementation.
//!
//! Patterns are regular expressions matched against the request path with
//! its leading `/` removed, using search (not full-match) semantics, so
//! anchors are written explicitly: `^articles/(?P<year>\d{4})/$`.

mod regex;
mod reverse;

use serde_json::Value;
use std::fmt;

use crate::view::ArgVec;

pub use self::regex::RegexPattern;
pub(crate) use self::reverse::reverse_consuming;
pub use self::reverse::reverse_pattern;

/// Captures produced by a successful match
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternMatch {
    /// Named groups in pattern order; `Value::Null` for groups that did not participate
    pub named: Vec<(String, Value)>,
    /// Unnamed groups in pattern order; `Value::Null` for groups that did not participate
    pub positional: ArgVec,
    /// Whether the pattern declares any named group
    pub has_named_groups: bool,
    /// Byte offset just past the matched text; an include resolves the rest
    pub end: usize,
}

/// A compiled path pattern
pub trait PathMatcher: Send + Sync + fmt::Debug {
    /// Raw pattern text as declared, used for grouping and reversal
    fn as_str(&self) -> &str;

    /// Match `path` (leading `/` already removed)
    fn match_path(&self, path: &str) -> Option<PatternMatch>;
}
