//! Label matchers and UTF-8-safe selector term escaping
//!
//! A matcher key or metric name is "legacy" when it satisfies the classic
//! Prometheus identifier grammar (ASCII alphanumeric plus underscore, not
//! starting with a digit). Anything else is a UTF-8 identifier and must be
//! rendered quoted. The check applies per key, never to the query as a
//! whole.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved metadata label; never rendered as a selector term
pub const NAME_LABEL: &str = "__name__";

/// Marker label appended when usage-filtering is requested
pub const IGNORE_USAGE_LABEL: &str = "__ignore_usage__";

// ============================================================================
// Match Operators
// ============================================================================

/// PromQL label matching operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOp {
    /// Exact equality: `label="value"`
    #[serde(rename = "=")]
    Equals,
    /// Inequality: `label!="value"`
    #[serde(rename = "!=")]
    NotEquals,
    /// Regex match: `label=~"pattern"`
    #[serde(rename = "=~")]
    RegexMatch,
    /// Regex non-match: `label!~"pattern"`
    #[serde(rename = "!~")]
    RegexNotMatch,
}

impl MatchOp {
    /// Operator token as rendered between key and value
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchOp::Equals => "=",
            MatchOp::NotEquals => "!=",
            MatchOp::RegexMatch => "=~",
            MatchOp::RegexNotMatch => "!~",
        }
    }
}

impl fmt::Display for MatchOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Escaping
// ============================================================================

/// Check a key against the legacy identifier grammar
///
/// Legacy identifiers render unquoted; everything else (spaces, unicode,
/// leading digits, empty strings) renders as a quoted UTF-8 identifier.
pub fn is_legacy_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        None => return false,
        Some(first) => {
            if !(first.is_ascii_alphabetic() || first == '_') {
                return false;
            }
        }
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Escape a string for use inside double quotes
///
/// Regex-like content in values is opaque string data; only the characters
/// that would break the quoted literal are escaped.
pub fn escape_quoted(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Render an identifier, quoting it when it falls outside the legacy grammar
pub fn render_identifier(name: &str) -> String {
    if is_legacy_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", escape_quoted(name))
    }
}

// ============================================================================
// Label Matcher
// ============================================================================

/// One selector term: `key<op>"value"`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelMatcher {
    /// Label key; may be a UTF-8 identifier
    pub key: String,
    /// Match operator
    pub op: MatchOp,
    /// Label value, treated as opaque string data
    pub value: String,
}

impl LabelMatcher {
    /// Create a matcher with an explicit operator
    pub fn new(key: impl Into<String>, op: MatchOp, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            op,
            value: value.into(),
        }
    }

    /// Create an equality matcher: `key="value"`
    pub fn equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, MatchOp::Equals, value)
    }

    /// Create an inequality matcher: `key!="value"`
    pub fn not_equals(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(key, MatchOp::NotEquals, value)
    }

    /// Create a regex matcher: `key=~"pattern"`
    pub fn regex(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(key, MatchOp::RegexMatch, pattern)
    }

    /// Create a negated regex matcher: `key!~"pattern"`
    pub fn not_regex(key: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::new(key, MatchOp::RegexNotMatch, pattern)
    }

    /// The ignore-usage marker matcher, always `__ignore_usage__=""`
    pub fn ignore_usage() -> Self {
        Self::equals(IGNORE_USAGE_LABEL, "")
    }

    /// True for the reserved `__name__` metadata matcher
    pub fn is_name_matcher(&self) -> bool {
        self.key == NAME_LABEL
    }

    /// Render as a selector term, quoting UTF-8 keys
    pub fn render(&self) -> String {
        format!(
            "{}{}\"{}\"",
            render_identifier(&self.key),
            self.op,
            escape_quoted(&self.value)
        )
    }
}

// ============================================================================
// Matcher Set
// ============================================================================

/// Ordered, de-duplicated sequence of label matchers
///
/// Order is significant: rendered output is compared by literal string
/// equality, not set equality. Exact duplicates (same key, operator, and
/// value) are dropped on insert, keeping the first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatcherSet {
    matchers: Vec<LabelMatcher>,
}

impl MatcherSet {
    /// Create an empty matcher set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a matcher, dropping exact duplicates
    pub fn push(&mut self, matcher: LabelMatcher) {
        if !self.matchers.contains(&matcher) {
            self.matchers.push(matcher);
        }
    }

    /// Iterate matchers in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, LabelMatcher> {
        self.matchers.iter()
    }

    /// Number of matchers
    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    /// True when the set holds no matchers
    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl FromIterator<LabelMatcher> for MatcherSet {
    fn from_iter<I: IntoIterator<Item = LabelMatcher>>(iter: I) -> Self {
        let mut set = MatcherSet::new();
        for matcher in iter {
            set.push(matcher);
        }
        set
    }
}

impl<'a> IntoIterator for &'a MatcherSet {
    type Item = &'a LabelMatcher;
    type IntoIter = std::slice::Iter<'a, LabelMatcher>;

    fn into_iter(self) -> Self::IntoIter {
        self.matchers.iter()
    }
}
