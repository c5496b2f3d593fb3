//! Selector construction: label matchers, escaping, and expression rendering
//!
//! This module owns the literal string contracts of the engine. Matcher
//! order is preserved end to end, `__name__` terms are dropped at render
//! time, and UTF-8 metric names degrade to the quoted name-as-first-term
//! selector form.

pub mod matchers;
pub mod render;

// Re-export main types
pub use matchers::{
    escape_quoted, is_legacy_identifier, render_identifier, LabelMatcher, MatchOp, MatcherSet,
    IGNORE_USAGE_LABEL, NAME_LABEL,
};
pub use render::{selector_expr, template_expr, FILTERS_PLACEHOLDER};
