//! Selector expression rendering
//!
//! Renders `metric{m1, m2, ...}` for legacy metric names or
//! `{"metric name", m1, m2, ...}` when the metric name itself falls outside
//! the legacy identifier grammar, in which case the quoted name becomes the
//! first selector term instead of a prefix token.
//!
//! Two entry points share one term renderer so that any matcher sequence
//! common to both produces byte-identical text:
//!
//! - [`selector_expr`] builds the single-shot form used directly in query
//!   strings.
//! - [`template_expr`] builds the generic form handed to the host's
//!   template-variable interpolation, with the `${filters}` placeholder as
//!   the final term.
//!
//! The two entry points deliberately disagree on where the ignore-usage
//! marker sits relative to explicit matchers; both observed orderings are
//! load-bearing for downstream string comparisons.

use crate::selector::matchers::{
    escape_quoted, is_legacy_identifier, LabelMatcher, MatcherSet,
};
use crate::types::QuerySpec;

/// Host placeholder interpolated with ad-hoc filters at render time
pub const FILTERS_PLACEHOLDER: &str = "${filters}";

/// Render the brace list for a metric and an ordered list of terms
///
/// Braces are always present, even when empty: `metric{}` is valid PromQL
/// and keeps downstream string surgery (rate wrapping, finite guards)
/// uniform. A trailing comma can never occur because terms are joined.
fn render_selector(metric: &str, terms: &[String]) -> String {
    if is_legacy_identifier(metric) {
        format!("{}{{{}}}", metric, terms.join(", "))
    } else {
        // UTF-8 metric: the quoted name is smuggled in as the first term.
        let mut all = Vec::with_capacity(terms.len() + 1);
        all.push(format!("\"{}\"", escape_quoted(metric)));
        all.extend_from_slice(terms);
        format!("{{{}}}", all.join(", "))
    }
}

/// Render explicit matchers, dropping the reserved `__name__` metadata term
fn render_matchers(matchers: &MatcherSet) -> Vec<String> {
    matchers
        .iter()
        .filter(|m| !m.is_name_matcher())
        .map(LabelMatcher::render)
        .collect()
}

/// Build the single-shot selector expression for a spec
///
/// Term order: explicit matchers, then the ignore-usage marker when
/// requested. For UTF-8 metrics the quoted metric name leads the brace
/// list.
///
/// ```
/// use promql_synth::{LabelMatcher, QuerySpec};
/// use promql_synth::selector::selector_expr;
///
/// let spec = QuerySpec::new("up").with_matcher(LabelMatcher::equals("job", "api"));
/// assert_eq!(selector_expr(&spec), r#"up{job="api"}"#);
/// ```
pub fn selector_expr(spec: &QuerySpec) -> String {
    let mut terms = render_matchers(&spec.matchers);
    if spec.ignore_usage {
        terms.push(LabelMatcher::ignore_usage().render());
    }
    render_selector(&spec.metric, &terms)
}

/// Build the generic, host-interpolatable expression for a spec
///
/// Term order: the ignore-usage marker when requested, then explicit
/// matchers, then the verbatim `${filters}` placeholder as the final term.
/// The placeholder is rendered bare so the host can substitute any matcher
/// list (or nothing) without breaking selector syntax.
pub fn template_expr(spec: &QuerySpec) -> String {
    let mut terms = Vec::with_capacity(spec.matchers.len() + 2);
    if spec.ignore_usage {
        terms.push(LabelMatcher::ignore_usage().render());
    }
    terms.extend(render_matchers(&spec.matchers));
    terms.push(FILTERS_PLACEHOLDER.to_string());
    render_selector(&spec.metric, &terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selector::matchers::NAME_LABEL;

    #[test]
    fn test_ascii_metric_no_matchers() {
        let spec = QuerySpec::new("test_metric");
        assert_eq!(selector_expr(&spec), "test_metric{}");
    }

    #[test]
    fn test_ascii_metric_with_matchers() {
        let spec = QuerySpec::new("http_requests_total")
            .with_matcher(LabelMatcher::equals("job", "api"))
            .with_matcher(LabelMatcher::regex("instance", "web-.*"));
        assert_eq!(
            selector_expr(&spec),
            "http_requests_total{job=\"api\", instance=~\"web-.*\"}"
        );
    }

    #[test]
    fn test_utf8_metric_becomes_first_term() {
        let spec = QuerySpec::new("metric with 🔥");
        assert_eq!(selector_expr(&spec), "{\"metric with 🔥\"}");

        let spec = spec.with_matcher(LabelMatcher::equals("job", "test"));
        assert_eq!(
            selector_expr(&spec),
            "{\"metric with 🔥\", job=\"test\"}"
        );
    }

    #[test]
    fn test_name_matcher_is_dropped() {
        let spec = QuerySpec::new("up")
            .with_matcher(LabelMatcher::equals(NAME_LABEL, "up"))
            .with_matcher(LabelMatcher::equals("job", "node"));
        assert_eq!(selector_expr(&spec), "up{job=\"node\"}");
    }

    #[test]
    fn test_name_matcher_only_leaves_empty_braces() {
        let spec = QuerySpec::new("up").with_matcher(LabelMatcher::equals(NAME_LABEL, "up"));
        assert_eq!(selector_expr(&spec), "up{}");
    }

    #[test]
    fn test_ignore_usage_follows_explicit_in_single_shot() {
        let spec = QuerySpec::new("test_metric")
            .with_matcher(LabelMatcher::equals("instance", "host:3001"))
            .with_ignore_usage();
        assert_eq!(
            selector_expr(&spec),
            "test_metric{instance=\"host:3001\", __ignore_usage__=\"\"}"
        );
    }

    #[test]
    fn test_ignore_usage_leads_in_template_form() {
        let spec = QuerySpec::new("test_metric")
            .with_matcher(LabelMatcher::equals("instance", "host:3001"))
            .with_ignore_usage();
        assert_eq!(
            template_expr(&spec),
            "test_metric{__ignore_usage__=\"\", instance=\"host:3001\", ${filters}}"
        );
    }

    #[test]
    fn test_template_form_bare_placeholder() {
        let spec = QuerySpec::new("test_metric");
        assert_eq!(template_expr(&spec), "test_metric{${filters}}");
    }

    #[test]
    fn test_template_form_utf8_metric() {
        let spec = QuerySpec::new("温度").with_matcher(LabelMatcher::equals("室", "A"));
        assert_eq!(
            template_expr(&spec),
            "{\"温度\", \"室\"=\"A\", ${filters}}"
        );
    }

    #[test]
    fn test_entry_points_agree_on_shared_matchers() {
        let spec = QuerySpec::new("shared_metric")
            .with_matcher(LabelMatcher::equals("a", "1"))
            .with_matcher(LabelMatcher::not_equals("b", "2"));

        let single = selector_expr(&spec);
        let template = template_expr(&spec);
        // The template form is the single-shot form plus the trailing
        // placeholder term.
        assert_eq!(
            template,
            single.replace('}', ", ${filters}}")
        );
    }
}
