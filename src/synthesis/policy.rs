//! Aggregation policy and the finite-value guard
//!
//! Decides how a selector is wrapped: whether it is rate-wrapped, which
//! outer aggregation applies, and how grouping labels are attached. The
//! rate interval is always the host's `$__rate_interval` placeholder; this
//! engine never computes concrete durations.

use crate::selector::selector_expr;
use crate::types::QuerySpec;

/// Host placeholder for the automatically chosen rate interval
pub const RATE_INTERVAL: &str = "$__rate_interval";

/// Wrap a selector in `rate(sel[$__rate_interval])`
pub fn rate_wrap(selector: &str) -> String {
    format!("rate({}[{}])", selector, RATE_INTERVAL)
}

/// Guard an expression against -Inf/+Inf staleness artifacts
///
/// `sel` becomes `sel and sel > -Inf`. Applied to the selector before any
/// rate or aggregation wrapping so the guard travels inside the outer call.
pub fn finite_guard(selector: &str) -> String {
    format!("{} and {} > -Inf", selector, selector)
}

/// Apply an outer aggregation, with an optional `by (...)` clause
pub fn aggregate_over(function: &str, groupings: &[String], inner: &str) -> String {
    if groupings.is_empty() {
        format!("{}({})", function, inner)
    } else {
        format!("{} by ({}) ({})", function, groupings.join(", "), inner)
    }
}

/// Render the selector with the finite-value guard applied when requested
pub fn guarded_selector(spec: &QuerySpec) -> String {
    let selector = selector_expr(spec);
    if spec.filter_extreme_values {
        finite_guard(&selector)
    } else {
        selector
    }
}

/// Base expression before the outer aggregation
///
/// Rate specs get the rate wrapping here; non-rate specs pass the guarded
/// selector through untouched.
pub fn base_expr(spec: &QuerySpec) -> String {
    let selector = guarded_selector(spec);
    if spec.is_rate_query {
        rate_wrap(&selector)
    } else {
        selector
    }
}

/// Fully aggregated expression for scalar-shaped panels
///
/// Rate specs aggregate with `sum`; non-rate specs use the caller's
/// non-rate aggregation (default `avg`). Groupings become a `by` clause on
/// the outer function.
pub fn aggregated_expr(spec: &QuerySpec) -> String {
    let inner = base_expr(spec);
    let function = if spec.is_rate_query {
        "sum"
    } else {
        spec.non_rate_aggregation.as_str()
    };
    aggregate_over(function, &spec.groupings, &inner)
}

/// Histogram base expression for heatmap and percentile panels
///
/// Classic histograms keep the explicit bucket dimension:
/// `sum by (le) (rate(sel[$__rate_interval]))`. Native histograms encode
/// buckets implicitly, so the bare `rate(sel[$__rate_interval])` is the
/// whole story.
pub fn histogram_expr(spec: &QuerySpec, is_native_histogram: bool) -> String {
    let rated = rate_wrap(&guarded_selector(spec));
    if is_native_histogram {
        rated
    } else {
        aggregate_over("sum", &["le".to_string()], &rated)
    }
}

/// Expression for binary up/down state panels
///
/// Always `min`, never rate-wrapped: binary gauges are not counters.
pub fn status_expr(spec: &QuerySpec) -> String {
    aggregate_over("min", &spec.groupings, &guarded_selector(spec))
}
