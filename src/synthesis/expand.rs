//! Multi-query expansion
//!
//! Fans one logical query out into N concrete [`ResolvedQuery`] entries:
//! one per percentile for quantile functions, one per plain aggregate
//! otherwise. refIds are deterministic for identical inputs and unique
//! within one expansion (duplicates are skipped, first occurrence wins).

use std::collections::HashSet;

use crate::synthesis::policy::aggregate_over;
use crate::types::{AggregateOp, QueryDef, ResolvedQuery};

/// Default percentile list when a quantile def carries none
pub const DEFAULT_PERCENTILES: [f64; 3] = [99.0, 90.0, 50.0];

/// Format a caller-facing percentile for legends and refIds
///
/// Whole numbers drop the fraction: `99` not `99.0`, but `99.9` stays.
fn percentile_label(percentile: f64) -> String {
    let mut s = format!("{:.6}", percentile);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Convert a whole-number percentile to the quantile fraction in `[0, 1]`
///
/// Trailing zeros are trimmed so 99 renders as `0.99`, 90 as `0.9`, and 50
/// as `0.5`, matching hand-written PromQL.
fn quantile_fraction(percentile: f64) -> String {
    let mut s = format!("{:.6}", percentile / 100.0);
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

/// Expand one base expression into concrete queries per the def list
///
/// - `metric` seeds the refId scheme (`<metric>-p<p>-<fn>` for percentile
///   entries, `<metric>-<fn>` otherwise).
/// - `groupings` become a `by` clause on plain aggregate defs.
/// - `rate_suffix` appends `" (rate)"` to plain aggregate legends.
pub fn expand(
    metric: &str,
    groupings: &[String],
    base: &str,
    defs: &[QueryDef],
    rate_suffix: bool,
) -> Vec<ResolvedQuery> {
    let mut queries = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for def in defs {
        let function = def.function.as_str();

        if def.function.is_quantile() {
            let percentiles = def
                .percentiles
                .clone()
                .unwrap_or_else(|| DEFAULT_PERCENTILES.to_vec());

            for percentile in percentiles {
                let label = percentile_label(percentile);
                let ref_id = format!("{}-p{}-{}", metric, label, function);
                if !seen.insert(ref_id.clone()) {
                    continue;
                }
                queries.push(ResolvedQuery {
                    ref_id,
                    expr: format!(
                        "{}({}, {})",
                        function,
                        quantile_fraction(percentile),
                        base
                    ),
                    legend_format: Some(format!("{}th Percentile", label)),
                    format: None,
                });
            }
        } else {
            let ref_id = format!("{}-{}", metric, function);
            if !seen.insert(ref_id.clone()) {
                continue;
            }
            let legend = if rate_suffix {
                format!("{} (rate)", function)
            } else {
                function.to_string()
            };
            queries.push(ResolvedQuery {
                ref_id,
                expr: aggregate_over(function, groupings, base),
                legend_format: Some(legend),
                format: None,
            });
        }
    }

    queries
}

/// Default def list for scalar panels: `sum` for rate specs, the spec's
/// non-rate aggregation otherwise
pub fn default_aggregate_def(is_rate_query: bool, non_rate: AggregateOp) -> QueryDef {
    if is_rate_query {
        QueryDef::aggregate(AggregateOp::Sum)
    } else {
        QueryDef::aggregate(non_rate)
    }
}
