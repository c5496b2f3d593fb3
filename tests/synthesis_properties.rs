//! Property-based tests for selector rendering and query assembly
//!
//! Uses proptest to hammer the total-function guarantees: no input metric
//! name or matcher list may panic, rendering is deterministic, and the
//! reserved `__name__` matcher never leaks into output.

use proptest::prelude::*;

use promql_synth::selector::{selector_expr, template_expr};
use promql_synth::synthesis::expand;
use promql_synth::{
    AggregateOp, LabelMatcher, MatchOp, QueryAssembler, QueryDef, QuerySpec, Resolution,
    VisualizationKind,
};

// =============================================================================
// Test Data Strategies
// =============================================================================

/// Strategy for legacy-grammar metric and label names
fn legacy_name() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,24}"
}

/// Strategy for label keys that are not the reserved `__name__` label
fn label_key() -> impl Strategy<Value = String> {
    legacy_name().prop_filter("reserved label", |k| k != "__name__")
}

/// Strategy for metric names outside the legacy grammar
fn utf8_name() -> impl Strategy<Value = String> {
    "[a-z]{1,12}".prop_map(|s| format!("{} métrica 🔥", s))
}

/// Strategy for opaque label values (printable, no quote-breaking chars)
fn label_value() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .:/*+-]{0,20}"
}

fn match_op() -> impl Strategy<Value = MatchOp> {
    prop_oneof![
        Just(MatchOp::Equals),
        Just(MatchOp::NotEquals),
        Just(MatchOp::RegexMatch),
        Just(MatchOp::RegexNotMatch),
    ]
}

fn matcher() -> impl Strategy<Value = LabelMatcher> {
    (label_key(), match_op(), label_value())
        .prop_map(|(key, op, value)| LabelMatcher::new(key, op, value))
}

fn matcher_list() -> impl Strategy<Value = Vec<LabelMatcher>> {
    prop::collection::vec(matcher(), 0..6)
}

fn visualization_kind() -> impl Strategy<Value = VisualizationKind> {
    prop_oneof![
        Just(VisualizationKind::TimeSeries),
        Just(VisualizationKind::Heatmap),
        Just(VisualizationKind::Percentiles),
        Just(VisualizationKind::StatusHistory),
        Just(VisualizationKind::Stat),
    ]
}

fn resolution() -> impl Strategy<Value = Resolution> {
    prop_oneof![
        Just(Resolution::Low),
        Just(Resolution::Medium),
        Just(Resolution::High),
    ]
}

fn spec(metric: impl Strategy<Value = String>) -> impl Strategy<Value = QuerySpec> {
    (metric, matcher_list(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(name, matchers, is_rate, ignore_usage, filter_extremes)| {
            let mut spec = QuerySpec::new(name).with_matchers(matchers.into_iter().collect());
            if is_rate {
                spec = spec.as_rate();
            }
            if ignore_usage {
                spec = spec.with_ignore_usage();
            }
            if filter_extremes {
                spec = spec.with_extreme_value_filter();
            }
            spec
        },
    )
}

// =============================================================================
// Selector Properties
// =============================================================================

proptest! {
    /// Rendering is a pure function: same spec, same bytes.
    #[test]
    fn rendering_is_deterministic(spec in spec(legacy_name())) {
        prop_assert_eq!(selector_expr(&spec), selector_expr(&spec));
        prop_assert_eq!(template_expr(&spec), template_expr(&spec));
    }

    /// Selectors always close their brace list, whatever the input.
    #[test]
    fn selectors_are_brace_terminated(spec in spec(legacy_name())) {
        let expr = selector_expr(&spec);
        prop_assert!(expr.contains('{'), "expr must contain an opening brace: {:?}", expr);
        prop_assert!(expr.ends_with('}'), "expr must end with a closing brace: {:?}", expr);
        prop_assert!(!expr.contains(", }"), "expr must not contain a dangling comma: {:?}", expr);
    }

    /// `__name__` matchers are metadata and never render as terms.
    #[test]
    fn name_matcher_is_always_dropped(
        metric in legacy_name(),
        matchers in matcher_list(),
        name_value in label_value(),
    ) {
        let mut spec = QuerySpec::new(metric)
            .with_matcher(LabelMatcher::equals("__name__", name_value));
        for m in matchers {
            spec = spec.with_matcher(m);
        }
        prop_assert!(!selector_expr(&spec).contains("__name__"));
        prop_assert!(!template_expr(&spec).contains("__name__"));
    }

    /// UTF-8 metrics always render as the quoted-name-first selector form.
    #[test]
    fn utf8_metrics_lead_the_brace_list(spec in spec(utf8_name())) {
        let expr = selector_expr(&spec);
        let expected_prefix = format!("{{\"{}\"", spec.metric);
        prop_assert!(expr.starts_with(&expected_prefix));
    }

    /// The template form is the single-shot form plus the trailing
    /// placeholder, for any matcher sequence the two entry points share.
    #[test]
    fn entry_points_stay_byte_compatible(
        metric in legacy_name(),
        matchers in matcher_list(),
    ) {
        let spec = QuerySpec::new(metric).with_matchers(matchers.into_iter().collect());
        let single = selector_expr(&spec);
        let template = template_expr(&spec);

        let joined = if spec.matchers.is_empty() {
            single.replace("{}", "{${filters}}")
        } else {
            format!("{}, ${{filters}}}}", single.trim_end_matches('}'))
        };
        prop_assert_eq!(template, joined);
    }
}

// =============================================================================
// Expansion Properties
// =============================================================================

proptest! {
    /// refIds are unique within one expansion.
    #[test]
    fn ref_ids_are_unique(
        metric in legacy_name(),
        percentiles in prop::collection::vec(1u32..1000, 1..8),
    ) {
        let percentiles: Vec<f64> = percentiles.iter().map(|p| *p as f64 / 10.0).collect();
        let defs = [QueryDef::quantiles(AggregateOp::Quantile, percentiles)];
        let queries = expand(&metric, &[], "base{}", &defs, false);

        let mut seen = std::collections::HashSet::new();
        for query in &queries {
            prop_assert!(seen.insert(query.ref_id.clone()), "duplicate {}", query.ref_id);
        }
    }

    /// Quantile fractions always land in [0, 1] for percentiles in (0, 100).
    #[test]
    fn fractions_are_normalized(percentile in 1u32..100) {
        let defs = [QueryDef::quantiles(AggregateOp::Quantile, vec![percentile as f64])];
        let queries = expand("m", &[], "m{}", &defs, false);
        prop_assert_eq!(queries.len(), 1);
        prop_assert!(queries[0].expr.starts_with("quantile(0."));
    }
}

// =============================================================================
// Assembly Properties
// =============================================================================

proptest! {
    /// Assembly never panics and is byte-deterministic for every kind,
    /// resolution, and native-histogram hint.
    #[test]
    fn assembly_is_total_and_deterministic(
        spec in spec(legacy_name()),
        kind in visualization_kind(),
        resolution in resolution(),
        is_native in any::<bool>(),
    ) {
        let assembler = QueryAssembler::default();
        let first = assembler.assemble(kind, &spec, resolution, is_native);
        let second = assembler.assemble(kind, &spec, resolution, is_native);

        prop_assert_eq!(&first, &second);
        prop_assert!(!first.queries.is_empty());
        prop_assert!(first.max_data_points >= 100);
        prop_assert!(first.max_data_points <= 500);
    }
}
