//! Heuristic metric classification
//!
//! Tags a metric name with a semantic kind based on Prometheus naming
//! conventions. Classification is a total function over all strings: any
//! name that matches nothing falls through to [`MetricKind::Gauge`].
//!
//! Native histograms cannot be detected from the name alone; the host
//! resolves that asynchronously out-of-band and the result is applied as an
//! explicit hint via [`MetricKind::with_native_hint`].

use lazy_static::lazy_static;
use std::collections::HashSet;

use crate::config::ClassifierConfig;

/// Suffixes that mark a metric as a cumulative counter
const COUNTER_SUFFIXES: [&str; 3] = ["_total", "_count", "_sum"];

/// Suffix that marks a classic (explicit-bucket) histogram series
const BUCKET_SUFFIX: &str = "_bucket";

/// Token conventionally present in age/timestamp metrics
const AGE_TOKEN: &str = "timestamp_seconds";

lazy_static! {
    /// Built-in binary-state metric names, merged with the configured
    /// allow-list at classifier construction time
    static ref DEFAULT_BINARY_METRICS: HashSet<&'static str> =
        ["up", "probe_success"].into_iter().collect();
}

// ============================================================================
// Metric Kind
// ============================================================================

/// Semantic kind assigned to a metric name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Cumulative counter (`_total`, `_count`, `_sum`)
    Counter,
    /// Classic histogram bucket series (`_bucket`)
    ClassicHistogram,
    /// Timestamp/age metric (`*timestamp_seconds*`)
    Age,
    /// Binary up/down state
    StatusUpDown,
    /// Gauge upgraded by the host's native-histogram check
    NativeHistogramCandidate,
    /// Everything else
    Gauge,
}

impl MetricKind {
    /// Apply the host-resolved native-histogram hint
    ///
    /// Only a plain gauge can be upgraded; suffix-classified kinds keep
    /// their classification since the name evidence is stronger.
    pub fn with_native_hint(self, is_native_histogram: bool) -> Self {
        if is_native_histogram && self == MetricKind::Gauge {
            MetricKind::NativeHistogramCandidate
        } else {
            self
        }
    }

    /// True for kinds queried through histogram-shaped expressions
    pub fn is_histogram(&self) -> bool {
        matches!(
            self,
            MetricKind::ClassicHistogram | MetricKind::NativeHistogramCandidate
        )
    }
}

// ============================================================================
// Classifier
// ============================================================================

/// Name-based metric classifier
///
/// Rules apply in precedence order, first match wins:
/// 1. counter suffix (`_total`, `_count`, `_sum`)
/// 2. bucket suffix (`_bucket`)
/// 3. age token (`timestamp_seconds`)
/// 4. up/down heuristic (`up`, `*_up`, configured allow-list)
/// 5. gauge
#[derive(Debug, Clone, Default)]
pub struct MetricClassifier {
    config: ClassifierConfig,
}

impl MetricClassifier {
    /// Create a classifier with the given configuration
    pub fn new(config: ClassifierConfig) -> Self {
        Self { config }
    }

    /// Classify a metric name
    pub fn classify(&self, metric: &str) -> MetricKind {
        if COUNTER_SUFFIXES.iter().any(|s| metric.ends_with(s)) {
            return MetricKind::Counter;
        }

        if metric.ends_with(BUCKET_SUFFIX) {
            return MetricKind::ClassicHistogram;
        }

        if metric.contains(AGE_TOKEN) {
            return MetricKind::Age;
        }

        if self.is_up_down(metric) {
            return MetricKind::StatusUpDown;
        }

        MetricKind::Gauge
    }

    fn is_up_down(&self, metric: &str) -> bool {
        metric == "up"
            || metric.ends_with("_up")
            || DEFAULT_BINARY_METRICS.contains(metric)
            || self
                .config
                .binary_metric_names
                .iter()
                .any(|name| name == metric)
    }
}
