//! Core types for the query synthesis engine
//!
//! Defines the caller-facing input contract ([`QuerySpec`], [`QueryDef`])
//! and the output contract ([`ResolvedQuery`], [`PanelQueries`]) handed to
//! the host's query-execution layer. All types are plain immutable data;
//! synthesis never mutates its inputs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;
use crate::selector::MatcherSet;

// ============================================================================
// Visualization Kinds
// ============================================================================

/// Closed set of visualization kinds the engine can synthesize queries for
///
/// Adding a kind is a compile-time event: every `match` over this enum is
/// exhaustive. Unknown kind strings fail at the parsing boundary with
/// [`Error::UnsupportedKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisualizationKind {
    /// Line chart over time
    #[serde(rename = "timeseries")]
    TimeSeries,
    /// Histogram bucket heatmap
    #[serde(rename = "heatmap")]
    Heatmap,
    /// Percentile fan-out (one series per percentile)
    #[serde(rename = "percentiles")]
    Percentiles,
    /// Binary up/down state over time
    #[serde(rename = "status-history")]
    StatusHistory,
    /// Single-value stat panel
    #[serde(rename = "stat")]
    Stat,
}

impl VisualizationKind {
    /// Canonical kind name as used by the host UI layer
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualizationKind::TimeSeries => "timeseries",
            VisualizationKind::Heatmap => "heatmap",
            VisualizationKind::Percentiles => "percentiles",
            VisualizationKind::StatusHistory => "status-history",
            VisualizationKind::Stat => "stat",
        }
    }
}

impl fmt::Display for VisualizationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VisualizationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "timeseries" => Ok(VisualizationKind::TimeSeries),
            "heatmap" => Ok(VisualizationKind::Heatmap),
            "percentiles" => Ok(VisualizationKind::Percentiles),
            "status-history" => Ok(VisualizationKind::StatusHistory),
            "stat" => Ok(VisualizationKind::Stat),
            other => Err(Error::UnsupportedKind(other.to_string())),
        }
    }
}

/// Panel resolution tier selected by the caller
///
/// Keys the per-kind sample-count budget attached to assembled queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resolution {
    /// Coarse sampling (overview panels)
    Low,
    /// Default sampling
    Medium,
    /// Fine sampling (zoomed-in panels)
    High,
}

// ============================================================================
// Aggregation Functions
// ============================================================================

/// Aggregation over non-rate queries
///
/// Counters are always summed after rate-wrapping; gauges default to `avg`
/// but the caller may request `min` or `max` instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NonRateAggregation {
    /// Arithmetic mean (default)
    #[default]
    Avg,
    /// Minimum value
    Min,
    /// Maximum value
    Max,
}

impl NonRateAggregation {
    /// PromQL function name
    pub fn as_str(&self) -> &'static str {
        match self {
            NonRateAggregation::Avg => "avg",
            NonRateAggregation::Min => "min",
            NonRateAggregation::Max => "max",
        }
    }
}

/// PromQL aggregation operators the expander can emit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateOp {
    /// `sum(...)`
    Sum,
    /// `avg(...)`
    Avg,
    /// `min(...)`
    Min,
    /// `max(...)`
    Max,
    /// `quantile(fraction, ...)` over instant vectors
    Quantile,
    /// `histogram_quantile(fraction, ...)` over bucketed data
    HistogramQuantile,
}

impl AggregateOp {
    /// PromQL function name
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregateOp::Sum => "sum",
            AggregateOp::Avg => "avg",
            AggregateOp::Min => "min",
            AggregateOp::Max => "max",
            AggregateOp::Quantile => "quantile",
            AggregateOp::HistogramQuantile => "histogram_quantile",
        }
    }

    /// True for functions taking a quantile fraction as first argument
    pub fn is_quantile(&self) -> bool {
        matches!(self, AggregateOp::Quantile | AggregateOp::HistogramQuantile)
    }
}

impl From<NonRateAggregation> for AggregateOp {
    fn from(agg: NonRateAggregation) -> Self {
        match agg {
            NonRateAggregation::Avg => AggregateOp::Avg,
            NonRateAggregation::Min => AggregateOp::Min,
            NonRateAggregation::Max => AggregateOp::Max,
        }
    }
}

// ============================================================================
// Query Spec (input contract)
// ============================================================================

/// Caller-declared query intent
///
/// Built once by the host UI layer and treated as immutable input by every
/// synthesis stage. Identical specs always produce byte-identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Metric family name; may contain characters outside the legacy
    /// identifier set ("UTF-8 metric"), which changes selector rendering
    pub metric: String,

    /// Ordered, de-duplicated label matchers
    #[serde(default)]
    pub matchers: MatcherSet,

    /// Wrap the selector in `rate(...[$__rate_interval])` and sum the result
    #[serde(default)]
    pub is_rate_query: bool,

    /// Labels for the outer `by (...)` clause
    #[serde(default)]
    pub groupings: Vec<String>,

    /// Append the `__ignore_usage__=""` marker matcher
    #[serde(default)]
    pub ignore_usage: bool,

    /// Outer aggregation for non-rate queries
    #[serde(default)]
    pub non_rate_aggregation: NonRateAggregation,

    /// Guard the selector with `sel and sel > -Inf`
    #[serde(default)]
    pub filter_extreme_values: bool,
}

impl QuerySpec {
    /// Create a spec for a metric with no matchers and default intent
    pub fn new(metric: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            matchers: MatcherSet::new(),
            is_rate_query: false,
            groupings: Vec::new(),
            ignore_usage: false,
            non_rate_aggregation: NonRateAggregation::Avg,
            filter_extreme_values: false,
        }
    }

    /// Add a label matcher (duplicates are dropped)
    pub fn with_matcher(mut self, matcher: crate::selector::LabelMatcher) -> Self {
        self.matchers.push(matcher);
        self
    }

    /// Replace the matcher set
    pub fn with_matchers(mut self, matchers: MatcherSet) -> Self {
        self.matchers = matchers;
        self
    }

    /// Mark this as a rate query
    pub fn as_rate(mut self) -> Self {
        self.is_rate_query = true;
        self
    }

    /// Add grouping labels for the `by (...)` clause
    pub fn grouped_by(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.groupings.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Request the ignore-usage marker
    pub fn with_ignore_usage(mut self) -> Self {
        self.ignore_usage = true;
        self
    }

    /// Override the non-rate aggregation function
    pub fn with_non_rate_aggregation(mut self, agg: NonRateAggregation) -> Self {
        self.non_rate_aggregation = agg;
        self
    }

    /// Request the finite-value guard
    pub fn with_extreme_value_filter(mut self) -> Self {
        self.filter_extreme_values = true;
        self
    }
}

// ============================================================================
// Query Def (multi-query fan-out)
// ============================================================================

/// One requested output function for multi-query visualization kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDef {
    /// Aggregation function to emit
    pub function: AggregateOp,

    /// Caller-facing whole-number percentiles (e.g. `[99, 90, 50]`);
    /// only meaningful for quantile functions, where `None` falls back to
    /// the documented default list
    #[serde(default)]
    pub percentiles: Option<Vec<f64>>,
}

impl QueryDef {
    /// Plain aggregate definition (one output query)
    pub fn aggregate(function: AggregateOp) -> Self {
        Self {
            function,
            percentiles: None,
        }
    }

    /// Quantile definition with an explicit percentile list
    pub fn quantiles(function: AggregateOp, percentiles: Vec<f64>) -> Self {
        Self {
            function,
            percentiles: Some(percentiles),
        }
    }
}

// ============================================================================
// Resolved Queries (output contract)
// ============================================================================

/// Result shape tag understood by the host's datasource layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultFormat {
    /// Bucketed series reshaped into a heatmap matrix
    Heatmap,
}

impl ResultFormat {
    /// Wire name of the format tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultFormat::Heatmap => "heatmap",
        }
    }
}

/// One concrete query descriptor produced by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuery {
    /// Stable identifier correlating this query with its result set
    pub ref_id: String,

    /// Syntactically valid PromQL, usable verbatim by the host
    pub expr: String,

    /// Optional legend template for the rendered series
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend_format: Option<String>,

    /// Optional result-shape tag (heatmap panels)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ResultFormat>,
}

/// Ordered query list plus panel-level sampling and formatting metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelQueries {
    /// Queries in presentation order
    pub queries: Vec<ResolvedQuery>,

    /// Sample-count budget for the panel
    pub max_data_points: u32,

    /// Panel-level result format (heatmap panels)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ResultFormat>,
}
