//! PromQL query synthesis for metrics-exploration UIs
//!
//! This library turns a metric name, a set of label matchers, and a
//! declared visualization intent into one or more syntactically valid
//! PromQL strings plus per-query presentation metadata (refId, legend,
//! result format, sample budget).
//!
//! Everything here is a pure, synchronous transform over immutable inputs:
//! no I/O, no shared mutable state, no async boundary. The one external
//! dependency — "is this metric a native histogram" — is resolved by the
//! host out-of-band and passed in as a plain boolean.
//!
//! # Example
//!
//! ```rust
//! use promql_synth::{
//!     LabelMatcher, QueryAssembler, QuerySpec, Resolution, VisualizationKind,
//! };
//!
//! let spec = QuerySpec::new("http_requests_total")
//!     .with_matcher(LabelMatcher::equals("job", "api"))
//!     .as_rate();
//!
//! let panel = QueryAssembler::default().assemble(
//!     VisualizationKind::TimeSeries,
//!     &spec,
//!     Resolution::Medium,
//!     false,
//! );
//!
//! assert_eq!(
//!     panel.queries[0].expr,
//!     r#"sum(rate(http_requests_total{job="api"}[$__rate_interval]))"#
//! );
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;
pub mod config;
pub mod error;
pub mod selector;
pub mod synthesis;
pub mod types;

// Re-export main types
pub use classify::{MetricClassifier, MetricKind};
pub use config::{ClassifierConfig, EngineConfig};
pub use error::{Error, Result};
pub use selector::{LabelMatcher, MatchOp, MatcherSet};
pub use synthesis::{QueryAssembler, DEFAULT_PERCENTILES, RATE_INTERVAL};
pub use types::{
    AggregateOp, NonRateAggregation, PanelQueries, QueryDef, QuerySpec, ResolvedQuery, Resolution,
    ResultFormat, VisualizationKind,
};
