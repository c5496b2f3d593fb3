//! Top-level query assembly per visualization kind
//!
//! Composes classification, selector rendering, aggregation policy, and
//! multi-query expansion into the final ordered descriptor list, then
//! attaches the panel-level sample budget and result format.

use lazy_static::lazy_static;
use std::collections::HashMap;
use tracing::{debug, trace};

use crate::classify::{MetricClassifier, MetricKind};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::synthesis::expand::{default_aggregate_def, expand};
use crate::synthesis::policy::{base_expr, histogram_expr, status_expr};
use crate::types::{
    AggregateOp, PanelQueries, QueryDef, QuerySpec, ResolvedQuery, Resolution, ResultFormat,
    VisualizationKind,
};

lazy_static! {
    /// Sample-count budget per visualization kind and resolution tier
    ///
    /// Built once at startup and never mutated. Every (kind, resolution)
    /// pair is present.
    static ref SAMPLE_BUDGETS: HashMap<(VisualizationKind, Resolution), u32> = {
        use Resolution::{High, Low, Medium};
        use VisualizationKind::*;

        let mut budgets = HashMap::new();
        for (kind, low, medium, high) in [
            (TimeSeries, 100, 250, 500),
            (Percentiles, 100, 250, 500),
            (Heatmap, 100, 200, 250),
            (StatusHistory, 100, 100, 200),
            (Stat, 100, 100, 100),
        ] {
            budgets.insert((kind, Low), low);
            budgets.insert((kind, Medium), medium);
            budgets.insert((kind, High), high);
        }
        budgets
    };
}

/// Look up the sample budget for a kind/resolution pair
pub fn sample_budget(kind: VisualizationKind, resolution: Resolution) -> u32 {
    // The table is total over both enums; the fallback is unreachable but
    // keeps the lookup panic-free.
    SAMPLE_BUDGETS
        .get(&(kind, resolution))
        .copied()
        .unwrap_or(250)
}

// ============================================================================
// Query Assembler
// ============================================================================

/// Per-kind query assembler
///
/// Stateless apart from the classifier configuration; safe to share across
/// concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct QueryAssembler {
    classifier: MetricClassifier,
}

impl QueryAssembler {
    /// Create an assembler with the given engine configuration
    pub fn new(config: EngineConfig) -> Self {
        Self {
            classifier: MetricClassifier::new(config.classifier),
        }
    }

    /// Assemble queries for a kind named by the host UI layer
    ///
    /// Fails with [`crate::Error::UnsupportedKind`] for anything outside
    /// the closed five-way set; that error is a programmer error and must
    /// propagate.
    pub fn assemble_named(
        &self,
        kind: &str,
        spec: &QuerySpec,
        resolution: Resolution,
        is_native_histogram: bool,
    ) -> Result<PanelQueries> {
        let kind: VisualizationKind = kind.parse()?;
        Ok(self.assemble(kind, spec, resolution, is_native_histogram))
    }

    /// Assemble the ordered query list plus panel metadata for a kind
    ///
    /// Pure over its inputs: identical arguments always yield byte-identical
    /// descriptors.
    pub fn assemble(
        &self,
        kind: VisualizationKind,
        spec: &QuerySpec,
        resolution: Resolution,
        is_native_histogram: bool,
    ) -> PanelQueries {
        let classification = self
            .classifier
            .classify(&spec.metric)
            .with_native_hint(is_native_histogram);
        debug!(
            metric = %spec.metric,
            kind = %kind,
            ?classification,
            "assembling panel queries"
        );

        let queries = match kind {
            VisualizationKind::TimeSeries | VisualizationKind::Stat => {
                self.assemble_aggregate(spec)
            }
            VisualizationKind::Heatmap => self.assemble_heatmap(spec, classification),
            VisualizationKind::Percentiles => self.assemble_percentiles(spec, classification),
            VisualizationKind::StatusHistory => self.assemble_status(spec),
        };

        for query in &queries {
            trace!(ref_id = %query.ref_id, expr = %query.expr, "resolved query");
        }

        let format = match kind {
            VisualizationKind::Heatmap => Some(ResultFormat::Heatmap),
            _ => None,
        };

        PanelQueries {
            queries,
            max_data_points: sample_budget(kind, resolution),
            format,
        }
    }

    /// Default single-query shape shared by timeseries and stat panels
    fn assemble_aggregate(&self, spec: &QuerySpec) -> Vec<ResolvedQuery> {
        let def = default_aggregate_def(spec.is_rate_query, spec.non_rate_aggregation.into());
        expand(
            &spec.metric,
            &spec.groupings,
            &base_expr(spec),
            &[def],
            spec.is_rate_query,
        )
    }

    fn assemble_heatmap(&self, spec: &QuerySpec, classification: MetricKind) -> Vec<ResolvedQuery> {
        let is_native = classification == MetricKind::NativeHistogramCandidate;
        vec![ResolvedQuery {
            ref_id: format!("{}-heatmap", spec.metric),
            expr: histogram_expr(spec, is_native),
            // Native histograms carry no le label to template on.
            legend_format: if is_native {
                None
            } else {
                Some("{{le}}".to_string())
            },
            format: Some(ResultFormat::Heatmap),
        }]
    }

    fn assemble_percentiles(
        &self,
        spec: &QuerySpec,
        classification: MetricKind,
    ) -> Vec<ResolvedQuery> {
        let (base, function) = if classification.is_histogram() {
            let is_native = classification == MetricKind::NativeHistogramCandidate;
            (histogram_expr(spec, is_native), AggregateOp::HistogramQuantile)
        } else {
            (base_expr(spec), AggregateOp::Quantile)
        };

        let def = QueryDef::aggregate(function);
        expand(&spec.metric, &spec.groupings, &base, &[def], false)
    }

    fn assemble_status(&self, spec: &QuerySpec) -> Vec<ResolvedQuery> {
        vec![ResolvedQuery {
            ref_id: format!("{}-min", spec.metric),
            expr: status_expr(spec),
            legend_format: Some("min".to_string()),
            format: None,
        }]
    }
}
