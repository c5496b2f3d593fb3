//! Query synthesis: aggregation policy, fan-out, and assembly
//!
//! Control flow per panel:
//!
//! ```text
//! QuerySpec
//!     │
//!     ▼
//! ┌──────────────┐
//! │  Classify    │  name heuristics + native-histogram hint
//! └──────────────┘
//!     │
//!     ▼
//! ┌──────────────┐
//! │  Policy      │  finite guard → rate wrap → outer aggregation
//! └──────────────┘
//!     │
//!     ▼
//! ┌──────────────┐
//! │  Expand      │  percentile / multi-function fan-out, refIds
//! └──────────────┘
//!     │
//!     ▼
//! ┌──────────────┐
//! │  Assemble    │  sample budget, result format, ordering
//! └──────────────┘
//! ```

pub mod assemble;
pub mod expand;
pub mod policy;

// Re-export main types
pub use assemble::{sample_budget, QueryAssembler};
pub use expand::{default_aggregate_def, expand, DEFAULT_PERCENTILES};
pub use policy::{
    aggregate_over, aggregated_expr, base_expr, finite_guard, guarded_selector, histogram_expr,
    rate_wrap, status_expr, RATE_INTERVAL,
};
