//! Observability: runtime counters and sink abstractions.
//!
//! This module never touches records or connections directly.

pub(crate) mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EventOps, EventReport, EventState, RootCounters, RootSummary};
pub use sink::{
    MetricsEvent, MetricsSink, SkipKind, metrics_report, metrics_reset_all, with_metrics_sink,
};
