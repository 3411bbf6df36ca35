//! # sitewright-metrics
//!
//! Run metrics collection and reporting for Sitewright.
//!
//! The collector accumulates per-component records during a run and folds
//! them into [`RunMetrics`] and a terminal [`RunSummary`]. Records and the
//! summary are also forwarded to an append-only [`MetricsSink`] keyed by the
//! run id.

mod collector;
mod sink;

pub use collector::{ComponentRecord, MetricsCollector, RunMetrics, RunSummary};
pub use sink::{MemorySink, MetricsSink, SinkEvent, TracingSink};
