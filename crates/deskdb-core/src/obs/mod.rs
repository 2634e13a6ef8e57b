//! Observability: runtime counters and the sink boundary that feeds them.
//!
//! Query and load code only emit `MetricsEvent`s through `sink::record`;
//! nothing outside this module touches counter state.

pub mod metrics;
pub(crate) mod sink;

// re-exports
pub use metrics::{EntityCounters, EventOps, EventState};
pub use sink::{MetricsEvent, MetricsSink, PlanKind, with_metrics_sink};
