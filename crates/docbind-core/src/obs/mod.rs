//! Observability for the registry. Instrumentation flows through
//! [`MetaEvent`]s recorded against a [`MetaSink`]; the default sink
//! keeps per-thread counters that [`event_report`] snapshots.

pub(crate) mod metrics;
pub(crate) mod sink;

pub use metrics::{ClassCounters, EventReport, OpsCounters};
pub use sink::{MetaEvent, MetaSink, event_report, event_reset_all, with_sink};
