//! Observability for capability selection.
//!
//! The selector emits [`SelectionOutcome`]s and knows nothing about logs or
//! counters. This crate provides the subscriber side:
//! - [`SelectionObserver`]: Maps outcomes to `tracing` events and metrics
//! - [`SelectionMetrics`]: In-memory [`MetricsSink`] with per-version counters
//! - [`logging::init`]: `tracing-subscriber` setup for binaries and tests
//!
//! [`SelectionOutcome`]: hostcap_capability::SelectionOutcome

pub mod logging;
mod metrics;
mod observer;

pub use metrics::{MetricsSink, MetricsSnapshot, SelectionMetrics};
pub use observer::SelectionObserver;
