use std::sync::Arc;

use hostcap_capability::{EventEmitter, SelectionEmitter, SelectionOutcome, Subscription};

use crate::metrics::MetricsSink;

/// Turns selection outcomes into log records and metric updates.
///
/// Successes log at `debug`, failures at `error` with the full context the
/// selector attached.
#[derive(Debug)]
pub struct SelectionObserver<M> {
	metrics: Arc<M>,
}

impl<M: MetricsSink> SelectionObserver<M> {
	pub fn new(metrics: Arc<M>) -> Self {
		Self { metrics }
	}

	pub fn metrics(&self) -> &Arc<M> {
		&self.metrics
	}

	pub fn handle(&self, outcome: &SelectionOutcome) {
		match outcome {
			SelectionOutcome::Success {
				selected_version,
				host_version,
				duration,
				adapter_name,
			} => {
				tracing::debug!(
					domain = "selection",
					%selected_version,
					%host_version,
					duration_ms = duration.as_secs_f64() * 1000.0,
					adapter = adapter_name.as_deref().unwrap_or("unnamed"),
					"port selected"
				);
				self.metrics.record_success(*selected_version);
			}
			SelectionOutcome::Failure {
				host_version,
				available_versions,
				adapter_name,
				error,
			} => {
				tracing::error!(
					domain = "selection",
					host_version = ?host_version.map(|v| v.get()),
					%available_versions,
					adapter = adapter_name.as_deref().unwrap_or("unnamed"),
					code = error.code(),
					%error,
					"port selection failed"
				);
				self.metrics.record_failure(*host_version);
			}
		}
	}
}

impl<M: MetricsSink + 'static> SelectionObserver<M> {
	/// Subscribes this observer to `events`. The observer stays alive as long
	/// as the subscription is registered.
	pub fn attach(self: Arc<Self>, events: &EventEmitter) -> Subscription {
		events.subscribe(move |outcome| self.handle(outcome))
	}
}

impl<M: MetricsSink> SelectionEmitter for SelectionObserver<M> {
	fn emit(&self, outcome: &SelectionOutcome) {
		self.handle(outcome);
	}
}
