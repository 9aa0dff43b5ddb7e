//! Selection counters.

use hostcap_capability::CapabilityVersion;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;

/// Receives one call per selection outcome.
pub trait MetricsSink: Send + Sync {
	fn record_success(&self, selected: CapabilityVersion);

	/// `host` is `None` when the host version could not be determined.
	fn record_failure(&self, host: Option<CapabilityVersion>);
}

#[derive(Debug, Default)]
struct Counters {
	successes: FxHashMap<CapabilityVersion, u64>,
	failures: FxHashMap<CapabilityVersion, u64>,
	undetected: u64,
}

/// In-memory [`MetricsSink`] keyed by version.
#[derive(Debug, Default)]
pub struct SelectionMetrics {
	counters: Mutex<Counters>,
}

/// Point-in-time copy of [`SelectionMetrics`], sorted by version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
	/// Successful selections per selected version.
	pub successes: Vec<(CapabilityVersion, u64)>,
	/// Failed selections per host version.
	pub failures: Vec<(CapabilityVersion, u64)>,
	/// Failures where detection itself failed.
	pub undetected_failures: u64,
}

impl MetricsSnapshot {
	pub fn total_successes(&self) -> u64 {
		self.successes.iter().map(|(_, n)| n).sum()
	}

	pub fn total_failures(&self) -> u64 {
		self.failures.iter().map(|(_, n)| n).sum::<u64>() + self.undetected_failures
	}
}

impl SelectionMetrics {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn snapshot(&self) -> MetricsSnapshot {
		let counters = self.counters.lock();
		MetricsSnapshot {
			successes: sorted(&counters.successes),
			failures: sorted(&counters.failures),
			undetected_failures: counters.undetected,
		}
	}

	pub fn reset(&self) {
		*self.counters.lock() = Counters::default();
	}
}

impl MetricsSink for SelectionMetrics {
	fn record_success(&self, selected: CapabilityVersion) {
		*self.counters.lock().successes.entry(selected).or_default() += 1;
	}

	fn record_failure(&self, host: Option<CapabilityVersion>) {
		let mut counters = self.counters.lock();
		match host {
			Some(host) => *counters.failures.entry(host).or_default() += 1,
			None => counters.undetected += 1,
		}
	}
}

fn sorted(map: &FxHashMap<CapabilityVersion, u64>) -> Vec<(CapabilityVersion, u64)> {
	let mut entries: Vec<_> = map.iter().map(|(v, n)| (*v, *n)).collect();
	entries.sort_unstable_by_key(|(v, _)| *v);
	entries
}
