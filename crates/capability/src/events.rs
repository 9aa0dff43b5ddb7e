//! Selection outcome events.
//!
//! The selector only ever talks to a [`SelectionEmitter`]. [`EventEmitter`]
//! fans outcomes out to registered callbacks; [`NoopEmitter`] discards them
//! when observability is disabled.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use arc_swap::ArcSwap;
use hostcap_version::CapabilityVersion;

use crate::error::{SelectionError, panic_message};
use crate::matching::AvailableVersions;

/// Result of one selection call.
#[derive(Debug, Clone)]
pub enum SelectionOutcome {
	Success {
		selected_version: CapabilityVersion,
		host_version: CapabilityVersion,
		duration: Duration,
		adapter_name: Option<String>,
	},
	Failure {
		/// Absent only when the host version itself could not be determined.
		host_version: Option<CapabilityVersion>,
		available_versions: AvailableVersions,
		adapter_name: Option<String>,
		error: SelectionError,
	},
}

impl SelectionOutcome {
	/// `"success"` or `"failure"`.
	pub fn kind(&self) -> &'static str {
		match self {
			Self::Success { .. } => "success",
			Self::Failure { .. } => "failure",
		}
	}

	pub fn is_success(&self) -> bool {
		matches!(self, Self::Success { .. })
	}

	pub fn adapter_name(&self) -> Option<&str> {
		match self {
			Self::Success { adapter_name, .. } | Self::Failure { adapter_name, .. } => adapter_name.as_deref(),
		}
	}

	pub fn host_version(&self) -> Option<CapabilityVersion> {
		match self {
			Self::Success { host_version, .. } => Some(*host_version),
			Self::Failure { host_version, .. } => *host_version,
		}
	}
}

/// Sink for selection outcomes.
pub trait SelectionEmitter: Send + Sync {
	fn emit(&self, outcome: &SelectionOutcome);
}

/// Emitter that drops every outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl SelectionEmitter for NoopEmitter {
	fn emit(&self, _outcome: &SelectionOutcome) {}
}

type Callback = Arc<dyn Fn(&SelectionOutcome) + Send + Sync>;

#[derive(Clone)]
struct Subscriber {
	id: u64,
	callback: Callback,
}

#[derive(Default)]
struct Subscribers {
	list: ArcSwap<Vec<Subscriber>>,
	next_id: AtomicU64,
}

impl Subscribers {
	fn remove(&self, id: u64) {
		self.list.rcu(|cur| cur.iter().filter(|s| s.id != id).cloned().collect::<Vec<_>>());
	}
}

/// Publish/subscribe fan-out for selection outcomes.
///
/// Cloning yields another handle to the same subscriber list. Delivery runs
/// on a snapshot of the list, so callbacks may subscribe or unsubscribe while
/// an outcome is being delivered; the change applies to the next emit.
#[derive(Clone, Default)]
pub struct EventEmitter {
	inner: Arc<Subscribers>,
}

impl EventEmitter {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `callback` for every subsequent outcome.
	pub fn subscribe<F>(&self, callback: F) -> Subscription
	where
		F: Fn(&SelectionOutcome) + Send + Sync + 'static,
	{
		let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
		let subscriber = Subscriber {
			id,
			callback: Arc::new(callback),
		};
		self.inner.list.rcu(|cur| {
			let mut next = Vec::clone(cur);
			next.push(subscriber.clone());
			next
		});

		Subscription {
			id,
			subscribers: Arc::downgrade(&self.inner),
		}
	}

	/// Removes every subscriber.
	pub fn clear(&self) {
		self.inner.list.store(Arc::new(Vec::new()));
	}

	pub fn subscriber_count(&self) -> usize {
		self.inner.list.load().len()
	}
}

impl SelectionEmitter for EventEmitter {
	fn emit(&self, outcome: &SelectionOutcome) {
		let subscribers = self.inner.list.load_full();
		for subscriber in subscribers.iter() {
			if let Err(payload) = catch_unwind(AssertUnwindSafe(|| (subscriber.callback)(outcome))) {
				tracing::error!(
					domain = "events",
					subscriber = subscriber.id,
					kind = outcome.kind(),
					panic = %panic_message(payload.as_ref()),
					"selection event subscriber panicked",
				);
			}
		}
	}
}

impl std::fmt::Debug for EventEmitter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventEmitter").field("subscribers", &self.subscriber_count()).finish()
	}
}

/// Handle returned by [`EventEmitter::subscribe`].
///
/// Dropping it keeps the subscription alive; call [`Subscription::unsubscribe`]
/// to detach.
#[derive(Debug, Clone)]
pub struct Subscription {
	id: u64,
	subscribers: Weak<Subscribers>,
}

impl Subscription {
	/// Detaches the callback. Repeated calls are no-ops.
	pub fn unsubscribe(&self) {
		if let Some(subscribers) = self.subscribers.upgrade() {
			subscribers.remove(self.id);
		}
	}
}
