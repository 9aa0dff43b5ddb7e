use parking_lot::RwLock;

use crate::{CapabilityVersion, VersionError};

type Detection = Result<CapabilityVersion, VersionError>;

/// Memoized host version detection result.
///
/// Populated at most once: the first caller computes under the write lock and
/// publishes, concurrent first callers block on that lock and then observe the
/// published value. Failures are cached exactly like successes.
#[derive(Debug, Default)]
pub struct VersionCache {
	slot: RwLock<Option<Detection>>,
}

impl VersionCache {
	/// Creates an empty cache.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the cached result, running `detect` only if the cache is empty.
	pub fn get_or_detect(&self, detect: impl FnOnce() -> Detection) -> Detection {
		if let Some(cached) = self.slot.read().as_ref() {
			return cached.clone();
		}

		let mut slot = self.slot.write();
		if let Some(cached) = slot.as_ref() {
			return cached.clone();
		}

		let detected = detect();
		*slot = Some(detected.clone());
		detected
	}

	/// Returns the cached result without triggering detection.
	pub fn peek(&self) -> Option<Detection> {
		self.slot.read().clone()
	}

	/// Returns whether a result has been published.
	pub fn is_populated(&self) -> bool {
		self.slot.read().is_some()
	}

	/// Drops the cached result so the next access detects again.
	#[cfg(any(test, feature = "test-support"))]
	pub fn reset(&self) {
		*self.slot.write() = None;
	}
}
