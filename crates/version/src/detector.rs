use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{CapabilityVersion, HostVersionSource, VersionCache, VersionError};

static LEADING_DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+").expect("static pattern"));

/// Extracts the major version from a `<major>(.<minor>(.<patch>)?)?` string.
///
/// Only the leading run of digits matters; anything after it is ignored. A
/// missing run, a run that overflows `u32`, or a zero major version is
/// rejected as unparsable.
pub fn parse_major(raw: &str) -> Result<CapabilityVersion, VersionError> {
	LEADING_DIGITS
		.find(raw)
		.and_then(|m| m.as_str().parse::<u32>().ok())
		.and_then(CapabilityVersion::new)
		.ok_or_else(|| VersionError::VersionUnparsable { raw: raw.to_owned() })
}

/// Determines the host's major version.
///
/// Cloning a detector shares its source and cache.
#[derive(Clone)]
pub struct VersionDetector {
	source: Arc<dyn HostVersionSource>,
	cache: Arc<VersionCache>,
}

impl VersionDetector {
	/// Creates a detector with its own empty cache.
	pub fn new(source: impl HostVersionSource + 'static) -> Self {
		Self::with_cache(Arc::new(source), Arc::new(VersionCache::new()))
	}

	/// Creates a detector publishing into a shared cache.
	pub fn with_cache(source: Arc<dyn HostVersionSource>, cache: Arc<VersionCache>) -> Self {
		Self { source, cache }
	}

	/// Returns the cache this detector publishes into.
	pub fn cache(&self) -> &Arc<VersionCache> {
		&self.cache
	}

	/// Reads and parses the host version, bypassing the cache.
	pub fn detect(&self) -> Result<CapabilityVersion, VersionError> {
		if !self.source.is_available() {
			return Err(VersionError::HostUnavailable);
		}

		let raw = self.source.read_version_string().filter(|s| !s.is_empty()).ok_or(VersionError::VersionUnavailable)?;

		parse_major(&raw)
	}

	/// Returns the memoized detection result, detecting on first access.
	pub fn detect_cached(&self) -> Result<CapabilityVersion, VersionError> {
		self.cache.get_or_detect(|| {
			let detected = self.detect();
			match &detected {
				Ok(version) => tracing::debug!(domain = "version", %version, "host version detected"),
				Err(error) => tracing::warn!(domain = "version", %error, "host version detection failed"),
			}
			detected
		})
	}

	/// Cached detection with the error discarded.
	pub fn try_detect(&self) -> Option<CapabilityVersion> {
		self.detect_cached().ok()
	}

	/// Forgets the memoized result.
	#[cfg(any(test, feature = "test-support"))]
	pub fn reset_cache(&self) {
		self.cache.reset();
	}
}

impl std::fmt::Debug for VersionDetector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("VersionDetector").field("cache", &self.cache).finish_non_exhaustive()
	}
}
