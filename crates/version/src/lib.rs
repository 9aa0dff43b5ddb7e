//! Host version detection.
//!
//! This crate provides the leaf types of the capability resolution stack:
//! - [`CapabilityVersion`]: Positive, totally ordered major version
//! - [`HostVersionSource`]: The single narrow interface to the host platform
//! - [`VersionDetector`]: Parses the host's version string into a [`CapabilityVersion`]
//! - [`VersionCache`]: Injectable compute-once cache for detection results
//! - [`VersionError`]: Detection failure taxonomy

use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

mod cache;
mod detector;
mod error;
mod source;

pub use cache::VersionCache;
pub use detector::{VersionDetector, parse_major};
pub use error::VersionError;
pub use source::{FixedHostVersion, HostVersionSource};

/// Major version of the host platform, or the host version an implementation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct CapabilityVersion(NonZeroU32);

impl CapabilityVersion {
	/// Creates a version, returning `None` for zero.
	#[inline]
	pub const fn new(raw: u32) -> Option<Self> {
		match NonZeroU32::new(raw) {
			Some(v) => Some(Self(v)),
			None => None,
		}
	}

	/// Creates a version from a literal.
	///
	/// # Panics
	///
	/// Panics if `raw` is zero. Intended for constants and tests; use
	/// [`CapabilityVersion::new`] for untrusted input.
	#[inline]
	pub const fn of(raw: u32) -> Self {
		match NonZeroU32::new(raw) {
			Some(v) => Self(v),
			None => panic!("capability version must be positive"),
		}
	}

	/// Returns the underlying integer.
	#[inline]
	pub const fn get(self) -> u32 {
		self.0.get()
	}
}

impl fmt::Display for CapabilityVersion {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Rejection returned when converting zero into a [`CapabilityVersion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("capability version must be a positive integer")]
pub struct ZeroVersion;

impl TryFrom<u32> for CapabilityVersion {
	type Error = ZeroVersion;

	fn try_from(raw: u32) -> Result<Self, Self::Error> {
		Self::new(raw).ok_or(ZeroVersion)
	}
}

impl From<CapabilityVersion> for u32 {
	fn from(v: CapabilityVersion) -> Self {
		v.get()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn orders_numerically() {
		let mut versions = vec![CapabilityVersion::of(15), CapabilityVersion::of(9), CapabilityVersion::of(13)];
		versions.sort();
		assert_eq!(versions.iter().map(|v| v.get()).collect::<Vec<_>>(), vec![9, 13, 15]);
	}

	#[test]
	fn rejects_zero() {
		assert_eq!(CapabilityVersion::new(0), None);
		assert_eq!(CapabilityVersion::try_from(0), Err(ZeroVersion));
	}

	#[test]
	fn deserializes_from_integer() {
		#[derive(Deserialize)]
		struct Doc {
			v: CapabilityVersion,
		}

		let doc: Doc = toml::from_str("v = 14").unwrap();
		assert_eq!(doc.v, CapabilityVersion::of(14));
		assert!(toml::from_str::<Doc>("v = 0").is_err());
	}
}
