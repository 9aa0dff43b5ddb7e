use thiserror::Error;

/// Reasons the host version could not be determined.
///
/// Cloneable so a memoized failure can be handed out on every cached access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
	/// The host object itself is absent.
	#[error("host object is not available")]
	HostUnavailable,
	/// The host is present but exposes no version string.
	#[error("host version is not available")]
	VersionUnavailable,
	/// The version string has no positive leading integer.
	#[error("could not parse host version from: {raw:?}")]
	VersionUnparsable { raw: String },
}
