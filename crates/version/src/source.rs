/// Read access to the host platform's version identifier.
///
/// All ambient host access lives behind this trait. Implementations must be
/// pure: repeated reads return the same value for the lifetime of the process.
pub trait HostVersionSource: Send + Sync {
	/// Returns whether the host object exists at all.
	fn is_available(&self) -> bool {
		true
	}

	/// Returns the raw version string, e.g. `"13.348.2"`.
	fn read_version_string(&self) -> Option<String>;
}

/// In-memory host with a fixed version string.
#[derive(Debug, Clone, Default)]
pub struct FixedHostVersion {
	available: bool,
	version: Option<String>,
}

impl FixedHostVersion {
	/// A present host reporting `version`.
	pub fn new(version: impl Into<String>) -> Self {
		Self {
			available: true,
			version: Some(version.into()),
		}
	}

	/// A present host without a version field.
	pub fn without_version() -> Self {
		Self {
			available: true,
			version: None,
		}
	}

	/// No host object.
	pub fn absent() -> Self {
		Self::default()
	}
}

impl HostVersionSource for FixedHostVersion {
	fn is_available(&self) -> bool {
		self.available
	}

	fn read_version_string(&self) -> Option<String> {
		self.version.clone()
	}
}
