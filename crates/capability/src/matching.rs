use std::fmt;

use hostcap_version::CapabilityVersion;

/// Chooses which registered version serves a host version.
///
/// Implementations receive the registered versions in ascending order. A
/// proposal above `host` is discarded by the caller, so strategies only decide
/// among compatible versions.
pub trait MatchStrategy: Send + Sync {
	fn choose(&self, available: &[CapabilityVersion], host: CapabilityVersion) -> Option<CapabilityVersion>;
}

/// Highest version not exceeding the host version.
///
/// Never nearest-by-distance: host 14 with `[13, 15]` selects 13.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyMatch;

impl MatchStrategy for GreedyMatch {
	fn choose(&self, available: &[CapabilityVersion], host: CapabilityVersion) -> Option<CapabilityVersion> {
		let end = available.partition_point(|v| *v <= host);
		end.checked_sub(1).map(|i| available[i])
	}
}

/// Registered versions in ascending order, rendered as `"13, 14, 15"` or `"none"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AvailableVersions(Vec<CapabilityVersion>);

impl AvailableVersions {
	/// Sorts and deduplicates `versions`.
	pub fn new(versions: impl IntoIterator<Item = CapabilityVersion>) -> Self {
		let mut versions: Vec<_> = versions.into_iter().collect();
		versions.sort_unstable();
		versions.dedup();
		Self(versions)
	}

	pub fn as_slice(&self) -> &[CapabilityVersion] {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl fmt::Display for AvailableVersions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.0.is_empty() {
			return f.write_str("none");
		}
		for (i, v) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{v}")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests;
