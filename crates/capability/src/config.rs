//! Selector configuration.
//!
//! ```toml
//! adapter-name = "journal"
//! host-version = 13
//! observability = true
//! ```

use hostcap_version::CapabilityVersion;
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when parsing selector configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("TOML parse error: {0}")]
	Parse(#[from] toml::de::Error),
}

/// Tunables for a [`Selector`](crate::Selector).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct SelectorConfig {
	/// Adapter label used when a selection call does not name one.
	pub adapter_name: Option<String>,
	/// Pins the host version, bypassing detection.
	pub host_version: Option<CapabilityVersion>,
	/// When false, outcomes go to the no-op emitter.
	pub observability: bool,
}

impl Default for SelectorConfig {
	fn default() -> Self {
		Self {
			adapter_name: None,
			host_version: None,
			observability: true,
		}
	}
}

impl SelectorConfig {
	/// Parses a TOML document; missing keys take their defaults.
	pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
		Ok(toml::from_str(src)?)
	}
}

#[cfg(test)]
mod tests;
