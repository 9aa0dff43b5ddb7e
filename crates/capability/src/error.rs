use std::any::Any;
use std::sync::Arc;

use hostcap_version::{CapabilityVersion, VersionError};
use thiserror::Error;

use crate::matching::AvailableVersions;

/// Registration failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// A factory already exists for this version; the registry is unchanged.
	#[error("Port for version {version} already registered")]
	DuplicateRegistration { version: CapabilityVersion },
}

/// Selection failures.
///
/// Cloneable so the same error can be returned to the caller and carried by
/// the failure event.
#[derive(Debug, Clone, Error)]
pub enum SelectionError {
	/// The host version could not be determined.
	#[error("Could not determine host version: {0}")]
	VersionDetection(#[from] VersionError),

	/// No registered version is at or below the host version.
	#[error("No compatible port found for host version {host} (available: {available})")]
	NoCompatiblePort {
		host: CapabilityVersion,
		available: AvailableVersions,
	},

	/// The chosen version has no factory in the map.
	#[error("Factory for version {version} not found")]
	FactoryMissing { version: CapabilityVersion },

	/// The chosen factory failed while constructing the instance.
	#[error("Failed to instantiate port v{version}: {cause}")]
	Instantiation {
		version: CapabilityVersion,
		#[source]
		cause: Arc<dyn std::error::Error + Send + Sync>,
	},
}

impl SelectionError {
	/// Stable identifier for logs and metrics labels.
	pub fn code(&self) -> &'static str {
		match self {
			Self::VersionDetection(_) => "version_detection",
			Self::NoCompatiblePort { .. } => "no_compatible_port",
			Self::FactoryMissing { .. } => "factory_missing",
			Self::Instantiation { .. } => "instantiation_failure",
		}
	}
}

/// A factory panicked instead of returning.
#[derive(Debug, Clone, Error)]
#[error("factory panicked: {message}")]
pub struct FactoryPanic {
	pub message: String,
}

impl FactoryPanic {
	pub(crate) fn from_payload(payload: Box<dyn Any + Send>) -> Self {
		Self {
			message: panic_message(payload.as_ref()),
		}
	}
}

/// Extracts the message from a `catch_unwind` payload.
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&'static str>() {
		(*s).to_owned()
	} else if let Some(s) = payload.downcast_ref::<String>() {
		s.clone()
	} else {
		"non-string panic payload".to_owned()
	}
}
