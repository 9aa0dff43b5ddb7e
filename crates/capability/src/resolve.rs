use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use hostcap_version::CapabilityVersion;

use crate::error::{FactoryPanic, SelectionError};
use crate::factory::FactoryMap;
use crate::matching::{AvailableVersions, MatchStrategy};

/// Picks the compatible version for `host` and invokes only its factory.
///
/// Returns the selected version alongside the instance.
pub(crate) fn resolve_with<T>(factories: &FactoryMap<T>, host: CapabilityVersion, strategy: &dyn MatchStrategy) -> Result<(CapabilityVersion, T), SelectionError> {
	let available: Vec<CapabilityVersion> = factories.keys().copied().collect();

	let Some(selected) = strategy.choose(&available, host).filter(|v| *v <= host) else {
		return Err(SelectionError::NoCompatiblePort {
			host,
			available: AvailableVersions::new(available),
		});
	};

	let Some(factory) = factories.get(&selected) else {
		return Err(SelectionError::FactoryMissing { version: selected });
	};

	match catch_unwind(AssertUnwindSafe(|| factory())) {
		Ok(Ok(instance)) => Ok((selected, instance)),
		Ok(Err(cause)) => Err(SelectionError::Instantiation {
			version: selected,
			cause: Arc::from(cause),
		}),
		Err(payload) => Err(SelectionError::Instantiation {
			version: selected,
			cause: Arc::new(FactoryPanic::from_payload(payload)),
		}),
	}
}
