use std::collections::BTreeMap;
use std::sync::Arc;

use hostcap_version::CapabilityVersion;

/// Error a fallible factory may return.
pub type FactoryError = Box<dyn std::error::Error + Send + Sync>;

/// Zero-argument constructor for one capability implementation.
///
/// Not assumed idempotent: every call produces an independent instance.
pub type Factory<T> = Arc<dyn Fn() -> Result<T, FactoryError> + Send + Sync>;

/// Factories keyed by the host version they target, in ascending order.
pub type FactoryMap<T> = BTreeMap<CapabilityVersion, Factory<T>>;

/// Wraps an infallible constructor.
pub fn factory<T, F>(ctor: F) -> Factory<T>
where
	F: Fn() -> T + Send + Sync + 'static,
	T: 'static,
{
	Arc::new(move || Ok(ctor()))
}

/// Wraps a constructor that reports failure through its return value.
pub fn fallible_factory<T, F>(ctor: F) -> Factory<T>
where
	F: Fn() -> Result<T, FactoryError> + Send + Sync + 'static,
	T: 'static,
{
	Arc::new(ctor)
}
