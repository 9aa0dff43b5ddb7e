//! Per-capability factory registry.
//!
//! # Concurrency
//!
//! - **Reads:** Wait-free (atomic load of the current factory snapshot).
//! - **Writes:** Lock-free CAS retry loop; a registration either publishes a
//!   new snapshot containing the entry or leaves the registry untouched.
//!
//! Registries are expected to be populated during bootstrap and read-only
//! afterwards, but concurrent registration is still linearizable.

use std::sync::Arc;

use arc_swap::ArcSwap;
use hostcap_version::CapabilityVersion;

use crate::error::{RegistryError, SelectionError};
use crate::factory::{Factory, FactoryError, FactoryMap, fallible_factory, factory};
use crate::matching::GreedyMatch;
use crate::resolve::resolve_with;

/// A bundle of factories registered together, typically one per host version.
pub trait VersionPack<T> {
	fn install(&self, registry: &Registry<T>) -> Result<(), RegistryError>;
}

/// Factories for one capability, keyed by target host version.
pub struct Registry<T> {
	label: Option<&'static str>,
	snap: ArcSwap<FactoryMap<T>>,
}

impl<T> Default for Registry<T> {
	fn default() -> Self {
		Self {
			label: None,
			snap: ArcSwap::from_pointee(FactoryMap::new()),
		}
	}
}

impl<T: 'static> Registry<T> {
	/// Creates an empty, unlabeled registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry whose label is reported as the adapter name.
	pub fn named(label: &'static str) -> Self {
		Self {
			label: Some(label),
			..Self::default()
		}
	}

	pub fn label(&self) -> Option<&'static str> {
		self.label
	}

	/// Registers an infallible constructor for `version`.
	pub fn register<F>(&self, version: CapabilityVersion, ctor: F) -> Result<(), RegistryError>
	where
		F: Fn() -> T + Send + Sync + 'static,
	{
		self.register_factory(version, factory(ctor))
	}

	/// Registers a constructor that may fail.
	pub fn register_fallible<F>(&self, version: CapabilityVersion, ctor: F) -> Result<(), RegistryError>
	where
		F: Fn() -> Result<T, FactoryError> + Send + Sync + 'static,
	{
		self.register_factory(version, fallible_factory(ctor))
	}

	/// Registers a prepared factory. Duplicates are rejected without side effects.
	pub fn register_factory(&self, version: CapabilityVersion, factory: Factory<T>) -> Result<(), RegistryError> {
		loop {
			let cur = self.snap.load_full();
			if cur.contains_key(&version) {
				tracing::debug!(domain = "registry", label = ?self.label, %version, "duplicate registration rejected");
				return Err(RegistryError::DuplicateRegistration { version });
			}

			let mut next = (*cur).clone();
			next.insert(version, factory.clone());

			let next_arc = Arc::new(next);
			let prev = self.snap.compare_and_swap(&cur, next_arc);
			if Arc::ptr_eq(&prev, &cur) {
				return Ok(());
			}
		}
	}

	/// Lets a version pack register its factories.
	pub fn install<P>(&self, pack: &P) -> Result<(), RegistryError>
	where
		P: VersionPack<T> + ?Sized,
	{
		pack.install(self)
	}

	/// Registered versions, ascending.
	pub fn available_versions(&self) -> Vec<CapabilityVersion> {
		self.snap.load().keys().copied().collect()
	}

	/// Independent copy of the factory map. No factory is invoked.
	pub fn factories(&self) -> FactoryMap<T> {
		(**self.snap.load()).clone()
	}

	pub(crate) fn snapshot(&self) -> Arc<FactoryMap<T>> {
		self.snap.load_full()
	}

	pub fn has_version(&self, version: CapabilityVersion) -> bool {
		self.snap.load().contains_key(&version)
	}

	pub fn highest_version(&self) -> Option<CapabilityVersion> {
		self.snap.load().keys().next_back().copied()
	}

	pub fn len(&self) -> usize {
		self.snap.load().len()
	}

	pub fn is_empty(&self) -> bool {
		self.snap.load().is_empty()
	}

	/// Constructs the highest compatible implementation for `host` without
	/// emitting selection events.
	pub fn resolve(&self, host: CapabilityVersion) -> Result<T, SelectionError> {
		resolve_with(&self.snapshot(), host, &GreedyMatch).map(|(_, instance)| instance)
	}
}

impl<T> std::fmt::Debug for Registry<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("label", &self.label)
			.field("versions", &self.snap.load().keys().collect::<Vec<_>>())
			.finish()
	}
}

#[cfg(test)]
mod tests;
