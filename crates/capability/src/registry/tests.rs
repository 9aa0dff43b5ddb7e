use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;

use super::*;

fn v(raw: u32) -> CapabilityVersion {
	CapabilityVersion::of(raw)
}

fn registry_with(versions: &[u32]) -> Registry<String> {
	let registry = Registry::new();
	for &raw in versions {
		registry.register(v(raw), move || format!("port-{raw}")).unwrap();
	}
	registry
}

#[test]
fn register_stores_factory() {
	let registry = Registry::<String>::new();
	assert!(registry.register(v(13), || "port-instance".to_owned()).is_ok());
	assert!(registry.has_version(v(13)));
	assert_eq!(registry.len(), 1);
}

#[test]
fn duplicate_registration_is_rejected_and_first_kept() {
	let registry = Registry::<String>::new();
	registry.register(v(13), || "port-1".to_owned()).unwrap();

	let err = registry.register(v(13), || "port-2".to_owned()).unwrap_err();

	assert_eq!(err, RegistryError::DuplicateRegistration { version: v(13) });
	assert!(err.to_string().contains("already registered"));
	assert_eq!(registry.available_versions(), vec![v(13)]);
	assert_eq!(registry.resolve(v(13)).unwrap(), "port-1");
}

#[test]
fn available_versions_are_ascending() {
	let registry = registry_with(&[15, 13, 14]);
	assert_eq!(registry.available_versions(), vec![v(13), v(14), v(15)]);
	assert!(Registry::<String>::new().available_versions().is_empty());
}

#[test]
fn highest_version() {
	assert_eq!(registry_with(&[13, 15, 14]).highest_version(), Some(v(15)));
	assert_eq!(Registry::<String>::new().highest_version(), None);
}

#[test]
fn has_version_only_for_registered() {
	let registry = registry_with(&[13]);
	assert!(registry.has_version(v(13)));
	assert!(!registry.has_version(v(14)));
}

#[test]
fn factories_snapshot_is_independent_and_lazy() {
	let calls = Arc::new(AtomicUsize::new(0));
	let registry = Registry::<u32>::new();
	let counter = calls.clone();
	registry
		.register(v(13), move || {
			counter.fetch_add(1, Ordering::SeqCst);
			13
		})
		.unwrap();

	let snapshot = registry.factories();
	registry.register(v(14), || 14).unwrap();

	assert_eq!(snapshot.keys().copied().collect::<Vec<_>>(), vec![v(13)]);
	assert_eq!(registry.len(), 2);
	assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn resolve_exact_match() {
	assert_eq!(registry_with(&[13, 14]).resolve(v(13)).unwrap(), "port-13");
}

#[test]
fn resolve_highest_compatible() {
	assert_eq!(registry_with(&[13, 14]).resolve(v(15)).unwrap(), "port-14");
}

#[test]
fn resolve_without_compatible_version() {
	let err = registry_with(&[14, 15]).resolve(v(13)).unwrap_err();
	let msg = err.to_string();
	assert!(matches!(err, SelectionError::NoCompatiblePort { .. }));
	assert!(msg.contains("No compatible port"));
	assert!(msg.contains("13"));
	assert!(msg.contains("14, 15"));
}

#[test]
fn resolve_on_empty_registry_reports_none() {
	let err = Registry::<String>::new().resolve(v(13)).unwrap_err();
	assert!(err.to_string().contains("none"));
}

#[test]
fn resolve_invokes_factory_each_time() {
	let calls = Arc::new(AtomicUsize::new(0));
	let registry = Registry::<usize>::new();
	let counter = calls.clone();
	registry.register(v(13), move || counter.fetch_add(1, Ordering::SeqCst)).unwrap();

	let first = registry.resolve(v(13)).unwrap();
	let second = registry.resolve(v(13)).unwrap();

	assert_ne!(first, second);
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

struct Journal;

impl VersionPack<String> for Journal {
	fn install(&self, registry: &Registry<String>) -> Result<(), RegistryError> {
		registry.register(v(13), || "journal-13".to_owned())?;
		registry.register(v(14), || "journal-14".to_owned())
	}
}

#[test]
fn install_runs_version_pack() {
	let registry = Registry::named("journal");
	registry.install(&Journal).unwrap();

	assert_eq!(registry.label(), Some("journal"));
	assert_eq!(registry.available_versions(), vec![v(13), v(14)]);
	assert_eq!(registry.install(&Journal), Err(RegistryError::DuplicateRegistration { version: v(13) }));
}

#[test]
fn concurrent_registration_loses_no_updates() {
	let registry = Registry::<u32>::new();

	std::thread::scope(|scope| {
		for raw in 1..=32u32 {
			let registry = &registry;
			scope.spawn(move || registry.register(v(raw), move || raw).unwrap());
		}
	});

	assert_eq!(registry.len(), 32);
	assert_eq!(registry.highest_version(), Some(v(32)));
}
