//! Version-compatible capability resolution.
//!
//! A capability (port) has one implementation per host version it was built
//! against. A [`Registry`] collects those implementations as lazy factories;
//! a [`Selector`] picks the highest version that does not exceed the host
//! version and constructs only that one.
//!
//! # Invariants
//!
//! - At most one factory per version in a registry.
//!   - Enforced in: [`Registry::register_factory`] (CAS publication).
//! - A factory above the host version is never invoked.
//!   - Enforced in: `resolve::resolve_with`, independent of the [`MatchStrategy`].
//! - At most one factory is invoked per selection.
//! - Factory failures (errors and panics) become [`SelectionError::Instantiation`].
//!
//! # Observability
//!
//! The selector reports every outcome through a [`SelectionEmitter`]. It never
//! logs or counts on its own; subscribers attached to an [`EventEmitter`] do.

pub mod config;
mod error;
pub mod events;
mod factory;
mod matching;
mod registry;
mod resolve;
mod selector;

pub use config::{ConfigError, SelectorConfig};
pub use error::{FactoryPanic, RegistryError, SelectionError};
pub use events::{EventEmitter, NoopEmitter, SelectionEmitter, SelectionOutcome, Subscription};
pub use factory::{Factory, FactoryError, FactoryMap, fallible_factory, factory};
pub use hostcap_version::{CapabilityVersion, VersionDetector, VersionError};
pub use matching::{AvailableVersions, GreedyMatch, MatchStrategy};
pub use registry::{Registry, VersionPack};
pub use selector::Selector;
