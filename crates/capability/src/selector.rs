use std::sync::Arc;
use std::time::Instant;

use hostcap_version::{CapabilityVersion, VersionDetector, VersionError};

use crate::config::SelectorConfig;
use crate::error::SelectionError;
use crate::events::{EventEmitter, NoopEmitter, SelectionEmitter, SelectionOutcome, Subscription};
use crate::factory::FactoryMap;
use crate::matching::{AvailableVersions, GreedyMatch, MatchStrategy};
use crate::registry::Registry;
use crate::resolve::resolve_with;

/// Picks and constructs the implementation compatible with the host.
///
/// Holds only injected collaborators; selection itself mutates nothing, so a
/// selector may be shared freely and called concurrently.
///
/// # Examples
///
/// ```
/// use hostcap_capability::{CapabilityVersion, FactoryMap, Selector, factory};
///
/// let mut factories = FactoryMap::new();
/// factories.insert(CapabilityVersion::of(13), factory(|| "v13"));
/// factories.insert(CapabilityVersion::of(14), factory(|| "v14"));
///
/// let port = Selector::new().select(&factories, Some(CapabilityVersion::of(14)), None);
/// assert_eq!(port.unwrap(), "v14");
/// ```
#[derive(Clone)]
pub struct Selector {
	detector: Option<VersionDetector>,
	emitter: Arc<dyn SelectionEmitter>,
	events: Option<EventEmitter>,
	strategy: Arc<dyn MatchStrategy>,
	config: SelectorConfig,
}

impl Default for Selector {
	fn default() -> Self {
		Self {
			detector: None,
			emitter: Arc::new(NoopEmitter),
			events: None,
			strategy: Arc::new(GreedyMatch),
			config: SelectorConfig::default(),
		}
	}
}

impl Selector {
	/// Selector without detector or observability, using [`GreedyMatch`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Builds a selector from configuration. With observability disabled the
	/// emitter is kept but never called.
	pub fn from_config(config: SelectorConfig, detector: VersionDetector, emitter: EventEmitter) -> Self {
		Self::new().with_detector(detector).with_event_emitter(emitter).with_config(config)
	}

	pub fn with_detector(mut self, detector: VersionDetector) -> Self {
		self.detector = Some(detector);
		self
	}

	/// Reports outcomes to an arbitrary sink. Ignored while the config
	/// disables observability.
	pub fn with_emitter(mut self, emitter: Arc<dyn SelectionEmitter>) -> Self {
		self.emitter = emitter;
		self.events = None;
		self
	}

	/// Reports outcomes to `emitter` and enables [`Selector::on_event`].
	pub fn with_event_emitter(mut self, emitter: EventEmitter) -> Self {
		self.emitter = Arc::new(emitter.clone());
		self.events = Some(emitter);
		self
	}

	pub fn with_strategy(mut self, strategy: impl MatchStrategy + 'static) -> Self {
		self.strategy = Arc::new(strategy);
		self
	}

	/// Replaces the configuration. `observability = false` silences the
	/// emitter regardless of builder order.
	pub fn with_config(mut self, config: SelectorConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &SelectorConfig {
		&self.config
	}

	/// Subscribes to outcomes. Returns `None` unless the selector reports to an
	/// [`EventEmitter`] with observability enabled.
	pub fn on_event<F>(&self, callback: F) -> Option<Subscription>
	where
		F: Fn(&SelectionOutcome) + Send + Sync + 'static,
	{
		if !self.config.observability {
			return None;
		}
		self.events.as_ref().map(|events| events.subscribe(callback))
	}

	fn emitter(&self) -> &dyn SelectionEmitter {
		if self.config.observability { self.emitter.as_ref() } else { &NoopEmitter }
	}

	/// Constructs the highest implementation in `factories` not newer than the
	/// host.
	///
	/// `host_version` overrides the configured pin, which overrides detection.
	/// `adapter_name` overrides the configured adapter name. Exactly one
	/// outcome is emitted per call; at most one factory is invoked.
	pub fn select<T>(&self, factories: &FactoryMap<T>, host_version: Option<CapabilityVersion>, adapter_name: Option<&str>) -> Result<T, SelectionError> {
		let started = Instant::now();
		let adapter_name = adapter_name.or(self.config.adapter_name.as_deref()).map(str::to_owned);

		let host = match host_version.or(self.config.host_version).map_or_else(|| self.detect(), Ok) {
			Ok(host) => host,
			Err(error) => {
				let error = SelectionError::from(error);
				self.emit_failure(None, factories, adapter_name, &error);
				return Err(error);
			}
		};

		match resolve_with(factories, host, self.strategy.as_ref()) {
			Ok((selected_version, instance)) => {
				self.emitter().emit(&SelectionOutcome::Success {
					selected_version,
					host_version: host,
					duration: started.elapsed(),
					adapter_name,
				});
				Ok(instance)
			}
			Err(error) => {
				self.emit_failure(Some(host), factories, adapter_name, &error);
				Err(error)
			}
		}
	}

	/// Selects from the current contents of `registry`, reporting its label as
	/// the adapter name.
	pub fn select_from<T: 'static>(&self, registry: &Registry<T>, host_version: Option<CapabilityVersion>) -> Result<T, SelectionError> {
		self.select(&registry.snapshot(), host_version, registry.label())
	}

	fn detect(&self) -> Result<CapabilityVersion, VersionError> {
		match &self.detector {
			Some(detector) => detector.detect_cached(),
			None => Err(VersionError::HostUnavailable),
		}
	}

	fn emit_failure<T>(&self, host_version: Option<CapabilityVersion>, factories: &FactoryMap<T>, adapter_name: Option<String>, error: &SelectionError) {
		self.emitter().emit(&SelectionOutcome::Failure {
			host_version,
			available_versions: AvailableVersions::new(factories.keys().copied()),
			adapter_name,
			error: error.clone(),
		});
	}
}

impl std::fmt::Debug for Selector {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Selector")
			.field("detector", &self.detector)
			.field("events", &self.events)
			.field("config", &self.config)
			.finish_non_exhaustive()
	}
}
