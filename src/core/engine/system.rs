//! Access engine construction and shared state

use super::provider::{IdentityProvider, StaticIdentityProvider};
use super::requirements::RequirementTable;
use crate::config::{AccessConfig, Config, UsageConfig};
use crate::core::capability::CapabilityMatrix;
use crate::core::plan::PlanHierarchy;
use crate::core::usage::{Clock, InMemoryUsageStore, SystemClock, UsageStore, UsageTracker};
use crate::utils::error::Result;
use arc_swap::ArcSwap;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Access decision engine.
///
/// Answers plan, role, feature and quota questions for an identity against
/// the current capability matrix. Decision methods never fail; denials are
/// expressed as [`Verdict`](super::Verdict)s.
pub struct AccessEngine {
    pub(super) config: AccessConfig,
    pub(super) matrix: ArcSwap<CapabilityMatrix>,
    pub(super) requirements: RequirementTable,
    pub(super) tracker: Arc<UsageTracker>,
    pub(super) identity_provider: Arc<dyn IdentityProvider>,
}

impl std::fmt::Debug for AccessEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessEngine")
            .field("config", &self.config)
            .field("matrix_version", &self.matrix.load().version())
            .field("requirements", &self.requirements.len())
            .field("tracker", &self.tracker)
            .finish()
    }
}

impl AccessEngine {
    /// Engine over the built-in matrix and requirements with default settings
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> AccessEngineBuilder {
        AccessEngineBuilder::default()
    }

    /// Engine configured from `config`, reading the matrix file when one is
    /// configured
    pub async fn from_config(config: &Config) -> Result<Self> {
        info!("Initializing access engine");

        let matrix = match &config.access.matrix_path {
            Some(path) => Arc::new(CapabilityMatrix::from_file(path).await?),
            None => CapabilityMatrix::builtin(),
        };

        let engine = Self::builder()
            .access_config(config.access.clone())
            .usage_config(config.usage.clone())
            .matrix(matrix)
            .requirements(RequirementTable::from(config.features.clone()))
            .build();

        info!(
            "Access engine initialized with matrix {}",
            engine.matrix.load().version()
        );
        Ok(engine)
    }

    /// Current capability matrix
    pub fn matrix(&self) -> Arc<CapabilityMatrix> {
        self.matrix.load_full()
    }

    /// Replace the capability matrix; checks already running keep the table
    /// they started with
    pub fn reload_matrix(&self, matrix: Arc<CapabilityMatrix>) {
        let previous = self.matrix.swap(matrix);
        info!(
            "Capability matrix reloaded: {} -> {}",
            previous.version(),
            self.matrix.load().version()
        );
    }

    /// Read a YAML matrix and swap it in; the current table stays on error
    pub async fn reload_matrix_from_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let matrix = CapabilityMatrix::from_file(path).await?;
        self.reload_matrix(Arc::new(matrix));
        Ok(())
    }

    pub fn hierarchy(&self) -> PlanHierarchy {
        self.config.hierarchy
    }

    pub fn requirements(&self) -> &RequirementTable {
        &self.requirements
    }

    pub fn tracker(&self) -> &Arc<UsageTracker> {
        &self.tracker
    }

    pub fn identity_provider(&self) -> &Arc<dyn IdentityProvider> {
        &self.identity_provider
    }
}

impl Default for AccessEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`AccessEngine`]
#[derive(Default)]
pub struct AccessEngineBuilder {
    access: AccessConfig,
    usage: UsageConfig,
    matrix: Option<Arc<CapabilityMatrix>>,
    requirements: Option<RequirementTable>,
    store: Option<Arc<dyn UsageStore>>,
    clock: Option<Arc<dyn Clock>>,
    tracker: Option<Arc<UsageTracker>>,
    identity_provider: Option<Arc<dyn IdentityProvider>>,
}

impl AccessEngineBuilder {
    pub fn access_config(mut self, config: AccessConfig) -> Self {
        self.access = config;
        self
    }

    pub fn usage_config(mut self, config: UsageConfig) -> Self {
        self.usage = config;
        self
    }

    pub fn hierarchy(mut self, hierarchy: PlanHierarchy) -> Self {
        self.access.hierarchy = hierarchy;
        self
    }

    pub fn matrix(mut self, matrix: Arc<CapabilityMatrix>) -> Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn requirements(mut self, requirements: RequirementTable) -> Self {
        self.requirements = Some(requirements);
        self
    }

    pub fn usage_store(mut self, store: Arc<dyn UsageStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Share an existing tracker; overrides the usage config, store and clock
    pub fn tracker(mut self, tracker: Arc<UsageTracker>) -> Self {
        self.tracker = Some(tracker);
        self
    }

    pub fn identity_provider(mut self, provider: Arc<dyn IdentityProvider>) -> Self {
        self.identity_provider = Some(provider);
        self
    }

    pub fn build(self) -> AccessEngine {
        let tracker = self.tracker.unwrap_or_else(|| {
            Arc::new(UsageTracker::with_parts(
                self.usage,
                self.store
                    .unwrap_or_else(|| Arc::new(InMemoryUsageStore::new())),
                self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            ))
        });

        AccessEngine {
            config: self.access,
            matrix: ArcSwap::new(self.matrix.unwrap_or_else(CapabilityMatrix::builtin)),
            requirements: self.requirements.unwrap_or_else(RequirementTable::builtin),
            tracker,
            identity_provider: self
                .identity_provider
                .unwrap_or_else(|| Arc::new(StaticIdentityProvider::new())),
        }
    }
}
