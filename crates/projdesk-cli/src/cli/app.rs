use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use projdesk_core::{
    CoreConfig, FetchCoordinator, FilterGate, HttpProjectApi, ProjectApi, ProjectMutations, Store,
};

/// Wiring of the core for one CLI invocation. Every component shares the
/// same store handle.
pub struct App<A> {
    pub store: Store,
    pub api: Arc<A>,
    pub fetch: Arc<FetchCoordinator<A>>,
    pub mutations: ProjectMutations<A>,
    pub filter_debounce: Duration,
}

impl<A: ProjectApi> App<A> {
    pub fn new(api: Arc<A>, filter_debounce: Duration) -> Self {
        let store = Store::new();
        Self {
            fetch: Arc::new(FetchCoordinator::new(store.clone(), api.clone())),
            mutations: ProjectMutations::new(store.clone(), api.clone()),
            store,
            api,
            filter_debounce,
        }
    }

    pub fn filter_gate(&self) -> FilterGate<A> {
        FilterGate::new(self.fetch.clone(), self.filter_debounce)
    }
}

impl App<HttpProjectApi> {
    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        let api = HttpProjectApi::new(config).context("Failed to build HTTP client")?;
        tracing::debug!(base_url = api.base_url(), "using backend");
        Ok(Self::new(Arc::new(api), config.filter_debounce()))
    }
}
