pub mod api;
pub mod config;
pub mod constants;
pub mod debounce;
pub mod error;
pub mod fetch;
pub mod models;
pub mod mutations;
pub mod store;
pub mod tracing_setup;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{HttpProjectApi, ProjectApi};
pub use config::CoreConfig;
pub use debounce::FilterGate;
pub use error::{CoreError, Result};
pub use fetch::FetchCoordinator;
pub use mutations::ProjectMutations;
pub use store::{Action, FetchStatus, Snapshot, Store, StoreError, Subscription};
