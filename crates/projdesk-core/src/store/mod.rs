pub mod actions;
pub mod invariants;
pub mod project_store;
pub mod reducer;
pub mod snapshot;

pub use actions::Action;
pub use project_store::{Store, StoreError, Subscription};
pub use snapshot::{FetchStatus, Snapshot};
