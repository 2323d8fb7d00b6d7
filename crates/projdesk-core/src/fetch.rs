//! Fetch coordinator: the only writer of server-sourced collection and
//! detail state.
//!
//! Requests carry no sequencing token and are never cancelled. When two
//! collection fetches overlap, whichever response arrives last is applied
//! last and determines `projects` ("last response wins"), even if it belongs
//! to the older request.

use std::sync::Arc;

use crate::api::ProjectApi;
use crate::error::Result;
use crate::models::ProjectFilters;
use crate::store::{Action, Store};

pub struct FetchCoordinator<A> {
    store: Store,
    api: Arc<A>,
}

impl<A: ProjectApi> FetchCoordinator<A> {
    pub fn new(store: Store, api: Arc<A>) -> Self {
        Self { store, api }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Load the collection view. On failure the previous `projects` stay
    /// visible with a failed status, and the error is returned.
    pub async fn request_collection(&self, filters: ProjectFilters) -> Result<()> {
        self.store.dispatch(Action::ProjectsPending)?;
        tracing::debug!(?filters, "requesting projects");

        match self.api.list_projects(&filters).await {
            Ok(projects) => {
                tracing::debug!(count = projects.len(), "projects loaded");
                self.store.dispatch(Action::ProjectsFulfilled(projects))?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load projects");
                self.store.dispatch(Action::ProjectsRejected)?;
                Err(err)
            }
        }
    }

    /// Load one project into the detail view, replacing whatever was open.
    pub async fn request_detail(&self, id: &str) -> Result<()> {
        self.store.dispatch(Action::ProjectPending)?;
        tracing::debug!(project = id, "requesting project");

        match self.api.get_project(id).await {
            Ok(project) => {
                self.store.dispatch(Action::ProjectFulfilled(project))?;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(project = id, error = %err, "failed to load project");
                self.store.dispatch(Action::ProjectRejected)?;
                Err(err)
            }
        }
    }

    pub fn close_detail(&self) -> Result<()> {
        self.store.dispatch(Action::ProjectClosed)?;
        Ok(())
    }
}
