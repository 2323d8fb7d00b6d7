use crate::models::{ProjectDetail, ProjectSummary};

/// Progress of the most recent fetch, shared by collection and detail fetches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// One immutable state of the cache. Replaced wholesale on every dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Collection view, in server order (newly created projects first).
    pub projects: Vec<ProjectSummary>,
    /// Detail view of the currently open project.
    pub active_project: Option<ProjectDetail>,
    pub fetch_status: FetchStatus,
}

impl Snapshot {
    pub fn project(&self, id: &str) -> Option<&ProjectSummary> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active_project.as_ref().is_some_and(|p| p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.fetch_status == FetchStatus::Loading
    }
}
