use crate::models::{
    File, FileId, Note, NoteId, ProjectDetail, ProjectFields, ProjectId, ProjectSummary,
};

/// Named state transitions accepted by [`Store::dispatch`](super::Store::dispatch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Collection fetch lifecycle
    ProjectsPending,
    ProjectsFulfilled(Vec<ProjectSummary>),
    ProjectsRejected,

    // Detail fetch lifecycle
    ProjectPending,
    ProjectFulfilled(ProjectDetail),
    ProjectRejected,
    /// The detail view was closed.
    ProjectClosed,

    // Confirmed mutations
    AddProject(ProjectSummary),
    UpdateProject { id: ProjectId, fields: ProjectFields },
    DeleteProject(ProjectId),
    AddNote { project_id: ProjectId, note: Note },
    UpdateNote { project_id: ProjectId, note: Note },
    RemoveNote { project_id: ProjectId, note_id: NoteId },
    AddFiles { project_id: ProjectId, files: Vec<File> },
    RemoveFile { project_id: ProjectId, file_id: FileId },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ProjectsPending => "projects/pending",
            Self::ProjectsFulfilled(_) => "projects/fulfilled",
            Self::ProjectsRejected => "projects/rejected",
            Self::ProjectPending => "project/pending",
            Self::ProjectFulfilled(_) => "project/fulfilled",
            Self::ProjectRejected => "project/rejected",
            Self::ProjectClosed => "project/closed",
            Self::AddProject(_) => "addProject",
            Self::UpdateProject { .. } => "updateProject",
            Self::DeleteProject(_) => "deleteProject",
            Self::AddNote { .. } => "addNoteToProject",
            Self::UpdateNote { .. } => "updateNoteInProject",
            Self::RemoveNote { .. } => "removeNoteFromProject",
            Self::AddFiles { .. } => "addFilesToProject",
            Self::RemoveFile { .. } => "removeFileFromProject",
        }
    }

    /// Mutations are reconciled locally and must keep both views coherent.
    /// Fetch results are taken from the server as-is.
    pub fn is_mutation(&self) -> bool {
        !matches!(
            self,
            Self::ProjectsPending
                | Self::ProjectsFulfilled(_)
                | Self::ProjectsRejected
                | Self::ProjectPending
                | Self::ProjectFulfilled(_)
                | Self::ProjectRejected
                | Self::ProjectClosed
        )
    }
}
