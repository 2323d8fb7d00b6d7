//! Server-confirmed mutations.
//!
//! Each operation calls the backend first and only dispatches the matching
//! reconciliation action once the server has confirmed. A failed call leaves
//! the store untouched and hands the error back to the caller; nothing is
//! retried.

use std::sync::Arc;

use crate::api::ProjectApi;
use crate::error::Result;
use crate::models::{File, FileDescriptor, Note, NoteInput, ProjectInput, ProjectSummary};
use crate::store::{Action, Store};

pub struct ProjectMutations<A> {
    store: Store,
    api: Arc<A>,
}

impl<A: ProjectApi> ProjectMutations<A> {
    pub fn new(store: Store, api: Arc<A>) -> Self {
        Self { store, api }
    }

    pub async fn create_project(&self, input: &ProjectInput) -> Result<ProjectSummary> {
        let project = self
            .api
            .create_project(input)
            .await
            .inspect_err(|err| tracing::warn!(error = %err, "failed to create project"))?;
        self.store.dispatch(Action::AddProject(project.clone()))?;
        Ok(project)
    }

    pub async fn update_project(&self, id: &str, input: &ProjectInput) -> Result<()> {
        let fields = self
            .api
            .update_project(id, input)
            .await
            .inspect_err(|err| tracing::warn!(project = id, error = %err, "failed to update project"))?;
        self.store.dispatch(Action::UpdateProject {
            id: id.to_string(),
            fields,
        })?;
        Ok(())
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.api
            .delete_project(id)
            .await
            .inspect_err(|err| tracing::warn!(project = id, error = %err, "failed to delete project"))?;
        self.store.dispatch(Action::DeleteProject(id.to_string()))?;
        Ok(())
    }

    pub async fn create_note(&self, project_id: &str, input: &NoteInput) -> Result<Note> {
        let note = self
            .api
            .create_note(project_id, input)
            .await
            .inspect_err(|err| tracing::warn!(project = project_id, error = %err, "failed to create note"))?;
        self.store.dispatch(Action::AddNote {
            project_id: project_id.to_string(),
            note: note.clone(),
        })?;
        Ok(note)
    }

    pub async fn update_note(
        &self,
        project_id: &str,
        note_id: &str,
        input: &NoteInput,
    ) -> Result<Note> {
        let note = self
            .api
            .update_note(note_id, input)
            .await
            .inspect_err(|err| tracing::warn!(note = note_id, error = %err, "failed to update note"))?;
        self.store.dispatch(Action::UpdateNote {
            project_id: project_id.to_string(),
            note: note.clone(),
        })?;
        Ok(note)
    }

    pub async fn delete_note(&self, project_id: &str, note_id: &str) -> Result<()> {
        self.api
            .delete_note(note_id)
            .await
            .inspect_err(|err| tracing::warn!(note = note_id, error = %err, "failed to delete note"))?;
        self.store.dispatch(Action::RemoveNote {
            project_id: project_id.to_string(),
            note_id: note_id.to_string(),
        })?;
        Ok(())
    }

    /// Register files whose bytes were already uploaded to storage.
    pub async fn create_files(
        &self,
        project_id: &str,
        files: &[FileDescriptor],
    ) -> Result<Vec<File>> {
        let created = self
            .api
            .create_files(project_id, files)
            .await
            .inspect_err(|err| tracing::warn!(project = project_id, error = %err, "failed to create files"))?;
        self.store.dispatch(Action::AddFiles {
            project_id: project_id.to_string(),
            files: created.clone(),
        })?;
        Ok(created)
    }

    pub async fn delete_file(&self, project_id: &str, file_id: &str) -> Result<()> {
        self.api
            .delete_file(file_id)
            .await
            .inspect_err(|err| tracing::warn!(file = file_id, error = %err, "failed to delete file"))?;
        self.store.dispatch(Action::RemoveFile {
            project_id: project_id.to_string(),
            file_id: file_id.to_string(),
        })?;
        Ok(())
    }
}
