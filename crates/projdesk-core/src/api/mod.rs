//! Network collaborator interface.
//!
//! The core only talks to the backend through [`ProjectApi`]; the
//! reqwest-backed [`HttpProjectApi`] is the production implementation.

pub mod http;

use std::future::Future;

use crate::error::Result;
use crate::models::{
    File, FileDescriptor, Note, NoteInput, ProjectDetail, ProjectFields, ProjectFilters,
    ProjectInput, ProjectSummary,
};

pub use http::HttpProjectApi;

pub trait ProjectApi: Send + Sync + 'static {
    /// `GET /projects` - collection view, nested notes/files as ids
    fn list_projects(
        &self,
        filters: &ProjectFilters,
    ) -> impl Future<Output = Result<Vec<ProjectSummary>>> + Send;

    /// `GET /projects/{id}` - detail view with hydrated notes/files
    fn get_project(&self, id: &str) -> impl Future<Output = Result<ProjectDetail>> + Send;

    fn create_project(
        &self,
        input: &ProjectInput,
    ) -> impl Future<Output = Result<ProjectSummary>> + Send;

    /// Returns the scalar fields of the updated project.
    fn update_project(
        &self,
        id: &str,
        input: &ProjectInput,
    ) -> impl Future<Output = Result<ProjectFields>> + Send;

    fn delete_project(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    fn create_note(
        &self,
        project_id: &str,
        input: &NoteInput,
    ) -> impl Future<Output = Result<Note>> + Send;

    fn update_note(&self, id: &str, input: &NoteInput) -> impl Future<Output = Result<Note>> + Send;

    fn delete_note(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Register already-uploaded files with a project.
    fn create_files(
        &self,
        project_id: &str,
        files: &[FileDescriptor],
    ) -> impl Future<Output = Result<Vec<File>>> + Send;

    fn delete_file(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Temporary URL for viewing or downloading a stored file.
    fn file_url(&self, storage_key: &str) -> impl Future<Output = Result<String>> + Send;
}
