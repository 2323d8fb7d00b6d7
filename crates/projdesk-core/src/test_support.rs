//! Fixtures and an in-memory [`ProjectApi`] for unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use chrono::NaiveDate;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use crate::api::ProjectApi;
use crate::error::{CoreError, Result};
use crate::models::{
    File, FileDescriptor, Note, NoteInput, ProjectDetail, ProjectFields, ProjectFilters,
    ProjectInput, ProjectStatus, ProjectSummary,
};

pub(crate) fn fields(title: &str, status: ProjectStatus) -> ProjectFields {
    ProjectFields {
        title: title.to_string(),
        description: format!("{} description", title),
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap(),
        status,
    }
}

pub(crate) fn summary(id: &str, status: ProjectStatus) -> ProjectSummary {
    ProjectSummary {
        id: id.to_string(),
        fields: fields(&format!("Project {}", id), status),
        notes: vec![],
        files: vec![],
    }
}

pub(crate) fn detail(id: &str, notes: Vec<Note>, files: Vec<File>) -> ProjectDetail {
    ProjectDetail {
        id: id.to_string(),
        fields: fields(&format!("Project {}", id), ProjectStatus::Active),
        notes,
        files,
    }
}

pub(crate) fn file(id: &str) -> File {
    File {
        id: id.to_string(),
        file_name: format!("{}.pdf", id),
        file_extension: "pdf".to_string(),
        storage_key: format!("uploads/{}.pdf", id),
        project: None,
    }
}

pub(crate) fn server_error() -> CoreError {
    CoreError::Api {
        status: 500,
        message: "Internal Server Error".to_string(),
    }
}

/// A queued answer: either available immediately or released later by the
/// test through the paired `oneshot::Sender`.
pub(crate) enum Reply<T> {
    Ready(Result<T>),
    Gated(oneshot::Receiver<Result<T>>),
}

impl<T> Reply<T> {
    async fn resolve(self) -> Result<T> {
        match self {
            Reply::Ready(result) => result,
            Reply::Gated(rx) => rx.await.unwrap_or_else(|_| Err(server_error())),
        }
    }
}

/// In-memory backend that records every call.
///
/// Fetch answers come from per-category queues (empty queue = empty/404
/// answer). Mutations succeed with server-assigned ids unless
/// `fail_mutations` is set.
#[derive(Default)]
pub(crate) struct MockApi {
    list_replies: Mutex<VecDeque<Reply<Vec<ProjectSummary>>>>,
    detail_replies: Mutex<VecDeque<Reply<ProjectDetail>>>,
    pub list_calls: Mutex<Vec<ProjectFilters>>,
    pub detail_calls: Mutex<Vec<String>>,
    pub mutation_calls: Mutex<Vec<String>>,
    fail_mutations: AtomicBool,
    next_id: AtomicU64,
}

impl MockApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_list(&self, result: Result<Vec<ProjectSummary>>) {
        self.list_replies.lock().push_back(Reply::Ready(result));
    }

    /// Queue a collection answer that is held back until the sender fires.
    pub fn push_list_gated(&self) -> oneshot::Sender<Result<Vec<ProjectSummary>>> {
        let (tx, rx) = oneshot::channel();
        self.list_replies.lock().push_back(Reply::Gated(rx));
        tx
    }

    pub fn push_detail(&self, result: Result<ProjectDetail>) {
        self.detail_replies.lock().push_back(Reply::Ready(result));
    }

    pub fn push_detail_gated(&self) -> oneshot::Sender<Result<ProjectDetail>> {
        let (tx, rx) = oneshot::channel();
        self.detail_replies.lock().push_back(Reply::Gated(rx));
        tx
    }

    pub fn list_call_count(&self) -> usize {
        self.list_calls.lock().len()
    }

    pub fn set_fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    fn mutation(&self, name: String) -> Result<()> {
        self.mutation_calls.lock().push(name);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(server_error());
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

impl ProjectApi for MockApi {
    async fn list_projects(&self, filters: &ProjectFilters) -> Result<Vec<ProjectSummary>> {
        self.list_calls.lock().push(filters.clone());
        let reply = self.list_replies.lock().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Ok(Vec::new()),
        }
    }

    async fn get_project(&self, id: &str) -> Result<ProjectDetail> {
        self.detail_calls.lock().push(id.to_string());
        let reply = self.detail_replies.lock().pop_front();
        match reply {
            Some(reply) => reply.resolve().await,
            None => Err(CoreError::Api {
                status: 404,
                message: "Project not found".to_string(),
            }),
        }
    }

    async fn create_project(&self, input: &ProjectInput) -> Result<ProjectSummary> {
        self.mutation("create_project".to_string())?;
        Ok(ProjectSummary {
            id: self.next_id("p"),
            fields: input.clone(),
            notes: vec![],
            files: vec![],
        })
    }

    async fn update_project(&self, id: &str, input: &ProjectInput) -> Result<ProjectFields> {
        self.mutation(format!("update_project {}", id))?;
        Ok(input.clone())
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.mutation(format!("delete_project {}", id))
    }

    async fn create_note(&self, project_id: &str, input: &NoteInput) -> Result<Note> {
        self.mutation(format!("create_note {}", project_id))?;
        Ok(Note {
            id: self.next_id("n"),
            content: input.content.clone(),
            project: Some(project_id.to_string()),
        })
    }

    async fn update_note(&self, id: &str, input: &NoteInput) -> Result<Note> {
        self.mutation(format!("update_note {}", id))?;
        Ok(Note::new(id, input.content.clone()))
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        self.mutation(format!("delete_note {}", id))
    }

    async fn create_files(&self, project_id: &str, files: &[FileDescriptor]) -> Result<Vec<File>> {
        self.mutation(format!("create_files {}", project_id))?;
        Ok(files
            .iter()
            .map(|d| File {
                id: self.next_id("f"),
                file_name: d.file_name.clone(),
                file_extension: d.file_extension.clone(),
                storage_key: d.storage_key.clone(),
                project: Some(project_id.to_string()),
            })
            .collect())
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        self.mutation(format!("delete_file {}", id))
    }

    async fn file_url(&self, storage_key: &str) -> Result<String> {
        Ok(format!("https://storage.test/{}?sig=abc", storage_key))
    }
}
