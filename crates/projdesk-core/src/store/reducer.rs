//! Pure state transitions for every [`Action`].
//!
//! Mutation transitions are the reconciliation step between the two views:
//! the detail view receives hydrated notes/files, the collection view only
//! ever receives or loses ids, and both are touched in the same call.

use crate::models::{File, Note, ProjectFields, ProjectSummary};

use super::{Action, FetchStatus, Snapshot};

pub fn reduce(state: &mut Snapshot, action: Action) {
    match action {
        Action::ProjectsPending | Action::ProjectPending => {
            state.fetch_status = FetchStatus::Loading;
        }
        Action::ProjectsFulfilled(projects) => {
            state.projects = projects;
            state.fetch_status = FetchStatus::Succeeded;
        }
        Action::ProjectFulfilled(project) => {
            state.active_project = Some(project);
            state.fetch_status = FetchStatus::Succeeded;
        }
        Action::ProjectsRejected | Action::ProjectRejected => {
            state.fetch_status = FetchStatus::Failed;
        }
        Action::ProjectClosed => {
            state.active_project = None;
        }
        Action::AddProject(project) => add_project(state, project),
        Action::UpdateProject { id, fields } => update_project(state, &id, fields),
        Action::DeleteProject(id) => {
            state.projects.retain(|p| p.id != id);
            if state.is_active(&id) {
                state.active_project = None;
            }
        }
        Action::AddNote { project_id, note } => {
            if let Some(summary) = summary_mut(state, &project_id) {
                if !summary.has_note(&note.id) {
                    summary.notes.push(note.id.clone());
                }
            }
            if let Some(detail) = state.active_project.as_mut().filter(|p| p.id == project_id) {
                upsert_note(&mut detail.notes, note);
            }
        }
        Action::UpdateNote { project_id, note } => {
            if let Some(detail) = state.active_project.as_mut().filter(|p| p.id == project_id) {
                if let Some(existing) = detail.notes.iter_mut().find(|n| n.id == note.id) {
                    merge_note(existing, note);
                }
            }
        }
        Action::RemoveNote {
            project_id,
            note_id,
        } => {
            if let Some(summary) = summary_mut(state, &project_id) {
                summary.notes.retain(|id| *id != note_id);
            }
            if let Some(detail) = state.active_project.as_mut().filter(|p| p.id == project_id) {
                detail.notes.retain(|n| n.id != note_id);
            }
        }
        Action::AddFiles { project_id, files } => add_files(state, &project_id, files),
        Action::RemoveFile {
            project_id,
            file_id,
        } => {
            if let Some(summary) = summary_mut(state, &project_id) {
                summary.files.retain(|id| *id != file_id);
            }
            if let Some(detail) = state.active_project.as_mut().filter(|p| p.id == project_id) {
                detail.files.retain(|f| f.id != file_id);
            }
        }
    }
}

fn summary_mut<'a>(state: &'a mut Snapshot, id: &str) -> Option<&'a mut ProjectSummary> {
    state.projects.iter_mut().find(|p| p.id == id)
}

fn add_project(state: &mut Snapshot, project: ProjectSummary) {
    // A refetch may already have delivered the new project.
    state.projects.retain(|p| p.id != project.id);
    state.projects.insert(0, project);
}

fn update_project(state: &mut Snapshot, id: &str, fields: ProjectFields) {
    if let Some(detail) = state.active_project.as_mut().filter(|p| p.id == id) {
        detail.fields = fields.clone();
    }
    if let Some(summary) = summary_mut(state, id) {
        summary.fields = fields;
    }
}

fn upsert_note(notes: &mut Vec<Note>, note: Note) {
    match notes.iter_mut().find(|n| n.id == note.id) {
        Some(existing) => merge_note(existing, note),
        None => notes.push(note),
    }
}

/// Overwrite with the server copy, keeping the back-reference if the
/// response omitted it.
fn merge_note(existing: &mut Note, note: Note) {
    let project = note.project.or_else(|| existing.project.take());
    *existing = Note { project, ..note };
}

fn add_files(state: &mut Snapshot, project_id: &str, files: Vec<File>) {
    if let Some(summary) = summary_mut(state, project_id) {
        summary.files.extend(files.iter().map(|f| f.id.clone()));
    }
    if let Some(detail) = state.active_project.as_mut().filter(|p| p.id == project_id) {
        detail.files.extend(files);
    }
}
