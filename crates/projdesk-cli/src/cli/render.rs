//! Plain-text rendering of snapshots.

use projdesk_core::models::{calendar_date, ProjectDetail, ProjectSummary};
use projdesk_core::{FetchStatus, Snapshot};

pub fn project_line(project: &ProjectSummary) -> String {
    format!(
        "{}  {:<9}  {}  ({} .. {})  notes: {}  files: {}",
        project.id,
        project.fields.status.as_str(),
        project.fields.title,
        calendar_date::format(&project.fields.start_date),
        calendar_date::format(&project.fields.end_date),
        project.notes.len(),
        project.files.len(),
    )
}

pub fn collection(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    match snapshot.fetch_status {
        FetchStatus::Loading => out.push_str("[loading]\n"),
        FetchStatus::Failed => out.push_str("[failed to refresh - showing last known projects]\n"),
        FetchStatus::Idle | FetchStatus::Succeeded => {}
    }
    if snapshot.projects.is_empty() {
        out.push_str("No projects found\n");
    }
    for project in &snapshot.projects {
        out.push_str(&project_line(project));
        out.push('\n');
    }
    out
}

pub fn detail(project: &ProjectDetail) -> String {
    let fields = &project.fields;
    let mut out = format!(
        "{} [{}]\n{}\n{} .. {}\n",
        fields.title,
        fields.status,
        fields.description,
        calendar_date::format(&fields.start_date),
        calendar_date::format(&fields.end_date),
    );

    out.push_str(&format!("\nNotes ({})\n", project.notes.len()));
    for note in &project.notes {
        out.push_str(&format!("  {}  {}\n", note.id, note.content));
    }

    out.push_str(&format!("\nFiles ({})\n", project.files.len()));
    for file in &project.files {
        out.push_str(&format!("  {}  {}  [{}]\n", file.id, file.file_name, file.file_extension));
    }
    out
}
