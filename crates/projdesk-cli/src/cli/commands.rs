//! One-shot commands. Each loads the view it acts on first, so confirmed
//! mutations are reconciled into a populated cache before printing.

use anyhow::{bail, Context, Result};
use projdesk_core::models::{FileDescriptor, NoteInput, ProjectFilters, ProjectInput};
use projdesk_core::ProjectApi;
use serde::Serialize;

use super::render;
use super::App;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub async fn list<A: ProjectApi>(app: &App<A>, filters: ProjectFilters, json: bool) -> Result<()> {
    app.fetch
        .request_collection(filters)
        .await
        .context("Failed to load projects")?;
    let snapshot = app.store.snapshot();
    if json {
        return print_json(&snapshot.projects);
    }
    print!("{}", render::collection(&snapshot));
    Ok(())
}

pub async fn show<A: ProjectApi>(app: &App<A>, id: &str, json: bool) -> Result<()> {
    open_project(app, id).await?;
    print_open_project(app, json)
}

fn print_open_project<A: ProjectApi>(app: &App<A>, json: bool) -> Result<()> {
    let snapshot = app.store.snapshot();
    let Some(project) = snapshot.active_project.as_ref() else {
        bail!("No project is open");
    };
    if json {
        return print_json(project);
    }
    print!("{}", render::detail(project));
    Ok(())
}

fn check_range(input: &ProjectInput) -> Result<()> {
    if !input.has_valid_range() {
        bail!("End date must be on or after the start date");
    }
    Ok(())
}

fn check_note(input: &NoteInput) -> Result<()> {
    if input.is_blank() {
        bail!("Note content is required");
    }
    Ok(())
}

pub async fn create_project<A: ProjectApi>(app: &App<A>, input: ProjectInput, json: bool) -> Result<()> {
    check_range(&input)?;
    let project = app
        .mutations
        .create_project(&input)
        .await
        .context("Failed to create project")?;
    if json {
        return print_json(&project);
    }
    println!("Created {}", render::project_line(&project));
    Ok(())
}

pub async fn update_project<A: ProjectApi>(
    app: &App<A>,
    id: &str,
    input: ProjectInput,
    json: bool,
) -> Result<()> {
    check_range(&input)?;
    app.fetch
        .request_collection(ProjectFilters::default())
        .await
        .context("Failed to load projects")?;
    app.mutations
        .update_project(id, &input)
        .await
        .with_context(|| format!("Failed to update project {}", id))?;

    let snapshot = app.store.snapshot();
    match snapshot.project(id) {
        Some(project) if json => print_json(project),
        Some(project) => {
            println!("Updated {}", render::project_line(project));
            Ok(())
        }
        None => {
            println!("Updated {} (not in the current listing)", id);
            Ok(())
        }
    }
}

pub async fn delete_project<A: ProjectApi>(app: &App<A>, id: &str) -> Result<()> {
    app.mutations
        .delete_project(id)
        .await
        .with_context(|| format!("Failed to delete project {}", id))?;
    println!("Deleted project {}", id);
    Ok(())
}

async fn open_project<A: ProjectApi>(app: &App<A>, project_id: &str) -> Result<()> {
    app.fetch
        .request_detail(project_id)
        .await
        .with_context(|| format!("Failed to load project {}", project_id))
}

pub async fn add_note<A: ProjectApi>(app: &App<A>, project_id: &str, content: String, json: bool) -> Result<()> {
    let input = NoteInput::new(content);
    check_note(&input)?;
    open_project(app, project_id).await?;
    app.mutations
        .create_note(project_id, &input)
        .await
        .context("Failed to create note")?;
    print_open_project(app, json)
}

pub async fn edit_note<A: ProjectApi>(
    app: &App<A>,
    project_id: &str,
    note_id: &str,
    content: String,
    json: bool,
) -> Result<()> {
    let input = NoteInput::new(content);
    check_note(&input)?;
    open_project(app, project_id).await?;
    app.mutations
        .update_note(project_id, note_id, &input)
        .await
        .with_context(|| format!("Failed to update note {}", note_id))?;
    print_open_project(app, json)
}

pub async fn delete_note<A: ProjectApi>(app: &App<A>, project_id: &str, note_id: &str, json: bool) -> Result<()> {
    open_project(app, project_id).await?;
    app.mutations
        .delete_note(project_id, note_id)
        .await
        .with_context(|| format!("Failed to delete note {}", note_id))?;
    print_open_project(app, json)
}

pub async fn add_files<A: ProjectApi>(
    app: &App<A>,
    project_id: &str,
    files: Vec<FileDescriptor>,
    json: bool,
) -> Result<()> {
    if files.is_empty() {
        bail!("At least one file is required");
    }
    open_project(app, project_id).await?;
    app.mutations
        .create_files(project_id, &files)
        .await
        .context("Failed to register files")?;
    print_open_project(app, json)
}

pub async fn delete_file<A: ProjectApi>(app: &App<A>, project_id: &str, file_id: &str, json: bool) -> Result<()> {
    open_project(app, project_id).await?;
    app.mutations
        .delete_file(project_id, file_id)
        .await
        .with_context(|| format!("Failed to delete file {}", file_id))?;
    print_open_project(app, json)
}

pub async fn file_url<A: ProjectApi>(app: &App<A>, storage_key: &str) -> Result<()> {
    let url = app
        .api
        .file_url(storage_key)
        .await
        .context("Failed to get file URL")?;
    println!("{}", url);
    Ok(())
}

/// Parse `NAME=KEY` as given on the command line.
pub fn parse_file_arg(arg: &str) -> Result<FileDescriptor, String> {
    match arg.split_once('=') {
        Some((name, key)) if !name.trim().is_empty() && !key.trim().is_empty() => {
            Ok(FileDescriptor::from_upload(name.trim(), key.trim()))
        }
        _ => Err(format!("expected NAME=STORAGE_KEY, got '{}'", arg)),
    }
}
