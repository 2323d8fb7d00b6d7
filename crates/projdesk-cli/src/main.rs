use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use projdesk_cli::cli::{commands, watch, App};
use projdesk_core::models::{calendar_date, FileDescriptor, ProjectFilters, ProjectInput, ProjectStatus};
use projdesk_core::tracing_setup::init_tracing;
use projdesk_core::CoreConfig;

#[derive(Parser)]
#[command(name = "projdesk")]
#[command(about = "Browse and edit projects, notes and files")]
struct Cli {
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Path to JSON config file (apiBaseUrl, authToken, ...)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Backend base URL, overrides config and environment
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct FilterArgs {
    #[arg(long)]
    status: Option<ProjectStatus>,
    /// Matches title or description
    #[arg(long, short = 'k')]
    keyword: Option<String>,
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,
}

impl From<FilterArgs> for ProjectFilters {
    fn from(args: FilterArgs) -> Self {
        ProjectFilters {
            status: args.status,
            keyword: args.keyword,
            start_date: args.start,
            end_date: args.end,
        }
    }
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long, short = 't')]
    title: String,
    #[arg(long, short = 'd', default_value = "")]
    description: String,
    #[arg(long, value_parser = parse_date)]
    start: NaiveDate,
    #[arg(long, value_parser = parse_date)]
    end: NaiveDate,
    #[arg(long, default_value = "Draft")]
    status: ProjectStatus,
}

impl From<ProjectArgs> for ProjectInput {
    fn from(args: ProjectArgs) -> Self {
        ProjectInput {
            title: args.title,
            description: args.description,
            start_date: args.start,
            end_date: args.end,
            status: args.status,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List projects, optionally filtered
    List(FilterArgs),

    /// Show one project with its notes and files
    Show { project_id: String },

    /// Edit filters interactively; the list refreshes after typing pauses
    Watch,

    CreateProject(ProjectArgs),

    UpdateProject {
        project_id: String,
        #[command(flatten)]
        project: ProjectArgs,
    },

    DeleteProject { project_id: String },

    AddNote { project_id: String, content: String },

    EditNote {
        project_id: String,
        note_id: String,
        content: String,
    },

    DeleteNote { project_id: String, note_id: String },

    /// Attach already uploaded files, given as NAME=STORAGE_KEY
    AddFile {
        project_id: String,
        #[arg(required = true, value_parser = commands::parse_file_arg)]
        files: Vec<FileDescriptor>,
    },

    DeleteFile { project_id: String, file_id: String },

    /// Print a signed download URL for a storage key
    FileUrl { storage_key: String },
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    calendar_date::parse(value).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn load_config(cli: &Cli) -> Result<CoreConfig> {
    let mut config = CoreConfig::resolve(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let app = App::from_config(&config)?;
    let json = cli.json;

    match cli.command {
        Commands::List(filters) => commands::list(&app, filters.into(), json).await,
        Commands::Show { project_id } => commands::show(&app, &project_id, json).await,
        Commands::Watch => watch::run(&app).await,
        Commands::CreateProject(project) => commands::create_project(&app, project.into(), json).await,
        Commands::UpdateProject {
            project_id,
            project,
        } => commands::update_project(&app, &project_id, project.into(), json).await,
        Commands::DeleteProject { project_id } => commands::delete_project(&app, &project_id).await,
        Commands::AddNote {
            project_id,
            content,
        } => commands::add_note(&app, &project_id, content, json).await,
        Commands::EditNote {
            project_id,
            note_id,
            content,
        } => commands::edit_note(&app, &project_id, &note_id, content, json).await,
        Commands::DeleteNote {
            project_id,
            note_id,
        } => commands::delete_note(&app, &project_id, &note_id, json).await,
        Commands::AddFile { project_id, files } => {
            commands::add_files(&app, &project_id, files, json).await
        }
        Commands::DeleteFile {
            project_id,
            file_id,
        } => commands::delete_file(&app, &project_id, &file_id, json).await,
        Commands::FileUrl { storage_key } => commands::file_url(&app, &storage_key).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
