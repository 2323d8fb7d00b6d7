pub mod calendar_date;
pub mod file;
pub mod filters;
pub mod note;
pub mod project;
pub mod project_status;

pub use file::{File, FileDescriptor, FileId};
pub use filters::ProjectFilters;
pub use note::{Note, NoteId, NoteInput};
pub use project::{ProjectDetail, ProjectFields, ProjectId, ProjectInput, ProjectSummary};
pub use project_status::{ProjectStatus, UnknownStatus};
