use serde::{Deserialize, Serialize};

use super::ProjectId;

pub type NoteId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    #[serde(rename = "_id")]
    pub id: NoteId,
    pub content: String,
    /// Owning project, when the server includes it.
    #[serde(default, alias = "projectId", skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
}

impl Note {
    pub fn new(id: impl Into<NoteId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            project: None,
        }
    }
}

/// Body for note create/update requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteInput {
    pub content: String,
}

impl NoteInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}
