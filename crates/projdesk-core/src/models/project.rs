use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::calendar_date;
use super::{File, FileId, Note, NoteId, ProjectStatus};

pub type ProjectId = String;

/// Scalar fields shared by both project projections.
///
/// This is also the request body for create/update, and the part of an
/// update response that the cache merges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFields {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "calendar_date")]
    pub start_date: NaiveDate,
    #[serde(with = "calendar_date")]
    pub end_date: NaiveDate,
    pub status: ProjectStatus,
}

pub type ProjectInput = ProjectFields;

impl ProjectFields {
    /// End date must not precede the start date. Checked by callers before
    /// submitting; the cache stores whatever the server confirmed.
    pub fn has_valid_range(&self) -> bool {
        self.end_date >= self.start_date
    }
}

/// Collection-view projection: nested notes/files are ids only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    #[serde(flatten)]
    pub fields: ProjectFields,
    #[serde(default, deserialize_with = "reference_ids")]
    pub notes: Vec<NoteId>,
    #[serde(default, deserialize_with = "reference_ids")]
    pub files: Vec<FileId>,
}

impl ProjectSummary {
    pub fn has_note(&self, note_id: &str) -> bool {
        self.notes.iter().any(|id| id == note_id)
    }

    pub fn has_file(&self, file_id: &str) -> bool {
        self.files.iter().any(|id| id == file_id)
    }
}

/// Detail-view projection: nested notes/files fully hydrated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDetail {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    #[serde(flatten)]
    pub fields: ProjectFields,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub files: Vec<File>,
}

impl ProjectDetail {
    pub fn note(&self, note_id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == note_id)
    }

    pub fn file(&self, file_id: &str) -> Option<&File> {
        self.files.iter().find(|f| f.id == file_id)
    }

    /// Collapse into the collection-view shape.
    pub fn to_summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            fields: self.fields.clone(),
            notes: self.notes.iter().map(|n| n.id.clone()).collect(),
            files: self.files.iter().map(|f| f.id.clone()).collect(),
        }
    }
}

/// Accepts nested references either as bare ids or as populated objects
/// carrying an `_id`, and keeps only the ids.
fn reference_ids<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Reference {
        Id(String),
        Object {
            #[serde(rename = "_id")]
            id: String,
        },
    }

    let refs = Vec::<Reference>::deserialize(deserializer)?;
    Ok(refs
        .into_iter()
        .map(|r| match r {
            Reference::Id(id) => id,
            Reference::Object { id } => id,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_from_server_json() {
        let json = r#"{
            "_id": "p1",
            "title": "Website",
            "description": "Relaunch",
            "start_date": "2024-01-01T00:00:00.000Z",
            "end_date": "2024-02-01",
            "status": "On-hold",
            "notes": ["n1", {"_id": "n2", "content": "populated"}],
            "__v": 0
        }"#;
        let summary: ProjectSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.id, "p1");
        assert_eq!(summary.fields.status, ProjectStatus::OnHold);
        assert_eq!(summary.notes, vec!["n1".to_string(), "n2".to_string()]);
        assert!(summary.files.is_empty());
        assert!(summary.fields.has_valid_range());
    }

    #[test]
    fn test_detail_to_summary() {
        let json = r#"{
            "_id": "p5",
            "title": "Detail",
            "start_date": "2024-01-01",
            "end_date": "2024-01-31",
            "status": "Active",
            "notes": [{"_id": "n1", "content": "a", "project": "p5"}],
            "files": [{"_id": "f1", "file_name": "spec.pdf", "file_extension": "pdf", "s3_key": "k/spec.pdf"}]
        }"#;
        let detail: ProjectDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.note("n1").map(|n| n.content.as_str()), Some("a"));
        assert_eq!(detail.fields.description, "");

        let summary = detail.to_summary();
        assert_eq!(summary.notes, vec!["n1".to_string()]);
        assert_eq!(summary.files, vec!["f1".to_string()]);
        assert!(summary.has_file("f1"));
    }

    #[test]
    fn test_fields_serialize_plain_dates() {
        let fields = ProjectFields {
            title: "T".to_string(),
            description: String::new(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            status: ProjectStatus::Draft,
        };
        let value = serde_json::to_value(&fields).unwrap();
        assert_eq!(value["start_date"], "2024-05-02");
        assert_eq!(value["status"], "Draft");
        assert!(!fields.has_valid_range());
    }
}
