use serde::{Deserialize, Serialize};

use super::ProjectId;

pub type FileId = String;

/// An uploaded file attached to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct File {
    #[serde(rename = "_id")]
    pub id: FileId,
    pub file_name: String,
    #[serde(default)]
    pub file_extension: String,
    /// Opaque object-storage key, exchanged for a signed URL when viewing.
    #[serde(rename = "s3_key")]
    pub storage_key: String,
    #[serde(default, alias = "projectId", skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
}

/// Metadata for an already-uploaded file, submitted to register it with a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    pub file_name: String,
    pub file_extension: String,
    #[serde(rename = "s3_key")]
    pub storage_key: String,
}

impl FileDescriptor {
    /// Build a descriptor the way the upload form does: the extension is
    /// whatever follows the last dot of the name.
    pub fn from_upload(file_name: impl Into<String>, storage_key: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let file_extension = file_name
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_string();
        Self {
            file_name,
            file_extension,
            storage_key: storage_key.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_extension() {
        let d = FileDescriptor::from_upload("report.final.pdf", "uploads/abc");
        assert_eq!(d.file_extension, "pdf");
        assert_eq!(d.storage_key, "uploads/abc");

        let d = FileDescriptor::from_upload("README", "uploads/def");
        assert_eq!(d.file_extension, "README");
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let d = FileDescriptor::from_upload("a.png", "k1");
        let value = serde_json::to_value(&d).unwrap();
        assert_eq!(value["s3_key"], "k1");
        assert_eq!(value["file_extension"], "png");
    }
}
