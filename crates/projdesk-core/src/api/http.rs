use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::ProjectApi;
use crate::config::CoreConfig;
use crate::constants::endpoints;
use crate::error::{CoreError, Result};
use crate::models::{
    File, FileDescriptor, Note, NoteInput, ProjectDetail, ProjectFields, ProjectFilters,
    ProjectInput, ProjectSummary,
};

/// REST client for the project backend
pub struct HttpProjectApi {
    base_url: String,
    auth_token: Option<String>,
    client: reqwest::Client,
}

/// `POST /files/create` answers with either the bare array or `{ "files": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CreatedFiles {
    List(Vec<File>),
    Wrapped { files: Vec<File> },
}

#[derive(Deserialize)]
struct SignedUrl {
    url: String,
}

impl HttpProjectApi {
    pub fn new(config: &CoreConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_token: config.auth_token.clone(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = Self::send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn send_empty(builder: RequestBuilder) -> Result<()> {
        Self::send(builder).await.map(|_| ())
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(CoreError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        })
    }
}

/// Prefer the backend's `message`/`error` field over the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            ["message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(|v| v.as_str()).map(str::to_string))
        })
        .unwrap_or_else(|| body.trim().to_string())
}

impl ProjectApi for HttpProjectApi {
    async fn list_projects(&self, filters: &ProjectFilters) -> Result<Vec<ProjectSummary>> {
        let builder = self
            .request(Method::GET, endpoints::PROJECTS)
            .query(&filters.to_query());
        Self::send_json(builder).await
    }

    async fn get_project(&self, id: &str) -> Result<ProjectDetail> {
        let path = format!("{}/{}", endpoints::PROJECTS, id);
        Self::send_json(self.request(Method::GET, &path)).await
    }

    async fn create_project(&self, input: &ProjectInput) -> Result<ProjectSummary> {
        let builder = self
            .request(Method::POST, endpoints::PROJECT_CREATE)
            .json(input);
        Self::send_json(builder).await
    }

    async fn update_project(&self, id: &str, input: &ProjectInput) -> Result<ProjectFields> {
        let path = format!("{}/{}", endpoints::PROJECTS, id);
        Self::send_json(self.request(Method::PUT, &path).json(input)).await
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        let path = format!("{}/{}", endpoints::PROJECTS, id);
        Self::send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn create_note(&self, project_id: &str, input: &NoteInput) -> Result<Note> {
        let body = serde_json::json!({
            "content": input.content,
            "projectId": project_id,
        });
        let builder = self.request(Method::POST, endpoints::NOTE_CREATE).json(&body);
        Self::send_json(builder).await
    }

    async fn update_note(&self, id: &str, input: &NoteInput) -> Result<Note> {
        let path = format!("{}/{}", endpoints::NOTES, id);
        Self::send_json(self.request(Method::PUT, &path).json(input)).await
    }

    async fn delete_note(&self, id: &str) -> Result<()> {
        let path = format!("{}/{}", endpoints::NOTES, id);
        Self::send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn create_files(&self, project_id: &str, files: &[FileDescriptor]) -> Result<Vec<File>> {
        let body = serde_json::json!({
            "files": files,
            "projectId": project_id,
        });
        let builder = self.request(Method::POST, endpoints::FILE_CREATE).json(&body);
        let created: CreatedFiles = Self::send_json(builder).await?;
        Ok(match created {
            CreatedFiles::List(files) | CreatedFiles::Wrapped { files } => files,
        })
    }

    async fn delete_file(&self, id: &str) -> Result<()> {
        let path = format!("{}/{}", endpoints::FILES, id);
        Self::send_empty(self.request(Method::DELETE, &path)).await
    }

    async fn file_url(&self, storage_key: &str) -> Result<String> {
        let body = serde_json::json!({ "key": storage_key });
        let builder = self
            .request(Method::POST, endpoints::FILE_SIGNED_URL)
            .json(&body);
        let signed: SignedUrl = Self::send_json(builder).await?;
        Ok(signed.url)
    }
}
