use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use super::{query::FOLDER_MIME, AccessToken, DriveError, FileQuery};

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct RemoteFile {
    pub id: String,
    pub name: String,
}

/// Remote file store used by sync. Every call carries the caller's token;
/// nothing is cached between calls.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn list(&self, token: &AccessToken, query: &FileQuery)
        -> Result<Vec<RemoteFile>, DriveError>;
    async fn create_folder(&self, token: &AccessToken, name: &str) -> Result<String, DriveError>;
    async fn create_file(
        &self,
        token: &AccessToken,
        parent_id: &str,
        name: &str,
        body: Bytes,
    ) -> Result<String, DriveError>;
    async fn update_file(&self, token: &AccessToken, file_id: &str, body: Bytes)
        -> Result<(), DriveError>;
    async fn download(&self, token: &AccessToken, file_id: &str) -> Result<Bytes, DriveError>;
}

/// Google Drive v3 over REST.
#[derive(Clone)]
pub struct GoogleDrive {
    http: reqwest::Client,
    api_base: String,
}

#[derive(Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<RemoteFile>,
}

#[derive(Deserialize)]
struct Created {
    id: String,
}

impl GoogleDrive {
    pub fn new(http: reqwest::Client, api_base: &str) -> Self {
        Self {
            http,
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}

async fn check(resp: reqwest::Response) -> Result<reqwest::Response, DriveError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(DriveError::from_response(status.as_u16(), &body))
}

/// Builds a `multipart/related` body: JSON metadata part, then the content part.
fn multipart_related(boundary: &str, metadata: &serde_json::Value, content: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(content.len() + 256);
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{boundary}\r\nContent-Type: application/json\r\n\r\n").as_bytes());
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{boundary}--").as_bytes());
    body
}

#[async_trait]
impl FileStore for GoogleDrive {
    async fn list(
        &self,
        token: &AccessToken,
        query: &FileQuery,
    ) -> Result<Vec<RemoteFile>, DriveError> {
        let q = query.to_drive_q();
        debug!(%q, "drive list");
        let resp = self
            .http
            .get(self.url("/drive/v3/files"))
            .bearer_auth(token.secret())
            .query(&[("q", q.as_str()), ("spaces", "drive"), ("fields", "files(id, name)")])
            .send()
            .await?;
        let list: FileList = check(resp).await?.json().await?;
        Ok(list.files)
    }

    async fn create_folder(&self, token: &AccessToken, name: &str) -> Result<String, DriveError> {
        let resp = self
            .http
            .post(self.url("/drive/v3/files"))
            .bearer_auth(token.secret())
            .query(&[("fields", "id")])
            .json(&json!({ "name": name, "mimeType": FOLDER_MIME }))
            .send()
            .await?;
        let created: Created = check(resp).await?.json().await?;
        debug!(folder_id = %created.id, name, "drive folder created");
        Ok(created.id)
    }

    async fn create_file(
        &self,
        token: &AccessToken,
        parent_id: &str,
        name: &str,
        body: Bytes,
    ) -> Result<String, DriveError> {
        let boundary = format!("ketovital-{}", Uuid::new_v4().simple());
        let metadata = json!({ "name": name, "parents": [parent_id] });
        let resp = self
            .http
            .post(self.url("/upload/drive/v3/files"))
            .bearer_auth(token.secret())
            .query(&[("uploadType", "multipart"), ("fields", "id")])
            .header(CONTENT_TYPE, format!("multipart/related; boundary={boundary}"))
            .body(multipart_related(&boundary, &metadata, &body))
            .send()
            .await?;
        let created: Created = check(resp).await?.json().await?;
        debug!(file_id = %created.id, parent_id, name, "drive file created");
        Ok(created.id)
    }

    async fn update_file(
        &self,
        token: &AccessToken,
        file_id: &str,
        body: Bytes,
    ) -> Result<(), DriveError> {
        let resp = self
            .http
            .patch(self.url(&format!("/upload/drive/v3/files/{file_id}")))
            .bearer_auth(token.secret())
            .query(&[("uploadType", "media")])
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;
        check(resp).await?;
        debug!(file_id, "drive file updated");
        Ok(())
    }

    async fn download(&self, token: &AccessToken, file_id: &str) -> Result<Bytes, DriveError> {
        let resp = self
            .http
            .get(self.url(&format!("/drive/v3/files/{file_id}")))
            .bearer_auth(token.secret())
            .query(&[("alt", "media")])
            .send()
            .await?;
        Ok(check(resp).await?.bytes().await?)
    }
}
