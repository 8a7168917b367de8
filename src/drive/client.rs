//! Google Drive v3 backend client.
//!
//! Read-only adapter over the Drive listing, export, and media endpoints.
//! Every outbound call is a single attempt with a bounded timeout; transient
//! faults surface as [`DriveError::BackendUnavailable`] and are left for the
//! caller to retry.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use super::auth::ServiceAccountAuth;
use super::backend::{DriveBackend, DriveError, FileContent, FileDescriptor};
use super::normalize::{DocumentKind, normalize};
use crate::config::AppConfig;

/// Production [`DriveBackend`] over the Google Drive v3 API.
#[derive(Debug)]
pub struct GoogleDriveClient {
    client: reqwest::Client,
    auth: ServiceAccountAuth,
    folder_id: String,
    api_base: String,
}

/// One page of a Drive listing.
#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileDescriptor>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

impl GoogleDriveClient {
    /// Build the client and resolve the service credential from config.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DriveError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.resilience.backend_timeout_secs))
            .connect_timeout(Duration::from_secs(
                config.resilience.backend_connect_timeout_secs,
            ))
            .build()
            .map_err(|e| DriveError::Config(format!("failed to build HTTP client: {e}")))?;

        let auth = ServiceAccountAuth::from_config(&config.drive, client.clone()).await?;

        Ok(Self {
            client,
            auth,
            folder_id: config.drive.folder_id.clone(),
            api_base: config.drive.api_base.trim_end_matches('/').to_string(),
        })
    }

    /// Eagerly exchange the credential for a token. Used at startup so a
    /// misconfigured key is visible in the logs before the first request.
    pub async fn authenticate(&self) -> Result<(), DriveError> {
        self.auth.access_token().await.map(|_| ())
    }

    async fn export(&self, id: &str, token: &str, target: &str) -> Result<Vec<u8>, DriveError> {
        tracing::debug!(file_id = %id, target = %target, "Exporting Workspace file");

        let response = self
            .client
            .get(format!("{}/files/{id}/export", self.api_base))
            .bearer_auth(token)
            .query(&[("mimeType", target)])
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let response = ensure_success(response, Some(id)).await?;
        let bytes = response.bytes().await.map_err(|e| request_error(&e))?;
        Ok(bytes.to_vec())
    }

    async fn download(&self, id: &str, token: &str) -> Result<Vec<u8>, DriveError> {
        tracing::debug!(file_id = %id, "Downloading file media");

        let response = self
            .client
            .get(format!("{}/files/{id}", self.api_base))
            .bearer_auth(token)
            .query(&[("alt", "media")])
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let response = ensure_success(response, Some(id)).await?;
        let bytes = response.bytes().await.map_err(|e| request_error(&e))?;
        Ok(bytes.to_vec())
    }

    async fn fetch_metadata(&self, id: &str, token: &str) -> Result<FileDescriptor, DriveError> {
        let response = self
            .client
            .get(format!("{}/files/{id}", self.api_base))
            .bearer_auth(token)
            .query(&[("fields", "id,name,mimeType")])
            .send()
            .await
            .map_err(|e| request_error(&e))?;

        let response = ensure_success(response, Some(id)).await?;
        response
            .json()
            .await
            .map_err(|e| DriveError::BackendUnavailable(format!("invalid metadata payload: {e}")))
    }
}

#[async_trait]
impl DriveBackend for GoogleDriveClient {
    async fn list_files(&self) -> Result<Vec<FileDescriptor>, DriveError> {
        let query = format!("'{}' in parents and trashed = false", self.folder_id);
        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        // Provider-given order is preserved; pages are concatenated as-is.
        loop {
            let token = self.auth.access_token().await?;
            let mut request = self
                .client
                .get(format!("{}/files", self.api_base))
                .bearer_auth(token)
                .query(&[
                    ("q", query.as_str()),
                    ("fields", "files(id,name,mimeType),nextPageToken"),
                ]);
            if let Some(page) = &page_token {
                request = request.query(&[("pageToken", page.as_str())]);
            }

            let response = request.send().await.map_err(|e| request_error(&e))?;
            let response = ensure_success(response, None).await?;
            let page: FileList = response.json().await.map_err(|e| {
                DriveError::BackendUnavailable(format!("invalid listing payload: {e}"))
            })?;

            files.extend(page.files);
            match page.next_page_token {
                Some(next) => page_token = Some(next),
                None => break,
            }
        }

        tracing::debug!(folder_id = %self.folder_id, count = files.len(), "Listed folder");
        Ok(files)
    }

    async fn get_file_content(&self, id: &str) -> Result<FileContent, DriveError> {
        let token = self.auth.access_token().await?;
        let metadata = self.fetch_metadata(id, &token).await?;

        let kind = DocumentKind::from_mime(&metadata.mime_type).ok_or_else(|| {
            DriveError::UnsupportedFormat(format!(
                "unsupported mime type for {id}: {}",
                metadata.mime_type
            ))
        })?;

        let bytes = match kind.export_mime() {
            Some(target) => self.export(id, &token, target).await?,
            None => self.download(id, &token).await?,
        };

        let text = normalize(kind, &bytes)?;
        Ok(FileContent {
            id: metadata.id,
            name: metadata.name,
            text,
        })
    }
}

fn request_error(e: &reqwest::Error) -> DriveError {
    if e.is_timeout() {
        DriveError::BackendUnavailable(format!("drive request timed out: {e}"))
    } else {
        DriveError::BackendUnavailable(format!("drive request failed: {e}"))
    }
}

/// Map a non-success provider status onto the error taxonomy. `resource`
/// names the file a 404 should be attributed to; a 404 from the listing
/// endpoint itself is a provider fault, not a missing file.
fn status_error(status: StatusCode, detail: &str, resource: Option<&str>) -> DriveError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DriveError::PermissionDenied(format!(
            "credential lacks access ({status}): {detail}"
        )),
        StatusCode::NOT_FOUND => match resource {
            Some(id) => DriveError::NotFound(format!(
                "file {id} does not exist or is not shared with the service account"
            )),
            None => {
                DriveError::BackendUnavailable(format!("drive api returned {status}: {detail}"))
            }
        },
        _ => DriveError::BackendUnavailable(format!("drive api returned {status}: {detail}")),
    }
}

async fn ensure_success(
    response: reqwest::Response,
    resource: Option<&str>,
) -> Result<reqwest::Response, DriveError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    Err(status_error(status, &detail, resource))
}
