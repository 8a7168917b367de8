//! Backend trait and wire types for the document storage provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A file visible within the configured folder scope.
///
/// Descriptors are immutable once retrieved and are never cached; every
/// listing call re-fetches them from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDescriptor {
    /// Provider-assigned opaque identifier, stable and unique.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Provider-native format tag, e.g. `application/vnd.google-apps.document`.
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Normalized plain-text content of one file.
///
/// Produced on demand; lives for the duration of a single request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    /// Same identifier as the file's [`FileDescriptor`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Normalized plain-text body. May be empty for a blank document.
    pub text: String,
}

/// Errors that can occur talking to the storage provider.
#[derive(Debug, thiserror::Error)]
pub enum DriveError {
    /// The credential lacks access to the requested scope or file.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The requested id does not exist or is outside the accessible scope.
    #[error("not found: {0}")]
    NotFound(String),

    /// The file's mime type is outside the supported set.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Network or provider fault. Safe for the caller to retry.
    #[error("backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Invalid startup configuration. Never produced after boot.
    #[error("configuration error: {0}")]
    Config(String),
}

impl DriveError {
    /// Machine-readable kind surfaced in API error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PermissionDenied(_) => "permission_denied",
            Self::NotFound(_) => "not_found",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::Config(_) => "configuration_error",
        }
    }
}

/// Read-only view of the storage provider.
///
/// Implementors list the configured folder scope and fetch one file's
/// normalized content. There is deliberately no create/update/delete
/// surface here.
#[async_trait]
pub trait DriveBackend: Send + Sync {
    /// List all files under the configured folder, in provider-given order.
    async fn list_files(&self) -> Result<Vec<FileDescriptor>, DriveError>;

    /// Fetch and normalize the content of one file by identifier.
    async fn get_file_content(&self, id: &str) -> Result<FileContent, DriveError>;
}
