//! Router-level scenarios driven through a stub backend.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use gdrive_gateway::AppState;
use gdrive_gateway::api;
use gdrive_gateway::config::{AppConfig, DriveConfig, ResilienceConfig, ServerConfig};
use gdrive_gateway::drive::{DriveBackend, DriveError, FileContent, FileDescriptor};

#[derive(Debug, Clone, Copy)]
enum FailureMode {
    None,
    Unavailable,
    Denied,
}

/// In-memory [`DriveBackend`] standing in for the Drive API.
#[derive(Debug)]
struct StubBackend {
    files: Vec<FileDescriptor>,
    contents: HashMap<String, FileContent>,
    unsupported: Vec<String>,
    failure: FailureMode,
}

impl StubBackend {
    fn healthy() -> Self {
        let mut contents = HashMap::new();
        contents.insert(
            "abc123".to_string(),
            FileContent {
                id: "abc123".to_string(),
                name: "Job Description Template".to_string(),
                text: "Role overview\n\nResponsibilities and requirements.\n".to_string(),
            },
        );

        Self {
            files: vec![FileDescriptor {
                id: "abc123".to_string(),
                name: "Job Description Template".to_string(),
                mime_type: "application/vnd.google-apps.document".to_string(),
            }],
            contents,
            unsupported: vec!["zip789".to_string()],
            failure: FailureMode::None,
        }
    }

    fn failing(failure: FailureMode) -> Self {
        Self {
            files: Vec::new(),
            contents: HashMap::new(),
            unsupported: Vec::new(),
            failure,
        }
    }

    fn failure_error(failure: FailureMode) -> Option<DriveError> {
        match failure {
            FailureMode::None => None,
            FailureMode::Unavailable => Some(DriveError::BackendUnavailable(
                "drive request timed out".to_string(),
            )),
            FailureMode::Denied => Some(DriveError::PermissionDenied(
                "credential lacks access (403 Forbidden)".to_string(),
            )),
        }
    }
}

#[async_trait]
impl DriveBackend for StubBackend {
    async fn list_files(&self) -> Result<Vec<FileDescriptor>, DriveError> {
        if let Some(err) = Self::failure_error(self.failure) {
            return Err(err);
        }
        Ok(self.files.clone())
    }

    async fn get_file_content(&self, id: &str) -> Result<FileContent, DriveError> {
        if let Some(err) = Self::failure_error(self.failure) {
            return Err(err);
        }
        if self.unsupported.iter().any(|u| u == id) {
            return Err(DriveError::UnsupportedFormat(format!(
                "unsupported mime type for {id}: application/zip"
            )));
        }
        self.contents
            .get(id)
            .cloned()
            .ok_or_else(|| DriveError::NotFound(format!("file {id} does not exist")))
    }
}

fn test_config() -> AppConfig {
    AppConfig {
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        drive: DriveConfig {
            folder_id: "folder-1".to_string(),
            api_base: "http://127.0.0.1:1/drive/v3".to_string(),
            token_uri: None,
            credentials_path: None,
            credentials_json: None,
        },
        resilience: ResilienceConfig {
            request_timeout_secs: 5,
            backend_timeout_secs: 2,
            backend_connect_timeout_secs: 1,
        },
    }
}

fn test_server(backend: StubBackend) -> TestServer {
    let state = AppState {
        backend: Arc::new(backend),
        config: Arc::new(test_config()),
    };
    TestServer::new(api::router().with_state(state)).expect("test server")
}

#[tokio::test]
async fn listing_returns_the_folder_descriptors() {
    let server = test_server(StubBackend::healthy());

    let response = server.get("/files").await;
    response.assert_status(StatusCode::OK);
    response.assert_json(&json!([
        {
            "id": "abc123",
            "name": "Job Description Template",
            "mimeType": "application/vnd.google-apps.document"
        }
    ]));
}

#[tokio::test]
async fn file_content_is_served_as_text() {
    let server = test_server(StubBackend::healthy());

    let response = server.get("/file/abc123").await;
    response.assert_status(StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["id"], "abc123");
    assert_eq!(body["name"], "Job Description Template");
    assert_eq!(body["text"], "Role overview\n\nResponsibilities and requirements.\n");
}

#[tokio::test]
async fn unknown_file_is_not_found() {
    let server = test_server(StubBackend::healthy());

    let response = server.get("/file/does-not-exist").await;
    response.assert_status(StatusCode::NOT_FOUND);

    let body: Value = response.json();
    assert_eq!(body["code"], "not_found");
    assert!(body["error"].as_str().unwrap().contains("does-not-exist"));
}

#[tokio::test]
async fn unsupported_mime_type_is_rejected() {
    let server = test_server(StubBackend::healthy());

    let response = server.get("/file/zip789").await;
    response.assert_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);

    let body: Value = response.json();
    assert_eq!(body["code"], "unsupported_format");
}

#[tokio::test]
async fn backend_outage_maps_to_bad_gateway() {
    let server = test_server(StubBackend::failing(FailureMode::Unavailable));

    let response = server.get("/files").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["code"], "backend_unavailable");

    let response = server.get("/file/abc123").await;
    response.assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn denied_credential_maps_to_forbidden() {
    let server = test_server(StubBackend::failing(FailureMode::Denied));

    let response = server.get("/files").await;
    response.assert_status(StatusCode::FORBIDDEN);
    let body: Value = response.json();
    assert_eq!(body["code"], "permission_denied");
}

#[tokio::test]
async fn health_and_banner_respond() {
    let server = test_server(StubBackend::healthy());

    let response = server.get("/health").await;
    response.assert_status(StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");

    let response = server.get("/").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn there_is_no_write_surface() {
    let server = test_server(StubBackend::healthy());

    let response = server.post("/files").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = server.delete("/file/abc123").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);

    let response = server.put("/file/abc123").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
}
