//! Google Drive → plain-text gateway
//!
//! A thin, read-only HTTP service that lists the files in one configured
//! Google Drive folder and serves each file's contents as normalized plain
//! text, for consumption by externally-hosted LLM agents.
//!
//! # Architecture
//!
//! - **Server**: Axum-based HTTP server with two read endpoints
//! - **Drive backend**: Google Drive v3 listing/export/media adapter behind
//!   the [`drive::DriveBackend`] trait
//! - **Credentials**: a single service-account identity with read-only scope
//!
//! # Modules
//!
//! - [`api`]: HTTP handlers and error mapping
//! - [`config`]: layered configuration (defaults → file → env → CLI)
//! - [`drive`]: Drive client, service-account auth, text normalization
//! - [`server`]: router assembly and startup

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::cargo_common_metadata)]
#![allow(clippy::multiple_crate_versions)]
#![allow(clippy::unused_async)]

pub mod api;
pub mod config;
pub mod drive;
pub mod server;
pub mod telemetry;

use std::sync::Arc;

use crate::config::AppConfig;
use crate::drive::DriveBackend;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Document backend the handlers delegate to.
    pub backend: Arc<dyn DriveBackend>,
    /// Global configuration, built once at startup.
    pub config: Arc<AppConfig>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
