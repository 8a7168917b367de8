//! Google Drive backend: listing, content fetch, and text normalization.
//!
//! The HTTP layer only sees the [`DriveBackend`] trait; [`GoogleDriveClient`]
//! is the production implementation over the Drive v3 API. The trait carries
//! exactly two read operations, so the service is structurally incapable of
//! issuing a mutating call against the storage provider.

mod auth;
mod backend;
mod client;
mod normalize;

pub use auth::{ServiceAccountAuth, ServiceAccountKey};
pub use backend::{DriveBackend, DriveError, FileContent, FileDescriptor};
pub use client::GoogleDriveClient;
pub use normalize::DocumentKind;
