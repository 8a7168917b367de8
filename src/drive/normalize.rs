//! Mime-type dispatch and plain-text normalization.
//!
//! The supported format set is fixed and small, so dispatch is a match over
//! a closed enumeration rather than open-ended provider lookup. Anything
//! outside the set is a [`DriveError::UnsupportedFormat`], never a silent
//! empty result.

use super::backend::DriveError;

/// Google Workspace native document.
pub const MIME_DOCUMENT: &str = "application/vnd.google-apps.document";
/// Google Workspace native spreadsheet.
pub const MIME_SPREADSHEET: &str = "application/vnd.google-apps.spreadsheet";
/// Google Workspace native presentation.
pub const MIME_PRESENTATION: &str = "application/vnd.google-apps.presentation";
/// Portable Document Format.
pub const MIME_PDF: &str = "application/pdf";

/// The closed set of provider-native formats this service can normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Document,
    Spreadsheet,
    Presentation,
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// Classify a provider mime type. `None` means unsupported.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        match mime_type {
            MIME_DOCUMENT => Some(Self::Document),
            MIME_SPREADSHEET => Some(Self::Spreadsheet),
            MIME_PRESENTATION => Some(Self::Presentation),
            MIME_PDF => Some(Self::Pdf),
            m if m.starts_with("text/") => Some(Self::PlainText),
            _ => None,
        }
    }

    /// Server-side export target for Workspace-native kinds.
    ///
    /// `None` means the raw bytes are downloaded instead (`alt=media`).
    pub fn export_mime(self) -> Option<&'static str> {
        match self {
            Self::Document | Self::Presentation => Some("text/plain"),
            Self::Spreadsheet => Some("text/csv"),
            Self::Pdf | Self::PlainText => None,
        }
    }
}

/// Convert fetched bytes into normalized plain text for the given kind.
pub fn normalize(kind: DocumentKind, bytes: &[u8]) -> Result<String, DriveError> {
    match kind {
        DocumentKind::Pdf => pdf_text_layer(bytes),
        // Exports and raw text files are UTF-8; tolerate stray bytes rather
        // than failing the whole document.
        _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
    }
}

/// Extract the text layer of a PDF, trimmed of surrounding whitespace.
fn pdf_text_layer(bytes: &[u8]) -> Result<String, DriveError> {
    pdf_extract::extract_text_from_mem(bytes)
        .map(|text| text.trim().to_string())
        .map_err(|e| DriveError::UnsupportedFormat(format!("PDF has no readable text layer: {e}")))
}
