//! Upload form handling.
//!
//! Validation happens before any bytes leave the machine: a form is turned
//! into an [`UploadPayload`] first, and only payloads can be submitted to the
//! registry. A form without a usable file never produces a payload, so it can
//! never produce a request either.

use thiserror::Error;

use crate::notice::{Locale, Notice};

/// File extensions the registry accepts for the main document.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["pdf", "doc", "docx", "txt"];

/// An in-memory file selected for upload.
#[derive(Debug, Clone)]
pub struct FilePart {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FilePart {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        FilePart {
            filename: filename.into(),
            bytes,
        }
    }

    /// Lowercased extension after the last dot. Mirrors the registry's own
    /// allow-list check, so a dotless name has no extension and `.hidden`
    /// has extension `hidden`.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// Reasons an upload form is rejected before submission.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("no file was selected")]
    MissingFile,
    #[error("file extension {extension:?} is not allowed")]
    UnsupportedExtension { extension: String },
}

impl UploadError {
    /// The notification shown for this rejection.
    pub fn notice(&self, locale: Locale) -> Notice {
        match self {
            UploadError::MissingFile => Notice::error(locale.missing_file()),
            UploadError::UnsupportedExtension { .. } => Notice::error(locale.unsupported_file()),
        }
    }
}

/// Raw upload form fields, as collected from a web form or CLI flags.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
    pub title: String,
    pub document_type: String,
    pub document_number: String,
    pub sender: String,
    /// Comma-separated tag list, passed through as typed.
    pub tags: String,
    pub priority: String,
    pub attachments: Vec<FilePart>,
}

/// A validated upload, ready to be sent as multipart form data.
#[derive(Debug)]
pub struct UploadPayload {
    pub file: FilePart,
    pub title: String,
    pub document_type: String,
    pub document_number: String,
    pub sender: String,
    pub tags: String,
    pub priority: String,
    pub attachments: Vec<FilePart>,
}

impl UploadForm {
    /// Validate the form and produce a submittable payload.
    ///
    /// A blank title falls back to the file name, matching what the registry
    /// would record anyway. Attachment slots without a file name are dropped.
    pub fn prepare(self) -> Result<UploadPayload, UploadError> {
        let file = self
            .file
            .filter(|f| !f.filename.trim().is_empty())
            .ok_or(UploadError::MissingFile)?;

        let extension = file.extension().unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
            return Err(UploadError::UnsupportedExtension { extension });
        }

        let title = if self.title.trim().is_empty() {
            file.filename.clone()
        } else {
            self.title.trim().to_string()
        };

        let attachments = self
            .attachments
            .into_iter()
            .filter(|a| !a.filename.trim().is_empty())
            .collect();

        Ok(UploadPayload {
            file,
            title,
            document_type: self.document_type.trim().to_string(),
            document_number: self.document_number.trim().to_string(),
            sender: self.sender.trim().to_string(),
            tags: self.tags.trim().to_string(),
            priority: self.priority.trim().to_string(),
            attachments,
        })
    }
}
