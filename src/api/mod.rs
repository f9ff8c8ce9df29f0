//! Registry API access.

pub mod client;

pub use client::ApiClient;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::models::{
    ChatReply, DocumentSummary, RegistryHealth, RegistryStatistics, SearchResult,
};
use crate::upload::UploadPayload;

/// A downloaded file along with the name the registry suggested for it.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl DownloadedFile {
    /// Write the file into `dir` under its suggested name.
    ///
    /// The name is reduced to its final path component first, so a
    /// suggestion containing separators cannot escape `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> std::io::Result<PathBuf> {
        let candidate = self
            .filename
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();
        let name = match candidate {
            "" | "." | ".." => "download.bin",
            other => other,
        };
        let path = dir.join(name);
        std::fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Everything the UI layers need from the registry.
///
/// [`ApiClient`] is the production implementation; tests substitute their
/// own to exercise presentation flows without a registry.
#[async_trait]
pub trait DocumentService: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> ApiResult<RegistryHealth>;

    /// `GET /documents`
    async fn list_documents(&self) -> ApiResult<Vec<DocumentSummary>>;

    /// `POST /search`
    async fn search(&self, query: &str) -> ApiResult<Vec<SearchResult>>;

    /// `GET /documents/{id}`
    async fn get_document(&self, id: &str) -> ApiResult<DocumentSummary>;

    /// `POST /upload` as multipart form data.
    async fn upload(&self, payload: UploadPayload) -> ApiResult<Option<DocumentSummary>>;

    /// `GET /download/{id}`
    async fn download_document(&self, id: &str) -> ApiResult<DownloadedFile>;

    /// `GET /download/attachment/{id}`
    async fn download_attachment(&self, id: &str) -> ApiResult<DownloadedFile>;

    /// `POST /chat`
    async fn chat(&self, session_id: Uuid, message: &str) -> ApiResult<ChatReply>;

    /// `GET /statistics`
    async fn statistics(&self) -> ApiResult<RegistryStatistics>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggested_names_cannot_escape_the_target_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = DownloadedFile {
            filename: "../../../etc/passwd".to_string(),
            content_type: None,
            bytes: b"x".to_vec(),
        };
        let path = file.write_to_dir(dir.path()).unwrap();
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(path.file_name().unwrap(), "passwd");
    }

    #[test]
    fn unusable_names_fall_back_to_a_default() {
        let dir = tempfile::tempdir().unwrap();
        let file = DownloadedFile {
            filename: "..".to_string(),
            content_type: None,
            bytes: b"data".to_vec(),
        };
        let path = file.write_to_dir(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "download.bin");
        assert_eq!(std::fs::read(path).unwrap(), b"data");
    }

    #[test]
    fn plain_names_are_kept() {
        let dir = tempfile::tempdir().unwrap();
        let file = DownloadedFile {
            filename: "cong-van-15.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            bytes: vec![1, 2, 3],
        };
        let path = file.write_to_dir(dir.path()).unwrap();
        assert_eq!(path.file_name().unwrap(), "cong-van-15.pdf");
    }
}
