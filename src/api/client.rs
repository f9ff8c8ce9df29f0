//! HTTP client for the dispatch-registry API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;
use uuid::Uuid;

use super::{DocumentService, DownloadedFile};
use crate::config::Settings;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    ChatReply, DocumentEnvelope, DocumentListEnvelope, DocumentSummary, ErrorBody, RegistryHealth,
    RegistryStatistics, SearchEnvelope, SearchResult, StatisticsEnvelope, UploadEnvelope,
};
use crate::upload::{FilePart, UploadPayload};

/// Client for one registry instance.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client from the configured settings. Fails when the base
    /// URL does not parse; the registry itself is not contacted.
    pub fn new(settings: &Settings) -> ApiResult<Self> {
        let base_url = settings.api_base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| ApiError::BaseUrl {
            url: base_url.clone(),
            message: err.to_string(),
        })?;

        let client = Client::builder()
            .user_agent(&settings.user_agent)
            .timeout(Duration::from_secs(settings.request_timeout))
            .gzip(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::from_request(path, err))?;
        Self::decode(path, response).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let url = self.url(path);
        debug!("POST {url}");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| ApiError::from_request(path, err))?;
        Self::decode(path, response).await
    }

    /// Turn a response into `T`, or into the error the registry described.
    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }
        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::from_request(path, err))
    }

    /// Best-effort extraction of the `{ "error": ... }` body text.
    async fn error_message(response: Response) -> Option<String> {
        let text = response.text().await.ok()?;
        serde_json::from_str::<ErrorBody>(&text)
            .ok()
            .and_then(|body| body.error)
    }

    async fn download(&self, path: &str, fallback_name: String) -> ApiResult<DownloadedFile> {
        let url = self.url(path);
        debug!("GET {url}");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| ApiError::from_request(path, err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                message: Self::error_message(response).await,
            });
        }

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_disposition_filename)
            .unwrap_or(fallback_name);
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ApiError::from_request(path, err))?
            .to_vec();

        Ok(DownloadedFile {
            filename,
            content_type,
            bytes,
        })
    }

    fn multipart_file(part: FilePart) -> Part {
        let mime = mime_guess::from_path(&part.filename).first_or_octet_stream();
        Part::bytes(part.bytes)
            .file_name(part.filename)
            .mime_str(mime.essence_str())
            .expect("mime_guess produces valid mime strings")
    }
}

#[async_trait]
impl DocumentService for ApiClient {
    async fn health(&self) -> ApiResult<RegistryHealth> {
        self.get_json("/health").await
    }

    async fn list_documents(&self) -> ApiResult<Vec<DocumentSummary>> {
        let envelope: DocumentListEnvelope = self.get_json("/documents").await?;
        Ok(envelope.documents)
    }

    async fn search(&self, query: &str) -> ApiResult<Vec<SearchResult>> {
        let envelope: SearchEnvelope = self
            .post_json("/search", &serde_json::json!({ "query": query }))
            .await?;
        Ok(envelope.results)
    }

    async fn get_document(&self, id: &str) -> ApiResult<DocumentSummary> {
        let path = format!("/documents/{}", urlencoding::encode(id));
        let envelope: DocumentEnvelope = self.get_json(&path).await?;
        Ok(envelope.document)
    }

    async fn upload(&self, payload: UploadPayload) -> ApiResult<Option<DocumentSummary>> {
        let path = "/upload";
        let url = self.url(path);
        debug!("POST {url} (multipart)");

        let mut form = Form::new()
            .part("file", Self::multipart_file(payload.file))
            .text("title", payload.title)
            .text("document_type", payload.document_type)
            .text("document_number", payload.document_number)
            .text("sender", payload.sender);
        if !payload.tags.is_empty() {
            form = form.text("tags", payload.tags);
        }
        if !payload.priority.is_empty() {
            form = form.text("priority", payload.priority);
        }
        for attachment in payload.attachments {
            form = form.part("attachments", Self::multipart_file(attachment));
        }

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|err| ApiError::from_request(path, err))?;
        let envelope: UploadEnvelope = Self::decode(path, response).await?;
        Ok(envelope.document)
    }

    async fn download_document(&self, id: &str) -> ApiResult<DownloadedFile> {
        let path = format!("/download/{}", urlencoding::encode(id));
        self.download(&path, format!("document-{id}")).await
    }

    async fn download_attachment(&self, id: &str) -> ApiResult<DownloadedFile> {
        let path = format!("/download/attachment/{}", urlencoding::encode(id));
        self.download(&path, format!("attachment-{id}")).await
    }

    async fn chat(&self, session_id: Uuid, message: &str) -> ApiResult<ChatReply> {
        self.post_json(
            "/chat",
            &serde_json::json!({
                "message": message,
                "session_id": session_id.to_string(),
            }),
        )
        .await
    }

    async fn statistics(&self) -> ApiResult<RegistryStatistics> {
        let envelope: StatisticsEnvelope = self.get_json("/statistics").await?;
        Ok(envelope.statistics)
    }
}

/// Parse a filename out of a Content-Disposition header value.
/// Handles both `filename="name.pdf"` and RFC 5987 `filename*=UTF-8''name.pdf`.
pub fn parse_content_disposition_filename(header: &str) -> Option<String> {
    // Try filename*= first (RFC 5987 encoded)
    if let Some(start) = header.find("filename*=") {
        let rest = &header[start + 10..];
        if let Some(quote_start) = rest.find("''") {
            let encoded = rest[quote_start + 2..].split([';', ' ']).next()?;
            if let Ok(decoded) = urlencoding::decode(encoded) {
                let filename = decoded.trim().to_string();
                if !filename.is_empty() {
                    return Some(filename);
                }
            }
        }
    }

    // Try filename= (standard format)
    if let Some(start) = header.find("filename=") {
        let rest = &header[start + 9..];
        let filename = if let Some(quoted) = rest.strip_prefix('"') {
            quoted.split('"').next()
        } else {
            rest.split([';', ' ']).next()
        };

        if let Some(name) = filename {
            let name = name.trim().to_string();
            if !name.is_empty() {
                return Some(name);
            }
        }
    }

    None
}
