//! Request handlers for the web UI.
//!
//! Every page is rendered from a fresh registry call. The handlers map a
//! failed call to a notice over the page the user was on, so a flaky
//! registry degrades to messages instead of error pages.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::api::{DocumentService, DownloadedFile};
use crate::chat::ChatTranscript;
use crate::error::ApiError;
use crate::notice::{Locale, Notice};
use crate::search::{SearchOutcome, SearchPresenter};
use crate::state::AppState;
use crate::upload::{FilePart, UploadForm};
use crate::view::{document_cards, document_page, search_results_view, SearchResultsView};

use super::templates;
use super::ServerState;

#[derive(Debug, Deserialize)]
pub struct IndexParams {
    q: Option<String>,
    notice: Option<String>,
}

/// `GET /` renders the document list, or search results when `q` is present.
pub async fn index(
    State(state): State<ServerState>,
    Query(params): Query<IndexParams>,
) -> Html<String> {
    let locale = state.locale;

    let mut session = AppState::new();
    match state.client.list_documents().await {
        Ok(documents) => session.documents_loaded(documents),
        Err(err) => {
            tracing::error!("failed to load the document list: {err}");
            let notice = Notice::error(locale.load_failed());
            return Html(list_page(&session, Some(&notice), locale));
        }
    }

    if let Some(raw) = params.q.as_deref() {
        let presenter = SearchPresenter::new(state.client.as_ref(), locale);
        let page = match presenter.search(&mut session, raw).await {
            SearchOutcome::Results(view) => results_page(&view, locale),
            SearchOutcome::Empty { query } => {
                results_page(&search_results_view(&query, &[]), locale)
            }
            SearchOutcome::Failed(notice) => list_page(&session, Some(&notice), locale),
            SearchOutcome::Reset | SearchOutcome::Superseded => list_page(&session, None, locale),
        };
        return Html(page);
    }

    let notice = match params.notice.as_deref() {
        Some("uploaded") => Some(Notice::success(locale.upload_ok())),
        _ => None,
    };
    Html(list_page(&session, notice.as_ref(), locale))
}

fn list_page(session: &AppState, notice: Option<&Notice>, locale: Locale) -> String {
    let cards = document_cards(session.documents(), locale);
    let stats = session.stats(Local::now().naive_local());
    templates::base_template(
        locale.documents_heading(),
        &templates::document_list_page(&cards, &stats, locale),
        notice,
        locale,
    )
}

fn results_page(view: &SearchResultsView, locale: Locale) -> String {
    templates::base_template(
        locale.search_heading(),
        &templates::search_results_page(view, locale),
        None,
        locale,
    )
}

/// `GET /documents/{id}`
pub async fn document_detail(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Html<String> {
    let locale = state.locale;
    match state.client.get_document(&id).await {
        Ok(document) => {
            let page = document_page(&document, locale);
            let body = templates::document_detail_page(&page, locale);
            Html(templates::base_template(&page.title, &body, None, locale))
        }
        Err(err) => {
            tracing::error!("failed to load document {id}: {err}");
            let notice = Notice::error(locale.detail_failed());
            Html(templates::base_template(
                locale.documents_heading(),
                &templates::back_link(locale),
                Some(&notice),
                locale,
            ))
        }
    }
}

/// `GET /upload`
pub async fn upload_form(State(state): State<ServerState>) -> Html<String> {
    Html(upload_page_with(None, state.locale))
}

/// `POST /upload` receives the browser's multipart form and forwards it.
///
/// Validation failures re-render the form with a notice and never touch the
/// registry.
pub async fn upload_submit(State(state): State<ServerState>, multipart: Multipart) -> Response {
    let locale = state.locale;

    let form = match read_upload_form(multipart).await {
        Ok(form) => form,
        Err(err) => {
            tracing::warn!("unreadable upload form: {err}");
            let notice = Notice::error(locale.upload_failed());
            return Html(upload_page_with(Some(&notice), locale)).into_response();
        }
    };

    let payload = match form.prepare() {
        Ok(payload) => payload,
        Err(err) => {
            let notice = err.notice(locale);
            return Html(upload_page_with(Some(&notice), locale)).into_response();
        }
    };

    match state.client.upload(payload).await {
        Ok(_) => Redirect::to("/?notice=uploaded").into_response(),
        Err(err) => {
            tracing::error!("upload failed: {err}");
            let message = match err.server_message() {
                Some(text) => text.to_string(),
                None => match err {
                    ApiError::Status { .. } => locale.generic_error().to_string(),
                    _ => locale.upload_failed().to_string(),
                },
            };
            let notice = Notice::error(message);
            Html(upload_page_with(Some(&notice), locale)).into_response()
        }
    }
}

fn upload_page_with(notice: Option<&Notice>, locale: Locale) -> String {
    templates::base_template(
        locale.upload_heading(),
        &templates::upload_page(locale),
        notice,
        locale,
    )
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, MultipartError> {
    let mut form = UploadForm::default();
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                form.file = Some(FilePart::new(filename, field.bytes().await?.to_vec()));
            }
            "attachments" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                form.attachments
                    .push(FilePart::new(filename, field.bytes().await?.to_vec()));
            }
            "title" => form.title = field.text().await?,
            "document_type" => form.document_type = field.text().await?,
            "document_number" => form.document_number = field.text().await?,
            "sender" => form.sender = field.text().await?,
            "tags" => form.tags = field.text().await?,
            "priority" => form.priority = field.text().await?,
            _ => {}
        }
    }
    Ok(form)
}

/// A registry failure surfaced as an HTTP status instead of a page.
pub struct ServerError(ApiError);

impl From<ApiError> for ServerError {
    fn from(err: ApiError) -> Self {
        ServerError(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApiError::Status { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, self.0.to_string()).into_response()
    }
}

/// `GET /download/{id}` passes the original file through to the browser.
pub async fn download_document(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let file = state.client.download_document(&id).await?;
    Ok(file_response(file))
}

/// `GET /download/attachment/{id}`
pub async fn download_attachment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
    let file = state.client.download_attachment(&id).await?;
    Ok(file_response(file))
}

fn file_response(file: DownloadedFile) -> (StatusCode, [(String, String); 2], Vec<u8>) {
    let content_type = file
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    let disposition = format!(
        "attachment; filename=\"{}\"",
        file.filename.replace('"', "")
    );
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE.to_string(), content_type),
            (header::CONTENT_DISPOSITION.to_string(), disposition),
        ],
        file.bytes,
    )
}

#[derive(Debug, Deserialize)]
pub struct ChatParams {
    session: Option<Uuid>,
}

/// `GET /chat` shows a session's transcript.
///
/// Rendering stores nothing; a transcript is only kept once a message is
/// posted. An id the store no longer holds is rendered as a fresh greeting
/// under that same id, so bookmarked sessions survive a restart.
pub async fn chat(
    State(state): State<ServerState>,
    Query(params): Query<ChatParams>,
) -> Html<String> {
    let locale = state.locale;

    let body = match params.session {
        Some(id) => match state.sessions().get(&id) {
            Some(transcript) => templates::chat_page(transcript, locale),
            None => templates::chat_page(&ChatTranscript::with_session(id, locale), locale),
        },
        None => templates::chat_page(&ChatTranscript::new(locale), locale),
    };

    Html(templates::base_template(
        locale.chat_heading(),
        &body,
        None,
        locale,
    ))
}

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    session_id: Uuid,
    message: String,
}

/// `POST /chat` records the message, asks the assistant, and redirects back
/// to the transcript.
pub async fn chat_submit(
    State(state): State<ServerState>,
    Form(form): Form<ChatForm>,
) -> Redirect {
    let locale = state.locale;
    let back = format!("/chat?session={}", form.session_id);

    let message = form.message.trim().to_string();
    if message.is_empty() {
        return Redirect::to(&back);
    }

    // Two short locks so the transcript store is free during the request.
    state
        .sessions()
        .open(form.session_id, locale)
        .push_user(&message);

    let reply = state.client.chat(form.session_id, &message).await;

    if let Some(transcript) = state.sessions().get_mut(&form.session_id) {
        match reply {
            Ok(reply) => transcript.push_reply(reply),
            Err(err) => {
                tracing::error!("chat request failed: {err}");
                transcript.push_failure();
            }
        }
    }

    Redirect::to(&back)
}

/// `GET /health` reports this process and the registry behind it.
pub async fn health(State(state): State<ServerState>) -> Json<serde_json::Value> {
    let registry = match state.client.health().await {
        Ok(health) if health.success => "ok",
        Ok(_) => "degraded",
        Err(_) => "unreachable",
    };
    Json(json!({ "status": "ok", "registry": registry }))
}

/// `GET /static/style.css`
pub async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        templates::CSS,
    )
}
