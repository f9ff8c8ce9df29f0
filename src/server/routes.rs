//! URL routing for the web UI.

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::ServerState;

/// Request body cap. The registry accepts uploads up to 50 MB, so the form
/// endpoints must let that much through instead of the extractor default.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Build the application router with all routes and middleware.
pub fn create_router(state: ServerState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/documents/:id", get(handlers::document_detail))
        .route(
            "/upload",
            get(handlers::upload_form).post(handlers::upload_submit),
        )
        .route("/download/:id", get(handlers::download_document))
        .route(
            "/download/attachment/:id",
            get(handlers::download_attachment),
        )
        .route("/chat", get(handlers::chat).post(handlers::chat_submit))
        .route("/health", get(handlers::health))
        .route("/static/style.css", get(handlers::stylesheet))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    use crate::config::Settings;

    fn multipart_upload(filename: &str, payload: &[u8]) -> Request<Body> {
        let boundary = "ddesk-form-boundary";
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(payload);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::builder()
            .method("POST")
            .uri("/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn uploads_larger_than_the_extractor_default_reach_validation() {
        let state = ServerState::new(&Settings::default()).unwrap();
        let app = create_router(state);

        // A 3 MB file would be cut off at the stock 2 MB extractor limit.
        // The disallowed extension proves the form was read in full: the
        // handler got far enough to reject the file type, not the body size.
        let request = multipart_upload("dump.exe", &vec![0u8; 3 * 1024 * 1024]);
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("Loại file không được hỗ trợ"));
    }

    #[tokio::test]
    async fn unknown_routes_fall_through_to_404() {
        let state = ServerState::new(&Settings::default()).unwrap();
        let app = create_router(state);

        let request = Request::builder()
            .uri("/no-such-page")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
