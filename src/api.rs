//! HTTP surface for the Veris backend.
//!
//! This module exposes a compact Axum router with the two pipeline endpoints
//! plus a greeting and a metrics probe:
//!
//! - `POST /api/upload` – Accept one multipart `file` field, detect its format
//!   (PDF or DOCX), and return the normalized text with metadata (`filename`,
//!   `filetype`, `text`, `pages`). `pages` is present for PDFs and `null`
//!   otherwise.
//! - `POST /api/summarize` – Accept `{text, jurisdiction}` and return
//!   `{summary, clauses}` from the generation backend. `clauses` is always an
//!   array, never `null`.
//! - `GET /` – Greeting message for quick liveness checks.
//! - `GET /metrics` – Observe extraction and summarization counters.
//!
//! Every failure maps to a JSON `{detail}` body with a status class matching
//! the error: client errors for malformed or missing input, server errors
//! (with a `retryable` flag) when the generation backend is unavailable.

use crate::config::get_config;
use crate::extraction::{ExtractionError, Filetype};
use crate::metrics::MetricsSnapshot;
use crate::pipeline::{ClauseRecord, PipelineApi, SummarizeError};
use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, rejection::JsonRejection},
    http::{HeaderValue, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http_body_util::LengthLimitError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, CorsLayer};

// Slack on top of the configured cap so the multipart framing itself never
// triggers the transport-level limit before the explicit size check runs.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Build the HTTP router exposing the ingestion API surface.
pub fn create_router<S>(service: Arc<S>) -> Router
where
    S: PipelineApi + 'static,
{
    let config = get_config();
    Router::new()
        .route("/", get(root))
        .route("/api/upload", post(upload_document::<S>))
        .route("/api/summarize", post(summarize_document::<S>))
        .route("/metrics", get(get_metrics::<S>))
        .layer(DefaultBodyLimit::max(
            config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
        ))
        .layer(cors_layer(&config.cors_allowed_origins))
        .with_state(service)
}

/// CORS policy for the browser frontend: explicit origins, the two methods the
/// API serves, and the headers the dev frontend sends.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}

/// Greeting body returned at the service root.
#[derive(Serialize)]
struct RootResponse {
    message: &'static str,
}

/// Return the service greeting.
async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Welcome to Veris – Your AI Legal Assistant",
    })
}

/// Success response for `POST /api/upload`.
#[derive(Serialize)]
struct UploadResponse {
    /// Filename as declared by the client.
    filename: String,
    /// Detected document format.
    filetype: Filetype,
    /// Normalized extracted text; empty when no text layer exists.
    text: String,
    /// Physical page count for PDFs, `null` for DOCX.
    pages: Option<usize>,
}

/// Accept one uploaded document and return its extracted text.
///
/// The file travels as the multipart field `file`. The upload buffer is owned
/// by this request and dropped once extraction finishes, success or not.
async fn upload_document<S>(
    State(service): State<Arc<S>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError>
where
    S: PipelineApi,
{
    let limit = get_config().max_upload_bytes;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| multipart_error(error, limit))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let filename = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|error| multipart_error(error, limit))?;
        upload = Some((filename, data.to_vec()));
    }

    let (filename, data) = upload.ok_or(AppError::MissingFile)?;
    if data.len() > limit {
        return Err(AppError::PayloadTooLarge { limit });
    }

    let extracted = service.extract_document(data, filename.clone()).await?;
    tracing::info!(
        filename = %filename,
        filetype = ?extracted.filetype,
        pages = ?extracted.pages,
        "Upload request completed"
    );
    Ok(Json(UploadResponse {
        filename,
        filetype: extracted.filetype,
        text: extracted.text,
        pages: extracted.pages,
    }))
}

/// Request body for `POST /api/summarize`.
#[derive(Deserialize)]
struct SummarizeRequest {
    /// Normalized document text to summarize.
    text: String,
    /// Optional jurisdiction label, forwarded verbatim (defaults to "General").
    #[serde(default)]
    jurisdiction: Option<String>,
}

/// Success response for `POST /api/summarize`.
#[derive(Serialize)]
struct SummarizeResponse {
    /// Plain-language summary of the document.
    summary: String,
    /// Ordered clause records; empty when none were identified.
    clauses: Vec<ClauseRecord>,
}

/// Summarize previously extracted text under a jurisdiction label.
///
/// The request body is deserialized by hand so that malformed JSON and missing
/// fields also answer with the `{detail}` error shape instead of the
/// extractor's plain-text default.
async fn summarize_document<S>(
    State(service): State<Arc<S>>,
    payload: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, AppError>
where
    S: PipelineApi,
{
    let Json(request) = payload.map_err(|rejection| AppError::InvalidBody {
        status: rejection.status(),
        message: rejection.body_text(),
    })?;
    let result = service
        .summarize(&request.text, request.jurisdiction.as_deref())
        .await?;
    tracing::info!(
        jurisdiction = request.jurisdiction.as_deref().unwrap_or("General"),
        clauses = result.clauses.len(),
        "Summarize request completed"
    );
    Ok(Json(SummarizeResponse {
        summary: result.summary,
        clauses: result.clauses,
    }))
}

/// Return a concise metrics snapshot with pipeline counters.
async fn get_metrics<S>(State(service): State<Arc<S>>) -> Json<MetricsSnapshot>
where
    S: PipelineApi,
{
    Json(service.metrics_snapshot())
}

/// Gateway-level failures mapped onto HTTP responses.
enum AppError {
    /// Multipart payload carried no `file` field.
    MissingFile,
    /// Uploaded document exceeds the configured cap.
    PayloadTooLarge { limit: usize },
    /// Multipart payload could not be read.
    BadMultipart(String),
    /// Request body failed JSON deserialization.
    InvalidBody {
        status: StatusCode,
        message: String,
    },
    /// Extraction rejected or failed on the document.
    Extraction(ExtractionError),
    /// Summarization rejected the input or lost the backend.
    Summarize(SummarizeError),
}

/// Translate a multipart read failure, surfacing the transport body limit as
/// a payload error rather than a generic parse failure.
fn multipart_error(error: axum::extract::multipart::MultipartError, limit: usize) -> AppError {
    if hit_length_limit(&error) {
        AppError::PayloadTooLarge { limit }
    } else {
        AppError::BadMultipart(error.to_string())
    }
}

// The body limit never appears in the multipart error's display text; it is a
// `LengthLimitError` buried in the source chain.
fn hit_length_limit(error: &dyn std::error::Error) -> bool {
    let mut source = error.source();
    while let Some(inner) = source {
        if inner.is::<LengthLimitError>() {
            return true;
        }
        source = inner.source();
    }
    false
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail, retryable) = match self {
            Self::MissingFile => (
                StatusCode::BAD_REQUEST,
                "No file was provided; upload a PDF or DOCX document.".to_string(),
                None,
            ),
            Self::PayloadTooLarge { limit } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Uploaded file exceeds the maximum size of {limit} bytes."),
                None,
            ),
            Self::BadMultipart(message) => (
                StatusCode::BAD_REQUEST,
                format!("Could not read the uploaded form data: {message}"),
                None,
            ),
            Self::InvalidBody { status, message } => (status, message, None),
            Self::Extraction(error @ ExtractionError::UnsupportedFormat { .. }) => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, error.to_string(), None)
            }
            Self::Extraction(error @ ExtractionError::ExtractionFailed { .. }) => {
                (StatusCode::UNPROCESSABLE_ENTITY, error.to_string(), None)
            }
            Self::Summarize(SummarizeError::EmptyInput) => (
                StatusCode::BAD_REQUEST,
                "Document text is empty; nothing to summarize.".to_string(),
                None,
            ),
            Self::Summarize(error @ SummarizeError::ServiceUnavailable { retryable, .. }) => {
                let status = if retryable {
                    StatusCode::SERVICE_UNAVAILABLE
                } else {
                    StatusCode::BAD_GATEWAY
                };
                (status, error.to_string(), Some(retryable))
            }
        };

        let mut body = json!({ "detail": detail });
        if let Some(retryable) = retryable {
            body["retryable"] = json!(retryable);
        }
        (status, Json(body)).into_response()
    }
}

impl From<ExtractionError> for AppError {
    fn from(inner: ExtractionError) -> Self {
        Self::Extraction(inner)
    }
}

impl From<SummarizeError> for AppError {
    fn from(inner: SummarizeError) -> Self {
        Self::Summarize(inner)
    }
}

#[cfg(test)]
mod tests {
    use super::create_router;
    use crate::config::{CONFIG, Config};
    use crate::extraction::{ExtractedText, ExtractionError, Filetype};
    use crate::metrics::MetricsSnapshot;
    use crate::pipeline::{ClauseRecord, PipelineApi, SummarizationResult, SummarizeError};
    use async_trait::async_trait;
    use axum::{
        body::{Body, to_bytes},
        http::{Method, Request, StatusCode},
    };
    use serde_json::json;
    use std::sync::{Arc, Once};
    use tokio::sync::Mutex;
    use tower::ServiceExt;

    const BOUNDARY: &str = "veris-test-boundary";

    fn multipart_body(field_name: &str, filename: &str, data: &[u8]) -> Vec<u8> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field_name}\"; \
                 filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn upload_request(field_name: &str, filename: &str, data: &[u8]) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/api/upload")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(field_name, filename, data)))
            .expect("request")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    #[derive(Clone, Debug)]
    struct SummarizeCall {
        text: String,
        jurisdiction: Option<String>,
    }

    struct StubPipelineService {
        extract_result: Result<ExtractedText, ExtractionError>,
        summarize_result: Result<SummarizationResult, SummarizeError>,
        summarize_calls: Arc<Mutex<Vec<SummarizeCall>>>,
    }

    impl StubPipelineService {
        fn new() -> Self {
            Self {
                extract_result: Ok(ExtractedText {
                    text: "Tenant shall pay rent monthly.".into(),
                    filetype: Filetype::Pdf,
                    pages: Some(2),
                }),
                summarize_result: Ok(SummarizationResult {
                    summary: "A lease.".into(),
                    clauses: vec![ClauseRecord {
                        clause_type: "Payment".into(),
                        snippet: "Tenant shall pay rent monthly.".into(),
                    }],
                }),
                summarize_calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn with_extract(mut self, result: Result<ExtractedText, ExtractionError>) -> Self {
            self.extract_result = result;
            self
        }

        fn with_summarize(mut self, result: Result<SummarizationResult, SummarizeError>) -> Self {
            self.summarize_result = result;
            self
        }
    }

    fn clone_extract(
        result: &Result<ExtractedText, ExtractionError>,
    ) -> Result<ExtractedText, ExtractionError> {
        match result {
            Ok(extracted) => Ok(extracted.clone()),
            Err(ExtractionError::UnsupportedFormat { extension }) => {
                Err(ExtractionError::UnsupportedFormat {
                    extension: extension.clone(),
                })
            }
            Err(ExtractionError::ExtractionFailed { filename, cause }) => {
                Err(ExtractionError::ExtractionFailed {
                    filename: filename.clone(),
                    cause: cause.clone(),
                })
            }
        }
    }

    fn clone_summarize(
        result: &Result<SummarizationResult, SummarizeError>,
    ) -> Result<SummarizationResult, SummarizeError> {
        match result {
            Ok(value) => Ok(value.clone()),
            Err(SummarizeError::EmptyInput) => Err(SummarizeError::EmptyInput),
            Err(SummarizeError::ServiceUnavailable { message, retryable }) => {
                Err(SummarizeError::ServiceUnavailable {
                    message: message.clone(),
                    retryable: *retryable,
                })
            }
        }
    }

    #[async_trait]
    impl PipelineApi for StubPipelineService {
        async fn extract_document(
            &self,
            _raw: Vec<u8>,
            _filename: String,
        ) -> Result<ExtractedText, ExtractionError> {
            clone_extract(&self.extract_result)
        }

        async fn summarize(
            &self,
            text: &str,
            jurisdiction: Option<&str>,
        ) -> Result<SummarizationResult, SummarizeError> {
            self.summarize_calls.lock().await.push(SummarizeCall {
                text: text.to_string(),
                jurisdiction: jurisdiction.map(str::to_string),
            });
            clone_summarize(&self.summarize_result)
        }

        fn metrics_snapshot(&self) -> MetricsSnapshot {
            MetricsSnapshot {
                documents_extracted: 3,
                pages_extracted: 7,
                summaries_generated: 2,
            }
        }
    }

    fn ensure_test_config() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            let _ = CONFIG.set(Config {
                summary_model: "test-model".into(),
                ollama_url: None,
                max_upload_bytes: 1024,
                generation_timeout_secs: 5,
                cors_allowed_origins: vec!["http://localhost:5173".into()],
                server_port: None,
            });
        });
    }

    #[tokio::test]
    async fn root_returns_greeting() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["message"].as_str().expect("message").contains("Veris"));
    }

    #[tokio::test]
    async fn upload_returns_extraction_metadata() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let response = app
            .oneshot(upload_request("file", "lease.pdf", b"%PDF-stub"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["filename"], "lease.pdf");
        assert_eq!(body["filetype"], "pdf");
        assert_eq!(body["pages"], 2);
        assert_eq!(body["text"], "Tenant shall pay rent monthly.");
    }

    #[tokio::test]
    async fn upload_without_file_field_is_rejected() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let response = app
            .oneshot(upload_request("attachment", "lease.pdf", b"%PDF-stub"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("No file"));
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let oversized = vec![0u8; 4096];
        let response = app
            .oneshot(upload_request("file", "lease.pdf", &oversized))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("maximum size"));
    }

    #[tokio::test]
    async fn upload_beyond_transport_limit_is_rejected() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        // Far past the configured cap plus the transport slack, so the body
        // limit trips before the explicit size check can run.
        let oversized = vec![0u8; 256 * 1024];
        let response = app
            .oneshot(upload_request("file", "huge.pdf", &oversized))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("maximum size"));
    }

    #[tokio::test]
    async fn summarize_missing_text_field_answers_with_detail_body() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"jurisdiction": "Nepal"}).to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("text"));
    }

    #[tokio::test]
    async fn summarize_malformed_json_answers_with_detail_body() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn unsupported_format_maps_to_client_error() {
        ensure_test_config();
        let service = StubPipelineService::new().with_extract(Err(
            ExtractionError::UnsupportedFormat {
                extension: "txt".into(),
            },
        ));
        let app = create_router(Arc::new(service));
        let response = app
            .oneshot(upload_request("file", "notes.txt", b"plain text"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("txt"));
    }

    #[tokio::test]
    async fn extraction_failure_maps_to_unprocessable() {
        ensure_test_config();
        let service =
            StubPipelineService::new().with_extract(Err(ExtractionError::ExtractionFailed {
                filename: "broken.pdf".into(),
                cause: "invalid xref".into(),
            }));
        let app = create_router(Arc::new(service));
        let response = app
            .oneshot(upload_request("file", "broken.pdf", b"%PDF-junk"))
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = json_body(response).await;
        assert!(body["detail"]
            .as_str()
            .expect("detail")
            .contains("broken.pdf"));
    }

    #[tokio::test]
    async fn summarize_returns_summary_and_clauses() {
        ensure_test_config();
        let service = StubPipelineService::new();
        let calls = Arc::clone(&service.summarize_calls);
        let app = create_router(Arc::new(service));
        let payload = json!({
            "text": "Tenant shall pay rent monthly.",
            "jurisdiction": "Nepal"
        });
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(payload.to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["summary"], "A lease.");
        assert!(body["clauses"].is_array());
        assert_eq!(body["clauses"][0]["type"], "Payment");
        assert_eq!(
            body["clauses"][0]["snippet"],
            "Tenant shall pay rent monthly."
        );

        let calls = calls.lock().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].text, "Tenant shall pay rent monthly.");
        assert_eq!(calls[0].jurisdiction.as_deref(), Some("Nepal"));
    }

    #[tokio::test]
    async fn summarize_without_jurisdiction_passes_none() {
        ensure_test_config();
        let service = StubPipelineService::new();
        let calls = Arc::clone(&service.summarize_calls);
        let app = create_router(Arc::new(service));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"text": "some text"}).to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let calls = calls.lock().await;
        assert_eq!(calls[0].jurisdiction, None);
    }

    #[tokio::test]
    async fn empty_text_maps_to_bad_request() {
        ensure_test_config();
        let service = StubPipelineService::new().with_summarize(Err(SummarizeError::EmptyInput));
        let app = create_router(Arc::new(service));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"text": "   "}).to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = json_body(response).await;
        assert!(body["detail"].as_str().expect("detail").contains("empty"));
    }

    #[tokio::test]
    async fn retryable_outage_maps_to_service_unavailable() {
        ensure_test_config();
        let service =
            StubPipelineService::new().with_summarize(Err(SummarizeError::ServiceUnavailable {
                message: "backend timed out".into(),
                retryable: true,
            }));
        let app = create_router(Arc::new(service));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"text": "lease text"}).to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = json_body(response).await;
        assert_eq!(body["retryable"], true);
        assert!(body["detail"].as_str().expect("detail").contains("timed out"));
    }

    #[tokio::test]
    async fn permanent_outage_maps_to_bad_gateway() {
        ensure_test_config();
        let service =
            StubPipelineService::new().with_summarize(Err(SummarizeError::ServiceUnavailable {
                message: "backend rejected the request".into(),
                retryable: false,
            }));
        let app = create_router(Arc::new(service));
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/summarize")
                    .header("content-type", "application/json")
                    .body(Body::from(json!({"text": "lease text"}).to_string()))
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = json_body(response).await;
        assert_eq!(body["retryable"], false);
    }

    #[tokio::test]
    async fn metrics_expose_pipeline_counters() {
        ensure_test_config();
        let app = create_router(Arc::new(StubPipelineService::new()));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/metrics")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("router response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["documents_extracted"], 3);
        assert_eq!(body["pages_extracted"], 7);
        assert_eq!(body["summaries_generated"], 2);
    }
}
