//! HTTP Routes
//!
//! API Endpoints:
//! - /file-upload       POST  上传音频（multipart 字段 `file`），返回转写文本
//! - /text-translate    POST  翻译文本
//! - /text-answer       POST  抽取式问答
//! - /text-summarize    POST  生成摘要
//! - /ping              GET   健康检查

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/file-upload", post(handlers::file_upload))
        .route("/text-translate", post(handlers::translate))
        .route("/text-answer", post(handlers::answer))
        .route("/text-summarize", post(handlers::summarize))
        .route("/ping", get(handlers::ping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::path::Path;
    use tempfile::{tempdir, TempDir};
    use tower::util::ServiceExt;

    use crate::application::{AudioInput, InferenceError, InferencePipelines, Pipeline};
    use crate::domain::upload::UploadPolicy;
    use crate::infrastructure::adapters::{
        FakeAsrPipeline, FakeQaPipeline, FakeSummarizationPipeline, FakeTranslationPipeline,
        FileUploadStorage,
    };
    use crate::infrastructure::http::build_router;

    const BOUNDARY: &str = "voxgate-test-boundary";

    struct TestApp {
        router: Router,
        upload_dir: TempDir,
    }

    impl TestApp {
        fn upload_count(&self) -> usize {
            std::fs::read_dir(self.upload_dir.path()).unwrap().count()
        }
    }

    fn fake_pipelines() -> InferencePipelines {
        InferencePipelines {
            asr: Arc::new(FakeAsrPipeline::default()),
            translation: Arc::new(FakeTranslationPipeline::default()),
            qa: Arc::new(FakeQaPipeline::default()),
            summarization: Arc::new(FakeSummarizationPipeline::default()),
        }
    }

    async fn test_app_with(pipelines: InferencePipelines, max_upload_size: u64) -> TestApp {
        let upload_dir = tempdir().unwrap();
        let storage = Arc::new(FileUploadStorage::new(upload_dir.path()).await.unwrap());
        let state = AppState::new(
            pipelines,
            storage,
            UploadPolicy::new(["wav", "mp3"], max_upload_size),
        );
        let router = build_router(Arc::new(state));
        TestApp { router, upload_dir }
    }

    async fn test_app() -> TestApp {
        test_app_with(fake_pipelines(), 16 * 1024 * 1024).await
    }

    fn multipart_body(field: &str, filename: Option<&str>, content: &[u8]) -> Vec<u8> {
        let disposition = match filename {
            Some(name) => format!("form-data; name=\"{}\"; filename=\"{}\"", field, name),
            None => format!("form-data; name=\"{}\"", field),
        };
        let mut body = format!(
            "--{}\r\nContent-Disposition: {}\r\nContent-Type: application/octet-stream\r\n\r\n",
            BOUNDARY, disposition
        )
        .into_bytes();
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(body: Vec<u8>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/file-upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    // ------------------------------------------------------------------------
    // /file-upload
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_upload_transcribes_and_cleans_up() {
        let app = test_app().await;
        let body = multipart_body("file", Some("speech.wav"), b"RIFF....WAVE");

        let (status, body) = send(&app, upload_request(body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "HELLO WORLD" }));
        assert_eq!(app.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_rejects_invalid_file_types() {
        let app = test_app().await;

        for name in ["notes.txt", "speech", "speech.wav.exe", "image.PNG"] {
            let body = multipart_body("file", Some(name), b"data");
            let (status, body) = send(&app, upload_request(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
            assert_eq!(body, json!({ "error": "Invalid file type" }), "{name}");
        }
        assert_eq!(app.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_accepts_uppercase_mp3() {
        let app = test_app().await;
        let body = multipart_body("file", Some("SONG.MP3"), b"ID3");

        let (status, _) = send(&app, upload_request(body)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_upload_empty_filename() {
        let app = test_app().await;
        let body = multipart_body("file", Some(""), b"");

        let (status, body) = send(&app, upload_request(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No selected file" }));
    }

    #[tokio::test]
    async fn test_upload_without_file_part() {
        let app = test_app().await;

        let body = multipart_body("audio", Some("speech.wav"), b"data");
        let (status, body) = send(&app, upload_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file part" }));

        // 没有文件名的 file 字段是普通表单字段
        let body = multipart_body("file", None, b"plain text");
        let (status, body) = send(&app, upload_request(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file part" }));

        let (status, body) = send(&app, json_request("/file-upload", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No file part" }));
    }

    #[tokio::test]
    async fn test_upload_too_large() {
        let app = test_app_with(fake_pipelines(), 1024).await;
        let body = multipart_body("file", Some("speech.wav"), &vec![0u8; 4096]);

        let (status, body) = send(&app, upload_request(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "error": "File too large" }));
        assert_eq!(app.upload_count(), 0);
    }

    #[tokio::test]
    async fn test_upload_at_exact_limit_hits_body_limit() {
        // 上限作用于整个请求体，multipart 分隔符也计入
        let app = test_app_with(fake_pipelines(), 1024).await;
        let body = multipart_body("file", Some("a.wav"), &vec![0u8; 1024]);

        let (status, body) = send(&app, upload_request(body)).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(body, json!({ "error": "File too large" }));
        assert_eq!(app.upload_count(), 0);
    }

    struct BrokenAsr;

    #[async_trait]
    impl Pipeline<AudioInput> for BrokenAsr {
        async fn run(&self, input: AudioInput) -> Result<String, InferenceError> {
            assert!(Path::new(&input.path).exists());
            Err(InferenceError::Unavailable("model service down".into()))
        }

        fn model_id(&self) -> &str {
            "broken-asr"
        }
    }

    #[tokio::test]
    async fn test_upload_removed_when_inference_fails() {
        let pipelines = InferencePipelines {
            asr: Arc::new(BrokenAsr),
            ..fake_pipelines()
        };
        let app = test_app_with(pipelines, 1024).await;
        let body = multipart_body("file", Some("speech.wav"), b"RIFF");

        let (status, body) = send(&app, upload_request(body)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(body["error"].as_str().unwrap().contains("model service down"));
        assert_eq!(app.upload_count(), 0);
    }

    // ------------------------------------------------------------------------
    // /text-*
    // ------------------------------------------------------------------------

    #[tokio::test]
    async fn test_translate() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            json_request("/text-translate", json!({ "text": "good morning" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "good morning" }));

        let (status, body) = send(&app, json_request("/text-translate", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No text provided" }));
    }

    #[tokio::test]
    async fn test_answer_missing_context() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            json_request("/text-answer", json!({ "question": "Who spoke?" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No context provided" }));
    }

    #[tokio::test]
    async fn test_answer_missing_question() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            json_request("/text-answer", json!({ "text": "Alice spoke first." })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No question provided" }));

        let (_, body) = send(&app, json_request("/text-answer", json!({}))).await;
        assert_eq!(body, json!({ "error": "No question provided" }));
    }

    #[tokio::test]
    async fn test_answer() {
        let app = test_app().await;
        let (status, body) = send(
            &app,
            json_request(
                "/text-answer",
                json!({
                    "text": "Alice spoke first. Bob closed the meeting.",
                    "question": "Who closed the meeting?"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "result": "Bob closed the meeting." }));
    }

    #[tokio::test]
    async fn test_summarize_long_passage() {
        let app = test_app().await;
        let passage = "The committee met on Tuesday to review the annual budget. \
            Several members raised concerns about rising maintenance costs. \
            After a long discussion, the committee agreed to postpone the vote. \
            A revised proposal will be presented at the next meeting in March. \
            Members were asked to submit written comments before the end of the month.";

        let (status, body) =
            send(&app, json_request("/text-summarize", json!({ "text": passage }))).await;

        assert_eq!(status, StatusCode::OK);
        let summary = body["result"].as_str().unwrap();
        assert!(!summary.is_empty());
        assert!(summary.len() < passage.len());
    }

    #[tokio::test]
    async fn test_summarize_whitespace_text() {
        let app = test_app().await;

        let (status, body) =
            send(&app, json_request("/text-summarize", json!({ "text": "   " }))).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "No text provided" }));
    }

    #[tokio::test]
    async fn test_invalid_json_body() {
        let app = test_app().await;
        let request = Request::builder()
            .method("POST")
            .uri("/text-summarize")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON body"));

        let (status, _) = send(&app, json_request("/text-translate", json!({ "text": 42 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app().await;
        let request = Request::builder()
            .uri("/ping")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["models"]["qa"], "fake-qa");
    }
}
