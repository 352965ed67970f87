//! HTTP Pipelines - 调用外部模型服务
//!
//! 实现 Pipeline trait，通过 HTTP 调用 Hugging Face inference 协议的模型服务
//!
//! 外部 API:
//! POST {base_url}/models/{model_id}
//! - ASR:  音频二进制 (audio/wav | audio/mpeg) -> {"text": "..."}
//! - 翻译: {"inputs": "..."} -> [{"translation_text": "..."}]
//! - 摘要: {"inputs": "..."} -> [{"summary_text": "..."}]
//! - 问答: {"inputs": {"question": "...", "context": "..."}} -> {"answer": "...", "score": 0.9}
//! GET {base_url}/health

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    AudioInput, Device, InferenceError, Pipeline, QuestionInput, TextInput,
};

/// 推理设备请求头
pub const DEVICE_HEADER: &str = "X-Inference-Device";
/// ASR 目标语言请求头
pub const LANGUAGE_HEADER: &str = "X-Inference-Language";

/// HTTP 推理客户端配置
#[derive(Debug, Clone)]
pub struct HttpInferenceClientConfig {
    /// 模型服务基础 URL
    pub base_url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
}

impl Default for HttpInferenceClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_secs: 120,
        }
    }
}

impl HttpInferenceClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// HTTP 推理客户端，所有管线共享同一个连接池
pub struct HttpInferenceClient {
    client: Client,
    config: HttpInferenceClientConfig,
}

impl HttpInferenceClient {
    pub fn new(config: HttpInferenceClientConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InferenceError::Unavailable(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// 获取模型推理 URL
    fn model_url(&self, model_id: &str) -> String {
        format!(
            "{}/models/{}",
            self.config.base_url.trim_end_matches('/'),
            model_id
        )
    }

    /// 获取健康检查 URL
    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }

    async fn send<R: DeserializeOwned>(
        &self,
        model_id: &str,
        request: RequestBuilder,
    ) -> Result<R, InferenceError> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout
            } else if e.is_connect() {
                InferenceError::Unavailable(format!("Cannot connect to model service: {}", e))
            } else {
                InferenceError::Unavailable(e.to_string())
            }
        })?;

        Self::parse_response(model_id, response).await
    }

    async fn parse_response<R: DeserializeOwned>(
        model_id: &str,
        response: Response,
    ) -> Result<R, InferenceError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(InferenceError::ServiceError(format!(
                "{} returned HTTP {}: {}",
                model_id, status, error_text
            )));
        }

        response.json::<R>().await.map_err(|e| {
            if e.is_timeout() {
                InferenceError::Timeout
            } else {
                InferenceError::InvalidResponse(format!("{}: {}", model_id, e))
            }
        })
    }

    pub async fn post_json<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        model_id: &str,
        body: &B,
    ) -> Result<R, InferenceError> {
        let url = self.model_url(model_id);
        tracing::debug!(url = %url, "Sending inference request");
        self.send(model_id, self.client.post(&url).json(body)).await
    }

    pub async fn post_audio<R: DeserializeOwned>(
        &self,
        model_id: &str,
        audio: Vec<u8>,
        content_type: &str,
        headers: &[(&str, String)],
    ) -> Result<R, InferenceError> {
        let url = self.model_url(model_id);
        tracing::debug!(url = %url, audio_size = audio.len(), "Sending audio inference request");

        let mut request = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(audio);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }

        self.send(model_id, request).await
    }

    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(self.health_url())
            .timeout(Duration::from_secs(5))
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct InputsBody<'a, T: Serialize> {
    inputs: &'a T,
}

#[derive(Debug, Serialize)]
struct QaInputs<'a> {
    question: &'a str,
    context: &'a str,
}

#[derive(Debug, Deserialize)]
struct AsrOutput {
    text: String,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Debug, Deserialize)]
struct QaOutput {
    answer: String,
    #[serde(default)]
    score: Option<f64>,
}

/// 模型服务有时返回单个对象，有时返回数组
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> OneOrMany<T> {
    fn first(self, model_id: &str) -> Result<T, InferenceError> {
        match self {
            OneOrMany::One(item) => Ok(item),
            OneOrMany::Many(items) => items.into_iter().next().ok_or_else(|| {
                InferenceError::InvalidResponse(format!("{}: empty output", model_id))
            }),
        }
    }
}

// ============================================================================
// Pipelines
// ============================================================================

/// ASR 管线
pub struct HttpAsrPipeline {
    client: Arc<HttpInferenceClient>,
    model_id: String,
    device: Device,
    language: String,
}

impl HttpAsrPipeline {
    pub fn new(
        client: Arc<HttpInferenceClient>,
        model_id: impl Into<String>,
        device: Device,
        language: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model_id: model_id.into(),
            device,
            language: language.into(),
        }
    }
}

#[async_trait]
impl Pipeline<AudioInput> for HttpAsrPipeline {
    async fn run(&self, input: AudioInput) -> Result<String, InferenceError> {
        let audio = tokio::fs::read(&input.path)
            .await
            .map_err(|e| InferenceError::Io(format!("{}: {}", input.path.display(), e)))?;

        let content_type = input
            .format
            .map(|f| f.content_type())
            .unwrap_or("application/octet-stream");

        let headers = [
            (DEVICE_HEADER, self.device.to_string()),
            (LANGUAGE_HEADER, self.language.clone()),
        ];

        let output: OneOrMany<AsrOutput> = self
            .client
            .post_audio(&self.model_id, audio, content_type, &headers)
            .await?;
        let output = output.first(&self.model_id)?;

        tracing::info!(
            model = %self.model_id,
            device = %self.device,
            transcript_len = output.text.len(),
            "ASR inference completed"
        );

        Ok(output.text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn health_check(&self) -> bool {
        self.client.health_check().await
    }

    fn health_key(&self) -> &str {
        self.client.base_url()
    }
}

/// 翻译管线
pub struct HttpTranslationPipeline {
    client: Arc<HttpInferenceClient>,
    model_id: String,
}

impl HttpTranslationPipeline {
    pub fn new(client: Arc<HttpInferenceClient>, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl Pipeline<TextInput> for HttpTranslationPipeline {
    async fn run(&self, input: TextInput) -> Result<String, InferenceError> {
        let body = InputsBody {
            inputs: &input.text,
        };
        let output: OneOrMany<TranslationOutput> =
            self.client.post_json(&self.model_id, &body).await?;
        Ok(output.first(&self.model_id)?.translation_text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn health_check(&self) -> bool {
        self.client.health_check().await
    }

    fn health_key(&self) -> &str {
        self.client.base_url()
    }
}

/// 摘要管线
pub struct HttpSummarizationPipeline {
    client: Arc<HttpInferenceClient>,
    model_id: String,
}

impl HttpSummarizationPipeline {
    pub fn new(client: Arc<HttpInferenceClient>, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl Pipeline<TextInput> for HttpSummarizationPipeline {
    async fn run(&self, input: TextInput) -> Result<String, InferenceError> {
        let body = InputsBody {
            inputs: &input.text,
        };
        let output: OneOrMany<SummaryOutput> =
            self.client.post_json(&self.model_id, &body).await?;
        Ok(output.first(&self.model_id)?.summary_text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn health_check(&self) -> bool {
        self.client.health_check().await
    }

    fn health_key(&self) -> &str {
        self.client.base_url()
    }
}

/// 抽取式问答管线
pub struct HttpQaPipeline {
    client: Arc<HttpInferenceClient>,
    model_id: String,
}

impl HttpQaPipeline {
    pub fn new(client: Arc<HttpInferenceClient>, model_id: impl Into<String>) -> Self {
        Self {
            client,
            model_id: model_id.into(),
        }
    }
}

#[async_trait]
impl Pipeline<QuestionInput> for HttpQaPipeline {
    async fn run(&self, input: QuestionInput) -> Result<String, InferenceError> {
        let inputs = QaInputs {
            question: input.question(),
            context: input.context(),
        };
        let body = InputsBody { inputs: &inputs };
        let output: OneOrMany<QaOutput> = self.client.post_json(&self.model_id, &body).await?;
        let output = output.first(&self.model_id)?;

        tracing::debug!(model = %self.model_id, score = ?output.score, "QA inference completed");

        Ok(output.answer)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }

    async fn health_check(&self) -> bool {
        self.client.health_check().await
    }

    fn health_key(&self) -> &str {
        self.client.base_url()
    }
}
