//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 服务器配置
    #[serde(default)]
    pub server: ServerConfig,

    /// 上传存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 推理后端配置
    #[serde(default)]
    pub inference: InferenceConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    #[serde(default = "default_host")]
    pub host: String,

    /// 监听端口
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// 获取服务器地址
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 上传存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// 上传文件临时目录
    #[serde(default = "default_upload_dir")]
    pub upload_dir: PathBuf,

    /// 请求体最大大小（字节），默认 16MB
    #[serde(default = "default_max_upload_size")]
    pub max_upload_size: u64,

    /// 允许上传的扩展名（小写）
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_upload_dir() -> PathBuf {
    PathBuf::from("uploaded_files")
}

fn default_max_upload_size() -> u64 {
    16 * 1024 * 1024 // 16 MB
}

fn default_allowed_extensions() -> Vec<String> {
    vec!["wav".to_string(), "mp3".to_string()]
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size: default_max_upload_size(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// 推理后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// 外部模型服务（Hugging Face inference 协议）
    #[default]
    Http,
    /// 本地确定性实现，用于开发和测试
    Fake,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Http => write!(f, "http"),
            BackendKind::Fake => write!(f, "fake"),
        }
    }
}

/// 推理设备偏好
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePreference {
    /// 有 GPU 用 GPU，否则 CPU
    #[default]
    Auto,
    Cuda,
    Cpu,
}

/// 推理后端配置
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// 模型服务基础 URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// 启动时模型服务不健康则退出
    #[serde(default)]
    pub require_healthy: bool,

    #[serde(default)]
    pub device: DevicePreference,

    #[serde(default = "default_asr_model")]
    pub asr_model: String,

    /// ASR 目标语言
    #[serde(default = "default_asr_language")]
    pub asr_language: String,

    #[serde(default = "default_translation_model")]
    pub translation_model: String,

    #[serde(default = "default_summarization_model")]
    pub summarization_model: String,

    #[serde(default = "default_qa_model")]
    pub qa_model: String,

    /// fake 后端 ASR 固定返回的转写文本
    #[serde(default = "default_fake_transcript")]
    pub fake_transcript: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_asr_model() -> String {
    "facebook/wav2vec2-large-robust-ft-libri-960h".to_string()
}

fn default_asr_language() -> String {
    "eng".to_string()
}

fn default_translation_model() -> String {
    "Helsinki-NLP/opus-mt-en-zh".to_string()
}

fn default_summarization_model() -> String {
    "facebook/bart-large-cnn".to_string()
}

fn default_qa_model() -> String {
    "deepset/roberta-base-squad2".to_string()
}

fn default_fake_transcript() -> String {
    "HELLO WORLD".to_string()
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            require_healthy: false,
            device: DevicePreference::default(),
            asr_model: default_asr_model(),
            asr_language: default_asr_language(),
            translation_model: default_translation_model(),
            summarization_model: default_summarization_model(),
            qa_model: default_qa_model(),
            fake_transcript: default_fake_transcript(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.storage.max_upload_size, 16 * 1024 * 1024);
        assert_eq!(config.storage.allowed_extensions, vec!["wav", "mp3"]);
        assert_eq!(config.inference.backend, BackendKind::Http);
        assert_eq!(config.inference.qa_model, "deepset/roberta-base-squad2");
    }

    #[test]
    fn test_server_addr() {
        let config = ServerConfig::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    fn test_backend_kind_deserialize() {
        let kind: BackendKind = serde_json::from_str("\"fake\"").unwrap();
        assert_eq!(kind, BackendKind::Fake);
        let device: DevicePreference = serde_json::from_str("\"cuda\"").unwrap();
        assert_eq!(device, DevicePreference::Cuda);
    }
}
