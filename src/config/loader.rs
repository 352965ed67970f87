//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::{AppConfig, BackendKind};

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// # 环境变量示例
/// - `VOXGATE_SERVER__PORT=8080`
/// - `VOXGATE_STORAGE__UPLOAD_DIR=/tmp/uploads`
/// - `VOXGATE_STORAGE__ALLOWED_EXTENSIONS=wav,mp3`
/// - `VOXGATE_INFERENCE__BASE_URL=http://models:8080`
/// - `VOXGATE_INFERENCE__BACKEND=fake`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 默认值（最低优先级）
    builder = builder
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 5000)?
        .set_default("storage.upload_dir", "uploaded_files")?
        .set_default("storage.max_upload_size", 16 * 1024 * 1024)?
        .set_default("storage.allowed_extensions", vec!["wav", "mp3"])?
        .set_default("inference.backend", "http")?
        .set_default("inference.base_url", "http://localhost:8080")?
        .set_default("inference.timeout_secs", 120)?
        .set_default("inference.require_healthy", false)?
        .set_default("inference.device", "auto")?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 环境变量（最高优先级）
    // 前缀: VOXGATE_，层级分隔符: __
    builder = builder.add_source(
        Environment::with_prefix("VOXGATE")
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("storage.allowed_extensions")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let mut app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    // 扩展名统一为小写，不带前导点
    app_config.storage.allowed_extensions = app_config
        .storage
        .allowed_extensions
        .iter()
        .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
        .collect();

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "Server port cannot be 0".to_string(),
        ));
    }

    if config.storage.upload_dir.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Upload directory cannot be empty".to_string(),
        ));
    }

    if config.storage.max_upload_size == 0 {
        return Err(ConfigError::ValidationError(
            "Max upload size cannot be 0".to_string(),
        ));
    }

    if config.storage.allowed_extensions.is_empty()
        || config.storage.allowed_extensions.iter().any(|e| e.is_empty())
    {
        return Err(ConfigError::ValidationError(
            "Allowed extensions must be a non-empty list of non-empty names".to_string(),
        ));
    }

    if config.inference.backend == BackendKind::Http && config.inference.base_url.is_empty() {
        return Err(ConfigError::ValidationError(
            "Inference base URL cannot be empty".to_string(),
        ));
    }

    if config.inference.timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "Inference timeout cannot be 0".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Server: {}:{}", config.server.host, config.server.port);
    tracing::info!("Upload Directory: {:?}", config.storage.upload_dir);
    tracing::info!("Max Upload Size: {} bytes", config.storage.max_upload_size);
    tracing::info!("Allowed Extensions: {:?}", config.storage.allowed_extensions);
    tracing::info!("Inference Backend: {}", config.inference.backend);
    if config.inference.backend == BackendKind::Http {
        tracing::info!("Inference URL: {}", config.inference.base_url);
        tracing::info!("Inference Timeout: {}s", config.inference.timeout_secs);
    }
    tracing::info!("ASR Model: {}", config.inference.asr_model);
    tracing::info!("Translation Model: {}", config.inference.translation_model);
    tracing::info!("Summarization Model: {}", config.inference.summarization_model);
    tracing::info!("QA Model: {}", config.inference.qa_model);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}
