//! Voxgate - 音频转写与文本推理 HTTP 后端

use std::sync::Arc;

use voxgate::config::{load_config, print_config};
use voxgate::domain::upload::UploadPolicy;
use voxgate::infrastructure::adapters::{build_pipelines, resolve_device, FileUploadStorage};
use voxgate::application::UploadStoragePort;
use voxgate::infrastructure::http::{AppState, HttpServer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置（优先级：环境变量 > 配置文件 > 默认值）
    let config = load_config().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    // 初始化日志
    let log_filter = format!(
        "{},voxgate={},tower_http=debug",
        config.log.level, config.log.level
    );
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));
    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(env_filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    tracing::info!("Voxgate - audio transcription & text inference backend");
    print_config(&config);

    // 加载模型（失败则退出）
    let device = resolve_device(config.inference.device);
    let pipelines = build_pipelines(&config.inference, device)
        .map_err(|e| anyhow::anyhow!("Failed to load inference pipelines: {}", e))?;

    let unhealthy = pipelines.unhealthy_models().await;
    if !unhealthy.is_empty() {
        if config.inference.require_healthy {
            anyhow::bail!("Inference backend unhealthy for models: {:?}", unhealthy);
        }
        tracing::warn!(models = ?unhealthy, "Inference backend not reachable yet");
    }

    // 上传目录
    let upload_storage = Arc::new(
        FileUploadStorage::new(&config.storage.upload_dir)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to prepare upload directory: {}", e))?,
    );
    tracing::info!(dir = %upload_storage.upload_dir().display(), "Upload directory ready");
    let upload_policy = UploadPolicy::new(
        &config.storage.allowed_extensions,
        config.storage.max_upload_size,
    );

    let state = AppState::new(pipelines, upload_storage, upload_policy);

    let server = HttpServer::new(&config.server, state);

    tracing::info!("Starting HTTP server...");

    server
        .run_with_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for ctrl-c");
                std::future::pending::<()>().await;
            }
            tracing::info!("Received shutdown signal");
        })
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
