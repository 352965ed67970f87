//! Ping Handler
//!
//! Health check endpoint

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::infrastructure::http::state::AppState;

/// 已加载的模型
#[derive(Serialize)]
pub struct ModelsInfo {
    pub asr: String,
    pub translation: String,
    pub qa: String,
    pub summarization: String,
}

/// Ping 响应
#[derive(Serialize)]
pub struct PingResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub models: ModelsInfo,
}

/// Ping endpoint - 健康检查
pub async fn ping(State(state): State<Arc<AppState>>) -> Json<PingResponse> {
    let pipelines = &state.pipelines;
    Json(PingResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        models: ModelsInfo {
            asr: pipelines.asr.model_id().to_string(),
            translation: pipelines.translation.model_id().to_string(),
            qa: pipelines.qa.model_id().to_string(),
            summarization: pipelines.summarization.model_id().to_string(),
        },
    })
}
