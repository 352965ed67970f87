//! Data Transfer Objects

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};

use super::error::ApiError;

/// 成功响应 `{"result": ...}`
#[derive(Debug, Serialize)]
pub struct ResultResponse<T: Serialize> {
    pub result: T,
}

impl<T: Serialize> ResultResponse<T> {
    pub fn new(result: T) -> Self {
        Self { result }
    }
}

/// 翻译 / 摘要请求
#[derive(Debug, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// 问答请求
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    /// 上下文
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub question: Option<String>,
}

/// 解包 JSON 请求体，失败时返回 400
pub fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text())))
}
