//! Text HTTP Handlers - 翻译 / 问答 / 摘要

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::sync::Arc;

use crate::application::{AnswerQuestion, SummarizeText, TranslateText};
use crate::infrastructure::http::dto::{parse_json, AnswerRequest, ResultResponse, TextRequest};
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 翻译文本
pub async fn translate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<ResultResponse<String>>, ApiError> {
    let req = parse_json(payload)?;

    let result = state
        .translate_handler
        .handle(TranslateText { text: req.text })
        .await?;

    Ok(Json(ResultResponse::new(result)))
}

/// 抽取式问答
pub async fn answer(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<ResultResponse<String>>, ApiError> {
    let req = parse_json(payload)?;

    let result = state
        .answer_handler
        .handle(AnswerQuestion {
            question: req.question,
            text: req.text,
        })
        .await?;

    Ok(Json(ResultResponse::new(result)))
}

/// 生成摘要
pub async fn summarize(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<ResultResponse<String>>, ApiError> {
    let req = parse_json(payload)?;

    let result = state
        .summarize_handler
        .handle(SummarizeText { text: req.text })
        .await?;

    Ok(Json(ResultResponse::new(result)))
}
