//! Upload HTTP Handler - 音频上传与转写

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::application::TranscribeAudio;
use crate::domain::upload::UploadError;
use crate::infrastructure::http::dto::ResultResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

/// 表单中的文件字段名
const FILE_FIELD: &str = "file";

fn multipart_error(e: MultipartError) -> ApiError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::PayloadTooLarge("File too large".to_string())
    } else {
        ApiError::BadRequest(format!("Failed to read multipart body: {}", e.body_text()))
    }
}

/// 上传音频并返回转写文本
///
/// 只取第一个带文件名的 `file` 字段；没有文件名的同名字段视为普通表单字段
pub async fn file_upload(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ResultResponse<String>>, ApiError> {
    let mut multipart = multipart.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Not a multipart request");
        ApiError::from(UploadError::NoFilePart)
    })?;

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(|s| s.to_string()) else {
            continue;
        };
        if filename.is_empty() {
            return Err(UploadError::NoSelectedFile.into());
        }

        let content = field.bytes().await.map_err(multipart_error)?;
        upload = Some((filename, content.to_vec()));
        break;
    }

    let (filename, content) = upload.ok_or(UploadError::NoFilePart)?;

    let transcript = state
        .transcribe_handler
        .handle(TranscribeAudio { filename, content })
        .await?;

    Ok(Json(ResultResponse::new(transcript)))
}
