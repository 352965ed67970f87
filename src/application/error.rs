//! 应用层错误定义
//!
//! 统一的命令错误类型

use thiserror::Error;

use crate::application::ports::{InferenceError, UploadStorageError};
use crate::domain::upload::UploadError;

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 上传校验失败
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// 请求字段校验失败
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 推理失败
    #[error(transparent)]
    Inference(#[from] InferenceError),

    /// 存储错误
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl ApplicationError {
    /// 创建验证错误
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}

impl From<UploadStorageError> for ApplicationError {
    fn from(err: UploadStorageError) -> Self {
        Self::StorageError(err.to_string())
    }
}
