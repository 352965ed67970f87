//! Upload Context - Errors

use thiserror::Error;

/// 上传校验错误
///
/// Display 文本直接作为 HTTP 错误消息返回给客户端
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("No file part")]
    NoFilePart,

    #[error("No selected file")]
    NoSelectedFile,

    #[error("Invalid file type")]
    InvalidFileType,

    #[error("File too large")]
    FileTooLarge { size: u64, limit: u64 },
}
