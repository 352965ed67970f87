//! Upload Storage Port - 出站端口
//!
//! 上传文件在一次推理期间的临时落盘

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::upload::UploadedFile;

/// 上传存储错误
#[derive(Debug, Error)]
pub enum UploadStorageError {
    #[error("IO error: {0}")]
    IoError(String),
}

/// 已落盘的上传文件
///
/// 持有期间文件存在；`release()` 或 drop 时删除
#[derive(Debug)]
pub struct StoredUpload {
    path: PathBuf,
    released: bool,
}

impl StoredUpload {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            released: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 删除文件
    pub async fn release(mut self) {
        self.released = true;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Upload removed"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove upload"
            ),
        }
    }
}

impl Drop for StoredUpload {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        // 请求被取消或 panic 时兜底
        if let Err(e) = std::fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Failed to remove upload on drop"
                );
            }
        }
    }
}

/// Upload Storage Port
#[async_trait]
pub trait UploadStoragePort: Send + Sync {
    /// 上传目录
    fn upload_dir(&self) -> &Path;

    /// 写入上传内容，返回守卫
    async fn persist(&self, file: &UploadedFile) -> Result<StoredUpload, UploadStorageError>;
}
