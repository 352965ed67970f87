//! File Storage - 上传文件的文件系统存储实现
//!
//! 实现 UploadStoragePort trait

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::application::ports::{StoredUpload, UploadStorageError, UploadStoragePort};
use crate::domain::upload::UploadedFile;

/// 文件系统上传存储
pub struct FileUploadStorage {
    /// 上传目录
    base_dir: PathBuf,
}

impl FileUploadStorage {
    /// 创建新的文件存储，目录不存在时创建
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self, UploadStorageError> {
        let base_dir = base_dir.as_ref().to_path_buf();

        fs::create_dir_all(&base_dir)
            .await
            .map_err(|e| UploadStorageError::IoError(e.to_string()))?;

        Ok(Self { base_dir })
    }
}

#[async_trait]
impl UploadStoragePort for FileUploadStorage {
    fn upload_dir(&self) -> &Path {
        &self.base_dir
    }

    async fn persist(&self, file: &UploadedFile) -> Result<StoredUpload, UploadStorageError> {
        let path = self.base_dir.join(file.storage_name());

        // 写入失败时守卫负责清理残留的半截文件
        let upload = StoredUpload::new(path);
        fs::write(upload.path(), file.content())
            .await
            .map_err(|e| UploadStorageError::IoError(e.to_string()))?;

        tracing::debug!(
            path = %upload.path().display(),
            size = file.size(),
            "Saved upload"
        );

        Ok(upload)
    }
}
