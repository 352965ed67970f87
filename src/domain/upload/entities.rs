//! Upload Context - Entities

use uuid::Uuid;

use super::{sanitize_filename, AudioFormat, UploadError, UploadPolicy};

/// 已通过校验的上传文件
///
/// 生命周期：收到请求时创建，推理期间落盘，推理结束后删除
#[derive(Debug, Clone)]
pub struct UploadedFile {
    filename: String,
    extension: String,
    content: Vec<u8>,
}

impl UploadedFile {
    /// 按策略校验文件名、扩展名和大小
    pub fn accept(
        policy: &UploadPolicy,
        filename: impl Into<String>,
        content: Vec<u8>,
    ) -> Result<Self, UploadError> {
        let filename = filename.into();
        let extension = policy.check_filename(&filename)?;
        policy.check_size(content.len() as u64)?;

        Ok(Self {
            filename,
            extension,
            content,
        })
    }

    /// 客户端提供的原始文件名
    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn format(&self) -> Option<AudioFormat> {
        AudioFormat::from_extension(&self.extension)
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }

    /// 落盘文件名：`<uuid>_<净化后的文件名>`
    ///
    /// 同名文件并发上传时互不覆盖
    pub fn storage_name(&self) -> String {
        let mut sanitized = sanitize_filename(&self.filename);
        if sanitized.is_empty() {
            sanitized = format!("upload.{}", self.extension);
        }
        format!("{}_{}", Uuid::new_v4().simple(), sanitized)
    }
}
