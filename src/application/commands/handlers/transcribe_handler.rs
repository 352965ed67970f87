//! TranscribeAudio Handler
//!
//! 校验 -> 落盘 -> ASR -> 删除

use std::sync::Arc;

use crate::application::commands::TranscribeAudio;
use crate::application::error::ApplicationError;
use crate::application::ports::{AsrPipeline, AudioInput, UploadStoragePort};
use crate::domain::upload::{UploadPolicy, UploadedFile};

/// TranscribeAudio Handler
pub struct TranscribeAudioHandler {
    policy: UploadPolicy,
    storage: Arc<dyn UploadStoragePort>,
    asr: Arc<AsrPipeline>,
}

impl TranscribeAudioHandler {
    pub fn new(
        policy: UploadPolicy,
        storage: Arc<dyn UploadStoragePort>,
        asr: Arc<AsrPipeline>,
    ) -> Self {
        Self {
            policy,
            storage,
            asr,
        }
    }

    pub fn policy(&self) -> &UploadPolicy {
        &self.policy
    }

    /// 上传文件在任何结果下都会被删除
    pub async fn handle(&self, command: TranscribeAudio) -> Result<String, ApplicationError> {
        let file = UploadedFile::accept(&self.policy, command.filename, command.content)?;

        let upload = self.storage.persist(&file).await?;

        tracing::info!(
            filename = %file.filename(),
            size = file.size(),
            model = %self.asr.model_id(),
            "Transcribing upload"
        );

        let input = AudioInput {
            path: upload.path().to_path_buf(),
            format: file.format(),
        };
        let result = self.asr.run(input).await;

        upload.release().await;

        let transcript = result?;

        tracing::info!(
            filename = %file.filename(),
            transcript_len = transcript.len(),
            "Transcription completed"
        );

        Ok(transcript)
    }
}
