//! Application State
//!
//! 启动时构建一次，之后只读，通过 axum `State` 传入每个 handler

use std::sync::Arc;

use crate::application::{
    AnswerQuestionHandler, InferencePipelines, SummarizeTextHandler, TranscribeAudioHandler,
    TranslateTextHandler, UploadStoragePort,
};
use crate::domain::upload::UploadPolicy;

/// 应用状态
pub struct AppState {
    // ========== Ports ==========
    pub pipelines: InferencePipelines,
    pub upload_storage: Arc<dyn UploadStoragePort>,

    // ========== Command Handlers ==========
    pub transcribe_handler: TranscribeAudioHandler,
    pub translate_handler: TranslateTextHandler,
    pub answer_handler: AnswerQuestionHandler,
    pub summarize_handler: SummarizeTextHandler,
}

impl AppState {
    /// 创建应用状态
    pub fn new(
        pipelines: InferencePipelines,
        upload_storage: Arc<dyn UploadStoragePort>,
        upload_policy: UploadPolicy,
    ) -> Self {
        Self {
            transcribe_handler: TranscribeAudioHandler::new(
                upload_policy,
                upload_storage.clone(),
                pipelines.asr.clone(),
            ),
            translate_handler: TranslateTextHandler::new(pipelines.translation.clone()),
            answer_handler: AnswerQuestionHandler::new(pipelines.qa.clone()),
            summarize_handler: SummarizeTextHandler::new(pipelines.summarization.clone()),

            pipelines,
            upload_storage,
        }
    }

    /// 请求体大小上限
    pub fn max_upload_size(&self) -> usize {
        self.transcribe_handler.policy().max_size() as usize
    }
}
