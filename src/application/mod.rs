//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（推理管线、上传存储）
//! - commands: 命令及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;

// Re-exports
pub use commands::{
    handlers::{
        AnswerQuestionHandler, SummarizeTextHandler, TranscribeAudioHandler,
        TranslateTextHandler,
    },
    AnswerQuestion, SummarizeText, TranscribeAudio, TranslateText,
};

pub use error::ApplicationError;

pub use ports::{
    AsrPipeline, AudioInput, Device, InferenceError, InferencePipelines, Pipeline, QaPipeline,
    QuestionInput, StoredUpload, SummarizationPipeline, TextInput, TranslationPipeline,
    UploadStorageError, UploadStoragePort,
};
