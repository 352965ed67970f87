//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod inference;
mod upload_storage;

pub use inference::{
    AsrPipeline, AudioInput, Device, InferenceError, InferencePipelines, Pipeline, QaPipeline,
    QuestionInput, SummarizationPipeline, TextInput, TranslationPipeline,
};
pub use upload_storage::{StoredUpload, UploadStorageError, UploadStoragePort};
