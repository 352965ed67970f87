//! Inference Port - 推理管线抽象
//!
//! 每个预训练模型都被包装为统一的 `run(input) -> text` 调用，
//! 具体实现在 infrastructure/adapters/inference

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::upload::AudioFormat;

/// 推理错误
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Inference backend unavailable: {0}")]
    Unavailable(String),

    #[error("Inference request timeout")]
    Timeout,

    #[error("Inference service error: {0}")]
    ServiceError(String),

    #[error("Invalid inference response: {0}")]
    InvalidResponse(String),

    #[error("Invalid inference input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// 推理设备
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Device {
    Cuda(u32),
    Cpu,
}

impl Device {
    pub fn is_accelerated(&self) -> bool {
        matches!(self, Device::Cuda(_))
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Device::Cuda(index) => write!(f, "cuda:{}", index),
            Device::Cpu => write!(f, "cpu"),
        }
    }
}

/// ASR 输入：已落盘的音频文件
#[derive(Debug, Clone)]
pub struct AudioInput {
    pub path: PathBuf,
    pub format: Option<AudioFormat>,
}

/// 翻译 / 摘要输入
#[derive(Debug, Clone)]
pub struct TextInput {
    pub text: String,
}

impl TextInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// 抽取式问答输入
///
/// 不变量: question 与 context 均非空
#[derive(Debug, Clone)]
pub struct QuestionInput {
    question: String,
    context: String,
}

impl QuestionInput {
    /// 先检查问题，再检查上下文
    pub fn new(question: Option<String>, context: Option<String>) -> Result<Self, &'static str> {
        let question = question
            .filter(|q| !q.trim().is_empty())
            .ok_or("No question provided")?;
        let context = context
            .filter(|c| !c.trim().is_empty())
            .ok_or("No context provided")?;
        Ok(Self { question, context })
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn context(&self) -> &str {
        &self.context
    }
}

/// Pipeline Port
///
/// 预训练模型及其前后处理，暴露为单个调用。
/// 实现必须可被并发请求只读共享
#[async_trait]
pub trait Pipeline<I: Send + 'static>: Send + Sync {
    /// 执行推理，返回文本结果
    async fn run(&self, input: I) -> Result<String, InferenceError>;

    /// 模型标识（用于日志）
    fn model_id(&self) -> &str;

    /// 检查模型是否可用
    async fn health_check(&self) -> bool {
        true
    }

    /// 健康检查去重键，共享同一后端的管线返回相同的值
    fn health_key(&self) -> &str {
        self.model_id()
    }
}

pub type AsrPipeline = dyn Pipeline<AudioInput>;
pub type TranslationPipeline = dyn Pipeline<TextInput>;
pub type QaPipeline = dyn Pipeline<QuestionInput>;
pub type SummarizationPipeline = dyn Pipeline<TextInput>;

/// 启动时加载的全部模型句柄，之后只读
#[derive(Clone)]
pub struct InferencePipelines {
    pub asr: Arc<AsrPipeline>,
    pub translation: Arc<TranslationPipeline>,
    pub qa: Arc<QaPipeline>,
    pub summarization: Arc<SummarizationPipeline>,
}

impl InferencePipelines {
    /// 检查所有模型，返回不可用的模型标识
    ///
    /// 同一 `health_key` 只检查一次
    pub async fn unhealthy_models(&self) -> Vec<String> {
        let mut checked = HashMap::new();
        let mut unhealthy = Vec::new();
        check_pipeline(self.asr.as_ref(), &mut checked, &mut unhealthy).await;
        check_pipeline(self.translation.as_ref(), &mut checked, &mut unhealthy).await;
        check_pipeline(self.qa.as_ref(), &mut checked, &mut unhealthy).await;
        check_pipeline(self.summarization.as_ref(), &mut checked, &mut unhealthy).await;
        unhealthy
    }
}

async fn check_pipeline<I: Send + 'static>(
    pipeline: &dyn Pipeline<I>,
    checked: &mut HashMap<String, bool>,
    unhealthy: &mut Vec<String>,
) {
    let healthy = match checked.get(pipeline.health_key()) {
        Some(&healthy) => healthy,
        None => {
            let healthy = pipeline.health_check().await;
            checked.insert(pipeline.health_key().to_string(), healthy);
            healthy
        }
    };
    if !healthy {
        unhealthy.push(pipeline.model_id().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_input_checks_question_first() {
        let err = QuestionInput::new(None, None).unwrap_err();
        assert_eq!(err, "No question provided");

        let err = QuestionInput::new(Some(String::new()), Some("ctx".into())).unwrap_err();
        assert_eq!(err, "No question provided");

        let err = QuestionInput::new(Some("why?".into()), Some(String::new())).unwrap_err();
        assert_eq!(err, "No context provided");

        let err = QuestionInput::new(Some(" \n".into()), Some("ctx".into())).unwrap_err();
        assert_eq!(err, "No question provided");

        let err = QuestionInput::new(Some("why?".into()), Some("\t ".into())).unwrap_err();
        assert_eq!(err, "No context provided");

        let input = QuestionInput::new(Some("why?".into()), Some("because".into())).unwrap();
        assert_eq!(input.question(), "why?");
        assert_eq!(input.context(), "because");
    }

    #[test]
    fn test_device_display() {
        assert_eq!(Device::Cuda(0).to_string(), "cuda:0");
        assert_eq!(Device::Cpu.to_string(), "cpu");
    }
}
