//! Fake Pipelines - 本地确定性推理实现
//!
//! 不加载任何模型，用于开发环境和测试：
//! - ASR 返回固定文本
//! - 翻译原样返回
//! - 问答返回与问题词重合最多的句子
//! - 摘要保留开头若干句

use async_trait::async_trait;
use std::collections::HashSet;

use crate::application::ports::{
    AudioInput, InferenceError, Pipeline, QuestionInput, TextInput,
};
use crate::domain::{split_sentences, words};

/// Fake ASR
pub struct FakeAsrPipeline {
    model_id: String,
    transcript: String,
}

impl FakeAsrPipeline {
    pub fn new(model_id: impl Into<String>, transcript: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            transcript: transcript.into(),
        }
    }
}

impl Default for FakeAsrPipeline {
    fn default() -> Self {
        Self::new("fake-asr", "HELLO WORLD")
    }
}

#[async_trait]
impl Pipeline<AudioInput> for FakeAsrPipeline {
    async fn run(&self, input: AudioInput) -> Result<String, InferenceError> {
        let metadata = tokio::fs::metadata(&input.path)
            .await
            .map_err(|e| InferenceError::Io(format!("{}: {}", input.path.display(), e)))?;

        tracing::debug!(
            path = %input.path.display(),
            size = metadata.len(),
            "FakeAsrPipeline: returning fixed transcript"
        );

        Ok(self.transcript.clone())
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Fake 翻译：原样返回
pub struct FakeTranslationPipeline {
    model_id: String,
}

impl FakeTranslationPipeline {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl Default for FakeTranslationPipeline {
    fn default() -> Self {
        Self::new("fake-translation")
    }
}

#[async_trait]
impl Pipeline<TextInput> for FakeTranslationPipeline {
    async fn run(&self, input: TextInput) -> Result<String, InferenceError> {
        Ok(input.text)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Fake 抽取式问答
pub struct FakeQaPipeline {
    model_id: String,
}

impl FakeQaPipeline {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl Default for FakeQaPipeline {
    fn default() -> Self {
        Self::new("fake-qa")
    }
}

/// 与问题词重合最多的句子，平局取靠前的
fn best_overlap_sentence(question: &str, context: &str) -> Option<String> {
    let question_words: HashSet<String> = words(question).into_iter().collect();

    let mut best: Option<(usize, String)> = None;
    for sentence in split_sentences(context) {
        let score = words(&sentence)
            .iter()
            .filter(|w| question_words.contains(*w))
            .count();
        if best.as_ref().map_or(true, |(top, _)| score > *top) {
            best = Some((score, sentence));
        }
    }

    best.map(|(_, sentence)| sentence)
}

#[async_trait]
impl Pipeline<QuestionInput> for FakeQaPipeline {
    async fn run(&self, input: QuestionInput) -> Result<String, InferenceError> {
        best_overlap_sentence(input.question(), input.context()).ok_or_else(|| {
            InferenceError::InvalidInput("Context contains no sentences".to_string())
        })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Fake 摘要
pub struct FakeSummarizationPipeline {
    model_id: String,
}

impl FakeSummarizationPipeline {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
        }
    }
}

impl Default for FakeSummarizationPipeline {
    fn default() -> Self {
        Self::new("fake-summarization")
    }
}

/// 保留开头的句子，总长不超过原文的三分之一（至少一句）
///
/// 单句输入截取前一半的词
fn lead_summary(text: &str) -> String {
    let text = text.trim();
    let budget = text.chars().count() / 3;

    let mut summary = String::new();
    for sentence in split_sentences(text) {
        let projected = summary.chars().count() + 1 + sentence.chars().count();
        if !summary.is_empty() && projected > budget {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(&sentence);
    }

    if summary.chars().count() < text.chars().count() {
        return summary;
    }

    let all_words: Vec<&str> = text.split_whitespace().collect();
    let keep = all_words.len().div_ceil(2);
    all_words[..keep].join(" ")
}

#[async_trait]
impl Pipeline<TextInput> for FakeSummarizationPipeline {
    async fn run(&self, input: TextInput) -> Result<String, InferenceError> {
        Ok(lead_summary(&input.text))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
