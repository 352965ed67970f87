//! Text Command Handlers - 翻译 / 问答 / 摘要

use std::sync::Arc;

use crate::application::commands::{AnswerQuestion, SummarizeText, TranslateText};
use crate::application::error::ApplicationError;
use crate::application::ports::{
    QaPipeline, QuestionInput, SummarizationPipeline, TextInput, TranslationPipeline,
};

const NO_TEXT_PROVIDED: &str = "No text provided";

/// 缺失、空串或仅含空白都视为未提供
fn require_text(text: Option<String>) -> Result<String, ApplicationError> {
    text.filter(|t| !t.trim().is_empty())
        .ok_or_else(|| ApplicationError::validation(NO_TEXT_PROVIDED))
}

// ============================================================================
// TranslateText
// ============================================================================

/// TranslateText Handler
pub struct TranslateTextHandler {
    translation: Arc<TranslationPipeline>,
}

impl TranslateTextHandler {
    pub fn new(translation: Arc<TranslationPipeline>) -> Self {
        Self { translation }
    }

    pub async fn handle(&self, command: TranslateText) -> Result<String, ApplicationError> {
        let text = require_text(command.text)?;

        tracing::debug!(
            text_len = text.len(),
            model = %self.translation.model_id(),
            "Translating text"
        );

        Ok(self.translation.run(TextInput::new(text)).await?)
    }
}

// ============================================================================
// AnswerQuestion
// ============================================================================

/// AnswerQuestion Handler
pub struct AnswerQuestionHandler {
    qa: Arc<QaPipeline>,
}

impl AnswerQuestionHandler {
    pub fn new(qa: Arc<QaPipeline>) -> Self {
        Self { qa }
    }

    pub async fn handle(&self, command: AnswerQuestion) -> Result<String, ApplicationError> {
        let input =
            QuestionInput::new(command.question, command.text).map_err(ApplicationError::validation)?;

        tracing::debug!(
            question = %input.question(),
            context_len = input.context().len(),
            model = %self.qa.model_id(),
            "Answering question"
        );

        Ok(self.qa.run(input).await?)
    }
}

// ============================================================================
// SummarizeText
// ============================================================================

/// SummarizeText Handler
pub struct SummarizeTextHandler {
    summarization: Arc<SummarizationPipeline>,
}

impl SummarizeTextHandler {
    pub fn new(summarization: Arc<SummarizationPipeline>) -> Self {
        Self { summarization }
    }

    pub async fn handle(&self, command: SummarizeText) -> Result<String, ApplicationError> {
        let text = require_text(command.text)?;

        tracing::debug!(
            text_len = text.len(),
            model = %self.summarization.model_id(),
            "Summarizing text"
        );

        Ok(self.summarization.run(TextInput::new(text)).await?)
    }
}
