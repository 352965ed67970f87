//! Inference Commands

/// 上传音频并转写
#[derive(Debug, Clone)]
pub struct TranscribeAudio {
    /// 客户端提供的原始文件名（可能为空）
    pub filename: String,
    pub content: Vec<u8>,
}

/// 翻译文本
#[derive(Debug, Clone)]
pub struct TranslateText {
    pub text: Option<String>,
}

/// 抽取式问答
#[derive(Debug, Clone)]
pub struct AnswerQuestion {
    pub question: Option<String>,
    /// 上下文文本
    pub text: Option<String>,
}

/// 生成摘要
#[derive(Debug, Clone)]
pub struct SummarizeText {
    pub text: Option<String>,
}
