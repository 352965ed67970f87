//! Domain Layer - 领域层
//!
//! - Upload Context: 上传文件校验
//! - 文本分句（供本地推理引擎使用）

pub mod upload;

mod text_segmenter;

pub use text_segmenter::{split_sentences, words};
