//! Upload Context - 上传文件限界上下文
//!
//! 职责:
//! - 上传文件名与扩展名校验
//! - 上传大小限制
//! - 文件名净化

mod entities;
mod errors;
mod value_objects;

pub use entities::UploadedFile;
pub use errors::UploadError;
pub use value_objects::{sanitize_filename, AudioFormat, UploadPolicy};
