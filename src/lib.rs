//! Voxgate - 音频转写与文本推理 HTTP 后端
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Upload Context: 上传文件校验、文件名净化
//! - 文本分句
//!
//! 应用层 (application/):
//! - Ports: Pipeline（ASR / 翻译 / 问答 / 摘要）、UploadStorage
//! - Commands: 每个端点一个命令处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: 路由、错误映射、中间件
//! - Adapters: HTTP 模型服务客户端、本地 fake 管线、文件存储

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
