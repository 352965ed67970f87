//! Infrastructure Layer - 基础设施层
//!
//! - HTTP: JSON API（axum）
//! - Adapters: 推理管线、上传存储

pub mod adapters;
pub mod http;
