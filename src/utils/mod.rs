//! # 工具函数模块
//!
//! 提供 stderr 上的彩色诊断输出。
//!
//! ## 依赖关系
//! - 被 `main.rs`、`commands/` 使用
//! - 子模块: output

pub mod output;
