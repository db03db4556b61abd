//! # 统一错误处理模块
//!
//! 定义 symposcar 的所有错误类型，使用 `thiserror` 派生。
//!
//! 注意：对称性后端"找不到空间群"不是错误，引擎以 `Ok(None)` 表示。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// symposcar 统一错误类型
#[derive(Error, Debug)]
pub enum SymError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 解析错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // ─────────────────────────────────────────────────────────────
    // 对称性后端错误
    // ─────────────────────────────────────────────────────────────
    #[error("Symmetry backend '{engine}' failed: {reason}")]
    Backend { engine: String, reason: String },
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, SymError>;

impl SymError {
    /// 构造 POSCAR 解析错误
    pub fn poscar(path: &str, reason: impl Into<String>) -> Self {
        SymError::ParseError {
            format: "poscar".to_string(),
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message() {
        let err = SymError::poscar("POSCAR", "File too short");
        assert_eq!(
            err.to_string(),
            "Failed to parse poscar file: POSCAR\nReason: File too short"
        );
    }

    #[test]
    fn test_backend_error_message() {
        let err = SymError::Backend {
            engine: "moyo".to_string(),
            reason: "unknown Wyckoff letter '?'".to_string(),
        };
        assert!(err.to_string().contains("moyo"));
    }
}
