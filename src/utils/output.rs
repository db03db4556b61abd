//! # 诊断输出工具
//!
//! stdout 只承载报告本身，所有状态信息都写到 stderr。
//! `[*]` / `[WARN]` / `[DONE]` 只在 `verbose` 为真时输出（来自 `Config::verbose`），
//! `[ERR]` 总是输出。
//!
//! ## 依赖关系
//! - 被 `main.rs` 和 `commands/` 使用
//! - 使用 `colored` crate

use colored::Colorize;

/// 打印错误消息
pub fn print_error(msg: &str) {
    eprintln!("{} {}", "[ERR]".red().bold(), msg);
}

/// 打印警告消息
pub fn print_warning(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("{} {}", "[WARN]".yellow().bold(), msg);
    }
}

/// 打印信息消息
pub fn print_info(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("{} {}", "[*]".blue().bold(), msg);
    }
}

/// 打印完成消息
pub fn print_done(verbose: bool, msg: &str) {
    if verbose {
        eprintln!("{} {}", "[DONE]".green().bold(), msg);
    }
}
