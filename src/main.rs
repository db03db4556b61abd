//! # symposcar - POSCAR 结构对称性分析
//!
//! 读取 VASP POSCAR 文件，交给对称性后端（默认 `moyo`，可选 spglib）
//! 求空间群、点群、Hall 设置、Wyckoff 位置与对称操作，并输出文本报告。
//!
//! ## 功能
//! - 标准报告：`<symbol> (<number>) / <point group> / <Hall> (<n>) / <setting>`
//! - `--long` / `--dataset` / `--operations` 附加部分
//! - `--settings` 枚举空间群的全部 Hall 设置
//! - `--primitive` 输出原胞 POSCAR
//! - `--numerical_operations` 输出未分类的对称操作
//! - `--to_c` 生成复现查询的 C 程序 `findspg.c`
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── config.rs   (不可变运行配置)
//!   ├── commands/   (流水线与输出拼接)
//!   │     ├── parsers/   (POSCAR 读写)
//!   │     ├── symmetry/  (后端引擎、Hall 表、点群)
//!   │     ├── report/    (报告格式化、C 片段)
//!   │     └── models/    (数据模型)
//!   ├── utils/      (stderr 诊断输出)
//!   └── error.rs    (错误处理)
//! ```

mod cli;
mod commands;
mod config;
mod error;
mod models;
mod parsers;
mod report;
mod symmetry;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        std::process::exit(1);
    }
}
