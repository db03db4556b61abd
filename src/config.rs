//! # 运行配置
//!
//! 命令行参数解析后只转换一次，得到不可变的 `Config`，
//! 以引用形式传给所有后续步骤。
//!
//! ## 依赖关系
//! - 由 `commands/mod.rs` 从 `cli::Cli` 构造
//! - 被 `commands/`、`report/` 读取

use crate::cli::Cli;
use crate::symmetry::{Backend, Tolerance};
use std::path::PathBuf;

/// 报告中各部分的开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sections {
    /// 只输出 "<symbol> (<number>)"，不带换行
    pub nonewline: bool,
    /// 原始/标准化晶格和标准化原子
    pub long: bool,
    /// 变换矩阵、原点平移、Wyckoff 表
    pub dataset: bool,
    /// 对称操作列表
    pub operations: bool,
}

impl Sections {
    /// `--dataset` 和 `--operations` 都会输出对称操作，但只输出一次
    pub fn show_operations(&self) -> bool {
        !self.nonewline && (self.operations || self.dataset)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub symprec: f64,
    /// 角度容差（度）；None 表示引擎默认
    pub angle_tolerance: Option<f64>,
    pub shift: [f64; 3],
    /// 0 表示自动选择
    pub hall_number: i32,
    pub sections: Sections,
    pub numerical_operations: bool,
    pub settings: bool,
    pub primitive: bool,
    pub to_c: bool,
    /// `findspg.c` 写入的目录
    pub snippet_dir: PathBuf,
    pub verbose: bool,
    pub output: Option<PathBuf>,
    pub backend: Backend,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Self {
        Config {
            symprec: cli.symprec,
            angle_tolerance: cli.angle_tolerance.filter(|a| *a >= 0.0),
            shift: cli.shift.unwrap_or([0.0; 3]),
            hall_number: cli.hall_number,
            sections: Sections {
                nonewline: cli.nonewline,
                long: cli.long,
                dataset: cli.dataset,
                operations: cli.operations,
            },
            numerical_operations: cli.numerical_operations,
            settings: cli.settings,
            primitive: cli.primitive,
            to_c: cli.to_c,
            snippet_dir: PathBuf::from("."),
            verbose: cli.verbose,
            output: cli.output.clone(),
            backend: cli.backend,
        }
    }

    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.symprec, self.angle_tolerance)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            symprec: 1e-5,
            angle_tolerance: None,
            shift: [0.0; 3],
            hall_number: 0,
            sections: Sections::default(),
            numerical_operations: false,
            settings: false,
            primitive: false,
            to_c: false,
            snippet_dir: PathBuf::from("."),
            verbose: false,
            output: None,
            backend: Backend::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let cli = Cli::try_parse_from(["symposcar", "POSCAR"]).unwrap();
        assert_eq!(Config::from_cli(&cli), Config::default());
    }

    #[test]
    fn test_from_cli_values() {
        let cli = Cli::try_parse_from([
            "symposcar", "-a", "-1", "--shift", "0 0 0.5", "-o", "-d", "POSCAR",
        ])
        .unwrap();
        let config = Config::from_cli(&cli);

        assert_eq!(config.angle_tolerance, None);
        assert_eq!(config.shift, [0.0, 0.0, 0.5]);
        assert!(config.sections.show_operations());
        assert_eq!(config.tolerance().symprec, 1e-5);
    }

    #[test]
    fn test_show_operations() {
        let mut sections = Sections::default();
        assert!(!sections.show_operations());

        sections.dataset = true;
        assert!(sections.show_operations());

        sections.operations = true;
        assert!(sections.show_operations());

        sections.nonewline = true;
        assert!(!sections.show_operations());
    }
}
