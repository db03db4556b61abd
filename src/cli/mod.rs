//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数。没有子命令：一个位置参数（结构文件）
//! 加若干选项，选项名沿用 `--angle_tolerance` 这样的下划线写法。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 转换为 `config::Config` 后交给 `commands/`

use crate::symmetry::hall::MAX_HALL_NUMBER;
use crate::symmetry::Backend;
use clap::Parser;
use std::path::PathBuf;

/// symposcar - 空间群 / Wyckoff 位置 / 对称操作分析
#[derive(Parser, Debug)]
#[command(name = "symposcar")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(
    about = "Find the space group, Wyckoff positions and symmetry operations of a POSCAR structure",
    long_about = None
)]
pub struct Cli {
    /// Structure file in VASP POSCAR format
    pub structure: PathBuf,

    /// Symmetry check precision (distance tolerance)
    #[arg(short = 's', long, default_value_t = 1e-5, value_parser = parse_symprec)]
    pub symprec: f64,

    /// Tolerance of angles between lattice vectors in degrees (negative = backend default)
    #[arg(short = 'a', long = "angle_tolerance", alias = "angle-tolerance", allow_hyphen_values = true)]
    pub angle_tolerance: Option<f64>,

    /// Uniform shift of internal atomic positions, e.g. "0.5 0.5 0.5"
    #[arg(long, value_parser = parse_shift, allow_hyphen_values = true)]
    pub shift: Option<[f64; 3]>,

    /// Print only "<symbol> (<number>)" without the trailing newline
    #[arg(short = 'n', long, default_value_t = false)]
    pub nonewline: bool,

    /// Long output: original and standardized lattices, standardized atoms
    #[arg(short = 'l', long, default_value_t = false)]
    pub long: bool,

    /// Show symmetry operations
    #[arg(short = 'o', long, default_value_t = false)]
    pub operations: bool,

    /// Show raw symmetry operations found without space-group classification
    #[arg(long = "numerical_operations", alias = "numerical-operations", default_value_t = false)]
    pub numerical_operations: bool,

    /// Show transformation matrix, origin shift, Wyckoff positions and operations
    #[arg(short = 'd', long, default_value_t = false)]
    pub dataset: bool,

    /// List every Hall setting of the detected space group
    #[arg(long, default_value_t = false)]
    pub settings: bool,

    /// Show the primitive cell in POSCAR format
    #[arg(long, default_value_t = false)]
    pub primitive: bool,

    /// Write a C program reproducing the query to findspg.c
    #[arg(long = "to_c", alias = "to-c", default_value_t = false)]
    pub to_c: bool,

    /// Request a specific Hall setting by its number (0 = automatic)
    #[arg(long = "hall", default_value_t = 0, value_parser = parse_hall_number)]
    pub hall_number: i32,

    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Symmetry backend
    #[arg(long, value_enum, default_value_t = Backend::default())]
    pub backend: Backend,

    /// Print diagnostics to stderr
    #[arg(short = 'v', long, default_value_t = false)]
    pub verbose: bool,
}

/// 解析 `--shift`：三个以空白分隔的浮点数
pub fn parse_shift(input: &str) -> Result<[f64; 3], String> {
    let values: Vec<f64> = input
        .split_whitespace()
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| format!("Invalid number '{}' in shift", s))
        })
        .collect::<Result<_, _>>()?;

    match values.as_slice() {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(format!(
            "Shift needs exactly 3 values, got {} in '{}'",
            values.len(),
            input
        )),
    }
}

/// 解析 `--symprec`：必须是有限正数
pub fn parse_symprec(input: &str) -> Result<f64, String> {
    match input.parse::<f64>() {
        Ok(v) if v.is_finite() && v > 0.0 => Ok(v),
        Ok(v) => Err(format!("Symmetry precision must be positive, got {}", v)),
        Err(_) => Err(format!("Invalid symmetry precision '{}'", input)),
    }
}

/// 解析 `--hall`：0 或 1..=530
pub fn parse_hall_number(input: &str) -> Result<i32, String> {
    let n: i32 = input
        .parse()
        .map_err(|_| format!("Invalid Hall number '{}'", input))?;
    if (0..=MAX_HALL_NUMBER).contains(&n) {
        Ok(n)
    } else {
        Err(format!(
            "Hall number must be between 0 and {}, got {}",
            MAX_HALL_NUMBER, n
        ))
    }
}
