//! # 命令执行模块
//!
//! 整个程序只有一条流水线：
//! 读取结构 → 规范化 → (可选) 写 C 片段 → 查询后端 → 拼接报告 → 一次性输出。
//!
//! 报告各部分的顺序固定：空间群报告（标准模式或设置枚举）、原胞、数值对称操作。
//! 后端找不到空间群时不输出空间群报告，其余部分照常。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `parsers/`, `symmetry/`, `report/`, `utils/`
//! - 子模块: settings, primitive

pub mod primitive;
pub mod settings;

use crate::cli::Cli;
use crate::config::Config;
use crate::error::{Result, SymError};
use crate::parsers;
use crate::report::{self, snippet};
use crate::symmetry::{self, SpgCell, SymmetryEngine};
use crate::utils::output;

use std::fs;
use std::io::Write;
use std::path::Path;

/// 执行一次分析
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli);
    analyze(&cli.structure, &config)
}

/// 按配置分析一个结构文件
///
/// 输入错误在写 C 片段和查询后端之前就返回。
pub fn analyze(structure: &Path, config: &Config) -> Result<()> {
    let verbose = config.verbose;
    check_output_path(structure, config.output.as_deref())?;

    let crystal = parsers::parse_structure_file(structure)?;
    let (a, b, c, alpha, beta, gamma) = crystal.lattice.parameters();
    output::print_info(
        verbose,
        &format!(
            "Read {}: {} ({} atoms)",
            structure.display(),
            crystal.formula(),
            crystal.atoms.len()
        ),
    );
    output::print_info(
        verbose,
        &format!(
            "a={:.4} b={:.4} c={:.4} alpha={:.2} beta={:.2} gamma={:.2}",
            a, b, c, alpha, beta, gamma
        ),
    );

    let cell = SpgCell::from_crystal(&crystal, config.shift);

    if config.to_c {
        let path = snippet::write_snippet(&config.snippet_dir, &cell, config.symprec)?;
        output::print_done(verbose, &format!("Wrote {}", path.display()));
    }

    let engine = symmetry::create_engine(config.backend)?;
    output::print_info(verbose, &format!("Using {} backend", engine.name()));

    let text = execute(config, engine.as_ref(), &cell, &crystal.name)?;
    write_output(&text, config.output.as_deref(), verbose)
}

/// 按配置拼接全部输出
pub fn execute(
    config: &Config,
    engine: &dyn SymmetryEngine,
    cell: &SpgCell,
    name: &str,
) -> Result<String> {
    let verbose = config.verbose;
    let mut out = String::new();

    match engine.dataset(cell, config.hall_number, config.tolerance())? {
        Some(ds) => {
            if config.settings {
                out.push_str(&settings::enumerate(
                    engine,
                    cell,
                    config,
                    ds.spacegroup_number,
                )?);
            } else {
                let pg = engine.point_group(&ds.operations.rotations)?;
                output::print_info(
                    verbose,
                    &format!("Point group {} (#{})", pg.symbol, pg.number),
                );
                out.push_str(&report::format_report(&ds, &pg, cell, &config.sections));
            }
        }
        None => {
            output::print_warning(
                verbose,
                &format!("No space group found within symprec = {}", config.symprec),
            );
        }
    }

    if config.primitive {
        if let Some(text) = primitive::primitive_poscar(engine, cell, config, name)? {
            out.push_str(&text);
        }
    }

    if config.numerical_operations {
        let ops = engine.operations(cell, config.symprec)?;
        if ops.is_empty() {
            output::print_warning(verbose, "No symmetry operations found");
        } else {
            output::print_info(
                verbose,
                &format!("Found {} symmetry operations", ops.len()),
            );
        }
        out.push_str(&report::format_operations(&ops));
    }

    Ok(out)
}

/// 报告文件不能覆盖输入结构
///
/// 两个路径都存在时比较规范化后的绝对路径（`./POSCAR`、符号链接等）。
fn check_output_path(structure: &Path, output: Option<&Path>) -> Result<()> {
    let Some(output) = output else {
        return Ok(());
    };

    let same = match (fs::canonicalize(structure), fs::canonicalize(output)) {
        (Ok(a), Ok(b)) => a == b,
        _ => structure == output,
    };

    if same {
        return Err(SymError::InvalidArgument(format!(
            "--output would overwrite the input structure {}",
            structure.display()
        )));
    }
    Ok(())
}

/// 写到文件或 stdout
fn write_output(text: &str, path: Option<&Path>, verbose: bool) -> Result<()> {
    match path {
        Some(path) => {
            fs::write(path, text).map_err(|e| SymError::FileWriteError {
                path: path.display().to_string(),
                source: e,
            })?;
            output::print_done(verbose, &format!("Report written to {}", path.display()));
        }
        None => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(text.as_bytes())
                .and_then(|_| lock.flush())
                .map_err(|e| SymError::FileWriteError {
                    path: "<stdout>".to_string(),
                    source: e,
                })?;
        }
    }
    Ok(())
}
