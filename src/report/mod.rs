//! # 数据集报告
//!
//! 把对称性数据集格式化为文本。所有函数都返回 `String`，
//! 由 `commands/` 决定写到 stdout 还是文件。
//!
//! 定宽格式与 C 的 printf 对应：`%10.5f` → `{:10.5}`，`%8.5f` → `{:8.5}`，
//! `%f` → `{:.6}`，`%2d` → `{:2}`，`%4d` → `{:4}`。
//!
//! ## 子模块
//! - `snippet`: 生成复现查询的 C 代码
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/dataset.rs`, `symmetry/cell.rs`, `config.rs`

pub mod snippet;

use crate::config::Sections;
use crate::models::dataset::wyckoff_letter;
use crate::models::{PointGroup, SymmetryDataset, SymmetryOperations};
use crate::symmetry::cell::reduce_fraction;
use crate::symmetry::SpgCell;

/// "<symbol> (<number>)"
pub fn short_summary(ds: &SymmetryDataset) -> String {
    format!(
        "{} ({})",
        ds.international_symbol.trim(),
        ds.spacegroup_number
    )
}

/// "<symbol> (<number>) / <point group> / <Hall symbol> (<Hall number>) / <setting>"
pub fn summary_line(ds: &SymmetryDataset, pg: &PointGroup) -> String {
    format!(
        "{} / {} / {} ({}) / {}",
        short_summary(ds),
        pg.symbol,
        ds.hall_symbol.trim(),
        ds.hall_number,
        ds.choice
    )
}

/// 完整报告：摘要行 + 开关打开的各部分
pub fn format_report(
    ds: &SymmetryDataset,
    pg: &PointGroup,
    cell: &SpgCell,
    sections: &Sections,
) -> String {
    if sections.nonewline {
        return short_summary(ds);
    }

    let mut out = String::new();
    out.push_str(&summary_line(ds, pg));
    out.push('\n');

    if sections.long {
        out.push_str("----------- original -----------\n");
        out.push_str(&format_lattice(&cell.lattice));

        out.push_str("------------ final -------------\n");
        out.push_str(&format_lattice(&ds.std_lattice));

        for (i, (t, p)) in ds.std_types.iter().zip(ds.std_positions.iter()).enumerate() {
            out.push_str(&format!(
                "{}: {}  {:10.5} {:10.5} {:10.5}\n",
                i + 1,
                t,
                p[0],
                p[1],
                p[2]
            ));
        }
    }

    if sections.dataset {
        out.push_str("------ transformation matrix -----\n");
        for row in &ds.transformation_matrix {
            out.push_str(&format_row(row));
        }

        out.push_str("---------- origin shift ----------\n");
        out.push_str(&format_row(&ds.origin_shift));

        out.push_str("--------- Wyckoff position ----------\n");
        out.push_str(&format_wyckoffs(ds, cell));
    }

    if sections.show_operations() {
        out.push_str(&format_operations(&ds.operations));
    }

    out
}

/// 一行一个基矢（输入为列向量矩阵）
pub fn format_lattice(columns: &[[f64; 3]; 3]) -> String {
    (0..3)
        .map(|j| format_row(&[columns[0][j], columns[1][j], columns[2][j]]))
        .collect()
}

fn format_row(v: &[f64; 3]) -> String {
    format!("{:10.5} {:10.5} {:10.5}\n", v[0], v[1], v[2])
}

/// Wyckoff 表：序号、元素、字母、约化后的分数坐标
pub fn format_wyckoffs(ds: &SymmetryDataset, cell: &SpgCell) -> String {
    let mut out = String::new();
    for (i, (&w, pos)) in ds.wyckoffs.iter().zip(cell.positions.iter()).enumerate() {
        let name = cell
            .types
            .get(i)
            .and_then(|&t| cell.species_of(t))
            .unwrap_or("?");
        let letter = wyckoff_letter(w).unwrap_or('?');
        out.push_str(&format!(
            "{:4} {:>2}  {} {:8.5} {:8.5} {:8.5}\n",
            i + 1,
            name,
            letter,
            reduce_fraction(pos[0]),
            reduce_fraction(pos[1]),
            reduce_fraction(pos[2])
        ));
    }
    out
}

/// 对称操作：序号行 + 3 行旋转 + 1 行平移
pub fn format_operations(ops: &SymmetryOperations) -> String {
    let mut out = String::new();
    for (i, (rot, trans)) in ops.iter().enumerate() {
        out.push_str(&format!("----{}----\n", i + 1));
        for row in rot {
            out.push_str(&format!("{:2} {:2} {:2}\n", row[0], row[1], row[2]));
        }
        out.push_str(&format!(
            "{:.6} {:.6} {:.6}\n",
            trans[0], trans[1], trans[2]
        ));
    }
    out
}

/// 设置枚举中的一行；`None` 表示该设置无法解析
pub fn format_setting_line(index: usize, entry: Option<(&SymmetryDataset, &PointGroup)>) -> String {
    match entry {
        Some((ds, pg)) => format!("{}: {}\n", index, summary_line(ds, pg)),
        None => format!("{}: -\n", index),
    }
}
