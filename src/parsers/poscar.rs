//! # VASP POSCAR 格式解析器
//!
//! 解析 VASP POSCAR/CONTCAR 文件格式，并提供反向的 POSCAR 输出。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor (负值表示目标体积)
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+)
//! n1 n2 ...              # number of atoms per element
//! Selective dynamics     # optional
//! Direct/Cartesian       # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/mod.rs` 和 `commands/primitive.rs` 使用
//! - 使用 `models/structure.rs`

use crate::error::{Result, SymError};
use crate::models::{Atom, Crystal, Lattice};
use nalgebra::{Matrix3, Vector3};
use std::fs;
use std::path::Path;

/// 解析 POSCAR/CONTCAR 文件
pub fn parse_poscar_file(path: &Path) -> Result<Crystal> {
    let content = fs::read_to_string(path).map_err(|e| SymError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_poscar_content(
        &content,
        path.file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown"),
    )
}

/// 从字符串内容解析 POSCAR 格式
///
/// `default_name` 在注释行为空时作为结构名称，同时用于错误信息。
pub fn parse_poscar_content(content: &str, default_name: &str) -> Result<Crystal> {
    let lines: Vec<&str> = content.lines().collect();

    if lines.len() < 7 {
        return Err(SymError::poscar(default_name, "File too short"));
    }

    // Line 0: Comment/name
    let name = lines[0].trim().to_string();
    let name = if name.is_empty() {
        default_name.to_string()
    } else {
        name
    };

    // Line 1: Scaling factor
    let scale: f64 = lines[1]
        .split_whitespace()
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|s| s.is_finite())
        .ok_or_else(|| SymError::poscar(default_name, "Invalid scaling factor at line 2"))?;
    if scale == 0.0 {
        return Err(SymError::poscar(default_name, "Scaling factor must be nonzero"));
    }

    // Lines 2-4: Lattice vectors
    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        *row = parse_vector(lines[2 + i]).ok_or_else(|| {
            SymError::poscar(
                default_name,
                format!("Invalid lattice vector at line {}", 3 + i),
            )
        })?;
    }
    let raw_lattice = Lattice::from_vectors(matrix);
    let raw_volume = raw_lattice.volume().abs();
    if raw_volume < 1e-10 {
        return Err(SymError::poscar(default_name, "Degenerate lattice vectors"));
    }

    // 负的缩放因子表示目标体积
    let factor = if scale < 0.0 {
        (-scale / raw_volume).cbrt()
    } else {
        scale
    };
    let lattice = raw_lattice.scaled(factor);

    // Line 5: Element symbols (VASP 5+) or atom counts (VASP 4)
    let line5_parts: Vec<&str> = lines[5].split_whitespace().collect();
    let first = line5_parts
        .first()
        .ok_or_else(|| SymError::poscar(default_name, "Missing species/count line at line 6"))?;
    let (elements, counts, atom_line_start) = if first.parse::<usize>().is_ok() {
        // VASP 4 format: no element line, only counts
        let counts = parse_counts(&line5_parts, default_name, 6)?;
        let elements: Vec<String> = (0..counts.len()).map(|i| format!("X{}", i + 1)).collect();
        (elements, counts, 6)
    } else {
        // VASP 5+ format: element symbols on line 5, counts on line 6
        // 去掉 VASP 5.4 风格的 "Fe/abc123" 哈希后缀
        let elements: Vec<String> = line5_parts
            .iter()
            .map(|s| s.split('/').next().unwrap_or(s).to_string())
            .collect();
        let count_parts: Vec<&str> = lines[6].split_whitespace().collect();
        let counts = parse_counts(&count_parts, default_name, 7)?;
        (elements, counts, 7)
    };

    if elements.len() != counts.len() {
        return Err(SymError::poscar(
            default_name,
            format!(
                "{} species names but {} atom counts",
                elements.len(),
                counts.len()
            ),
        ));
    }

    let total: usize = counts.iter().sum();
    if total == 0 {
        return Err(SymError::poscar(default_name, "No atoms in structure"));
    }

    // Check for "Selective dynamics" line
    let mut coord_line = atom_line_start;
    if lines.len() > coord_line
        && lines[coord_line]
            .trim()
            .to_lowercase()
            .starts_with('s')
    {
        coord_line += 1;
    }

    // Coordinate type line
    if lines.len() <= coord_line {
        return Err(SymError::poscar(default_name, "Missing coordinate type line"));
    }

    let coord_type = lines[coord_line].trim().to_lowercase();
    let is_cartesian = coord_type.starts_with('c') || coord_type.starts_with('k');

    let inverse = if is_cartesian {
        Some(inverse_rows(&lattice).ok_or_else(|| {
            SymError::poscar(default_name, "Lattice is not invertible")
        })?)
    } else {
        None
    };

    // Parse atom positions
    let mut atoms: Vec<Atom> = Vec::with_capacity(total);
    let mut line_idx = coord_line + 1;

    for (elem, &count) in elements.iter().zip(counts.iter()) {
        for _ in 0..count {
            let line = lines.get(line_idx).ok_or_else(|| {
                SymError::poscar(
                    default_name,
                    format!("Expected {} positions, found {}", total, atoms.len()),
                )
            })?;
            let parts = parse_vector(line).ok_or_else(|| {
                SymError::poscar(
                    default_name,
                    format!("Invalid atomic position at line {}", line_idx + 1),
                )
            })?;

            let position = match &inverse {
                // 笛卡尔坐标同样需要乘以缩放因子
                Some(inv) => cart_to_frac(
                    [parts[0] * factor, parts[1] * factor, parts[2] * factor],
                    inv,
                ),
                None => parts,
            };
            atoms.push(Atom::new(elem.clone(), position));
            line_idx += 1;
        }
    }

    Ok(Crystal::new(name, lattice, atoms))
}

/// 解析一行中的前三个有限浮点数，其余内容（如选择性动力学标记）忽略
///
/// `nan`、`inf` 能被 `f64::from_str` 接受，这里一并拒绝。
fn parse_vector(line: &str) -> Option<[f64; 3]> {
    let mut it = line.split_whitespace().map(|s| s.parse::<f64>());
    let x = it.next()?.ok()?;
    let y = it.next()?.ok()?;
    let z = it.next()?.ok()?;
    [x, y, z]
        .iter()
        .all(|v| v.is_finite())
        .then_some([x, y, z])
}

fn parse_counts(parts: &[&str], path: &str, line_no: usize) -> Result<Vec<usize>> {
    parts
        .iter()
        .map(|s| {
            s.parse::<usize>().map_err(|_| {
                SymError::poscar(
                    path,
                    format!("Invalid atom count '{}' at line {}", s, line_no),
                )
            })
        })
        .collect()
}

/// 行向量晶格矩阵的逆
fn inverse_rows(lattice: &Lattice) -> Option<Matrix3<f64>> {
    let m = lattice.matrix;
    Matrix3::new(
        m[0][0], m[0][1], m[0][2], m[1][0], m[1][1], m[1][2], m[2][0], m[2][1], m[2][2],
    )
    .try_inverse()
}

/// 笛卡尔坐标转分数坐标：frac = cart · L⁻¹
fn cart_to_frac(cart: [f64; 3], inverse: &Matrix3<f64>) -> [f64; 3] {
    let frac = inverse.transpose() * Vector3::new(cart[0], cart[1], cart[2]);
    [frac.x, frac.y, frac.z]
}

/// 将 Crystal 转换为 POSCAR 格式字符串（Direct 坐标，元素按首次出现分组）
pub fn to_poscar_string(crystal: &Crystal) -> String {
    let species = crystal.species();

    let mut result = String::new();

    // Line 0: Comment
    result.push_str(&format!("{}\n", crystal.name));

    // Line 1: Scale
    result.push_str("1.0\n");

    // Lines 2-4: Lattice
    for row in &crystal.lattice.matrix {
        result.push_str(&format!(
            "  {:16.10}  {:16.10}  {:16.10}\n",
            row[0], row[1], row[2]
        ));
    }

    // Line 5: Elements
    result.push_str(&format!("   {}\n", species.join("   ")));

    // Line 6: Counts
    let counts: Vec<String> = species
        .iter()
        .map(|e| {
            crystal
                .atoms
                .iter()
                .filter(|a| a.element == *e)
                .count()
                .to_string()
        })
        .collect();
    result.push_str(&format!("   {}\n", counts.join("   ")));

    // Coordinate type
    result.push_str("Direct\n");

    // Atom positions
    for elem in &species {
        for atom in crystal.atoms.iter().filter(|a| a.element == *elem) {
            let pos = atom.position;
            result.push_str(&format!(
                "  {:16.10}  {:16.10}  {:16.10}\n",
                pos[0], pos[1], pos[2]
            ));
        }
    }

    result
}
