//! # 晶胞规范化
//!
//! 把解析得到的 `Crystal` 转换为对称性引擎需要的扁平数组：
//! - 晶格：转置后的矩阵（列向量为基矢）
//! - 原子：按元素首次出现顺序分组，组内保持原顺序
//! - 类型：从 1 开始的整数编号
//! - 坐标：加上统一平移，不做取模（由引擎处理）
//!
//! ## 依赖关系
//! - 被 `symmetry/` 引擎、`report/` 和 `commands/` 使用
//! - 使用 `models/structure.rs`

use crate::models::{Atom, Crystal, Lattice};

/// 引擎输入/输出晶胞
#[derive(Debug, Clone, PartialEq)]
pub struct SpgCell {
    /// 列向量形式的晶格：`lattice[i][j]` 是第 j 个基矢的第 i 个分量
    pub lattice: [[f64; 3]; 3],
    pub positions: Vec<[f64; 3]>,
    /// 类型编号，从 1 开始
    pub types: Vec<i32>,
    /// `species[t - 1]` 是类型 t 的元素名
    pub species: Vec<String>,
}

impl SpgCell {
    /// 规范化晶体结构，对所有坐标加上 `shift`
    pub fn from_crystal(crystal: &Crystal, shift: [f64; 3]) -> Self {
        let species: Vec<String> = crystal.species().into_iter().map(String::from).collect();

        let mut positions = Vec::with_capacity(crystal.atoms.len());
        let mut types = Vec::with_capacity(crystal.atoms.len());

        for (i, name) in species.iter().enumerate() {
            for atom in crystal.atoms.iter().filter(|a| a.element == *name) {
                let p = atom.position;
                positions.push([p[0] + shift[0], p[1] + shift[1], p[2] + shift[2]]);
                types.push(i as i32 + 1);
            }
        }

        SpgCell {
            lattice: crystal.lattice.to_columns(),
            positions,
            types,
            species,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.types.len()
    }

    /// 类型编号对应的元素名
    pub fn species_of(&self, type_code: i32) -> Option<&str> {
        usize::try_from(type_code - 1)
            .ok()
            .and_then(|i| self.species.get(i))
            .map(String::as_str)
    }

    /// 转回 `Crystal`（行向量晶格，带元素名的原子）
    ///
    /// 未知类型编号使用字母占位名。
    pub fn to_crystal(&self, name: &str) -> Crystal {
        let atoms = self
            .positions
            .iter()
            .zip(self.types.iter())
            .map(|(pos, &t)| {
                let element = match self.species_of(t) {
                    Some(s) => s.to_string(),
                    None => placeholder_name(t),
                };
                Atom::new(element, *pos)
            })
            .collect();

        Crystal::new(name, Lattice::from_columns(self.lattice), atoms)
    }
}

/// 分数坐标约化到 [0, 1)
pub fn reduce_fraction(x: f64) -> f64 {
    let r = x - x.floor();
    // x 为极小负数时 r 会舍入成 1.0
    if r >= 1.0 {
        r - 1.0
    } else {
        r
    }
}

fn placeholder_name(type_code: i32) -> String {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    match usize::try_from(type_code) {
        Ok(i) if i < LETTERS.len() => (LETTERS[i] as char).to_string(),
        _ => format!("T{}", type_code),
    }
}
