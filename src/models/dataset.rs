//! # 对称性数据集模型
//!
//! 对称性引擎返回的结果：空间群、Hall 符号、变换矩阵、对称操作、
//! Wyckoff 位置和标准化晶胞。所有矩阵都采用 spglib 约定（列向量为基矢）。
//!
//! ## 依赖关系
//! - 由 `symmetry/` 引擎构造
//! - 被 `report/` 和 `commands/` 读取

/// Wyckoff 字母表，按 Wyckoff 索引取字母
pub const WYCKOFF_LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 根据 Wyckoff 索引取字母
pub fn wyckoff_letter(index: usize) -> Option<char> {
    WYCKOFF_LETTERS.chars().nth(index)
}

/// 字母到 Wyckoff 索引
pub fn wyckoff_index(letter: char) -> Option<usize> {
    WYCKOFF_LETTERS.chars().position(|c| c == letter)
}

/// 对称操作列表（旋转与平移一一对应）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SymmetryOperations {
    pub rotations: Vec<[[i32; 3]; 3]>,
    pub translations: Vec<[f64; 3]>,
}

impl SymmetryOperations {
    pub fn new(rotations: Vec<[[i32; 3]; 3]>, translations: Vec<[f64; 3]>) -> Self {
        debug_assert_eq!(rotations.len(), translations.len());
        SymmetryOperations {
            rotations,
            translations,
        }
    }

    pub fn len(&self) -> usize {
        self.rotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rotations.is_empty()
    }

    /// 遍历 (旋转, 平移) 对
    pub fn iter(&self) -> impl Iterator<Item = (&[[i32; 3]; 3], &[f64; 3])> {
        self.rotations.iter().zip(self.translations.iter())
    }
}

/// 一次完整的对称性查询结果
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetryDataset {
    /// 国际表空间群号 (1-230)
    pub spacegroup_number: i32,
    /// Hermann-Mauguin 短符号
    pub international_symbol: String,
    /// Hall 序号 (1-530)
    pub hall_number: i32,
    pub hall_symbol: String,
    /// 轴/原点选择标签，可能为空
    pub choice: String,
    pub transformation_matrix: [[f64; 3]; 3],
    pub origin_shift: [f64; 3],
    pub operations: SymmetryOperations,
    /// 每个输入原子的 Wyckoff 索引
    pub wyckoffs: Vec<usize>,
    /// 标准化晶胞（列向量）
    pub std_lattice: [[f64; 3]; 3],
    pub std_types: Vec<i32>,
    pub std_positions: Vec<[f64; 3]>,
}

/// 晶体学点群
#[derive(Debug, Clone, PartialEq)]
pub struct PointGroup {
    /// Hermann-Mauguin 符号，例如 `m-3m`
    pub symbol: String,
    /// 点群序号 (1-32)
    pub number: i32,
    /// 到标准轴的变换矩阵；仅部分引擎提供
    pub transformation: Option<[[i32; 3]; 3]>,
}
