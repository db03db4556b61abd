//! # 数据模型模块
//!
//! 定义晶体结构和对称性数据集模型。
//!
//! ## 依赖关系
//! - 被 `parsers/`、`symmetry/`、`report/` 和 `commands/` 使用
//! - 子模块: structure, dataset

pub mod dataset;
pub mod structure;

pub use dataset::{PointGroup, SymmetryDataset, SymmetryOperations};
pub use structure::{Atom, Crystal, Lattice};
