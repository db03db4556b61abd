//! # 对称性后端模块
//!
//! 对称性计算（包括点群识别）全部交给外部引擎，本模块只定义调用边界
//! `SymmetryEngine`，以及规范化晶胞、Hall 映射表等辅助数据。
//!
//! ## 子模块
//! - `cell`: 晶胞规范化 (`SpgCell`)
//! - `hall`: 空间群号 → Hall 序号表
//! - `moyo`: 基于 `moyo` crate 的默认引擎
//! - `spglib`: 直接调用 spglib C 库的引擎（`spglib` feature）
//!
//! ## 依赖关系
//! - 被 `commands/` 使用
//! - 使用 `models/dataset.rs`

pub mod cell;
pub mod hall;
pub mod moyo;
#[cfg(feature = "spglib")]
pub mod spglib;
#[cfg(test)]
pub mod stub;

pub use cell::SpgCell;

use crate::error::Result;
use crate::models::{PointGroup, SymmetryDataset, SymmetryOperations};

/// 对称性判定容差
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    /// 距离容差（与晶格同单位）
    pub symprec: f64,
    /// 角度容差（度）；None 表示使用引擎默认策略
    pub angle_tolerance: Option<f64>,
}

impl Tolerance {
    pub fn new(symprec: f64, angle_tolerance: Option<f64>) -> Self {
        Tolerance {
            symprec,
            // 负值同样表示使用默认策略
            angle_tolerance: angle_tolerance.filter(|a| *a >= 0.0),
        }
    }
}

/// 外部对称性引擎
///
/// 空间群无法在容差内确定时返回 `Ok(None)`，这不是错误。
pub trait SymmetryEngine {
    /// 引擎名称，用于诊断信息
    fn name(&self) -> &'static str;

    /// 完整的对称性分析；`hall_number == 0` 表示自动选择标准设置
    fn dataset(
        &self,
        cell: &SpgCell,
        hall_number: i32,
        tolerance: Tolerance,
    ) -> Result<Option<SymmetryDataset>>;

    /// 只求对称操作，不做分类
    fn operations(&self, cell: &SpgCell, symprec: f64) -> Result<SymmetryOperations>;

    /// 由旋转矩阵求点群（符号、编号、到标准轴的变换矩阵）
    ///
    /// 旋转不构成晶体学点群时返回 `SymError::Backend`。
    fn point_group(&self, rotations: &[[[i32; 3]; 3]]) -> Result<PointGroup>;

    /// 约化为原胞
    fn primitive_cell(&self, cell: &SpgCell, tolerance: Tolerance) -> Result<Option<SpgCell>>;
}

/// 可选的对称性后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Backend {
    /// Pure-Rust moyo library
    #[default]
    Moyo,
    /// spglib C library via FFI (libsymspg; needs the `spglib` feature)
    Spglib,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Moyo => write!(f, "moyo"),
            Backend::Spglib => write!(f, "spglib"),
        }
    }
}

/// 创建对应后端的引擎
///
/// 未启用 `spglib` feature 时选择 spglib 会返回参数错误。
pub fn create_engine(backend: Backend) -> Result<Box<dyn SymmetryEngine>> {
    match backend {
        Backend::Moyo => Ok(Box::new(moyo::MoyoEngine)),
        #[cfg(feature = "spglib")]
        Backend::Spglib => Ok(Box::new(spglib::SpglibEngine)),
        #[cfg(not(feature = "spglib"))]
        Backend::Spglib => Err(crate::error::SymError::InvalidArgument(
            "this build has no spglib support; rebuild with `--features spglib`".to_string(),
        )),
    }
}
