//! # 解析器模块
//!
//! 读取 POSCAR/CONTCAR 结构文件。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: poscar

pub mod poscar;

use crate::error::{Result, SymError};
use crate::models::Crystal;
use std::path::Path;

/// 读取结构文件
///
/// 文件名不作限制（POSCAR、CONTCAR、*.vasp 等均按 POSCAR 格式解析）。
pub fn parse_structure_file(path: &Path) -> Result<Crystal> {
    if !path.is_file() {
        return Err(SymError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    poscar::parse_poscar_file(path)
}
