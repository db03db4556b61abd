//! # 设置枚举
//!
//! 对已识别的空间群，按 Hall 序号逐个重新查询所有设置。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 使用
//! - 使用 `symmetry/hall.rs`, `report/`

use crate::config::Config;
use crate::error::Result;
use crate::report;
use crate::symmetry::{hall, SpgCell, SymmetryEngine};
use crate::utils::output;

/// "There are N settings:" 加 N 行，每行对应一个 Hall 序号
///
/// 某个设置无法解析时仍输出一行 `<i>: -`，行数始终等于设置数。
pub fn enumerate(
    engine: &dyn SymmetryEngine,
    cell: &SpgCell,
    config: &Config,
    spacegroup_number: i32,
) -> Result<String> {
    let tolerance = config.tolerance();
    let range = hall::hall_range(spacegroup_number).unwrap_or(0..0);
    let mut out = format!(
        "There are {} settings:\n",
        hall::num_settings(spacegroup_number)
    );

    for (i, hall_number) in range.enumerate() {
        let line = match engine.dataset(cell, hall_number, tolerance)? {
            Some(ds) => {
                let pg = engine.point_group(&ds.operations.rotations)?;
                report::format_setting_line(i + 1, Some((&ds, &pg)))
            }
            None => {
                output::print_warning(
                    config.verbose,
                    &format!("Hall setting {} could not be resolved", hall_number),
                );
                report::format_setting_line(i + 1, None)
            }
        };
        out.push_str(&line);
    }

    Ok(out)
}
