//! # moyo 对称性引擎
//!
//! 使用纯 Rust 实现的 `moyo` 库完成空间群判定、点群识别、Wyckoff 位置和原胞约化。
//! Hall 符号、HM 符号和设置标签由 moyo 的 Hall 符号数据库补全，
//! 点群符号取自算术晶类表中的几何晶类。
//!
//! ## 依赖关系
//! - 被 `symmetry/mod.rs` 的 `create_engine` 使用
//! - 使用 `moyo`, `nalgebra`

use crate::error::{Result, SymError};
use crate::models::dataset::wyckoff_index;
use crate::models::{PointGroup, SymmetryDataset, SymmetryOperations};
use crate::symmetry::cell::reduce_fraction;
use crate::symmetry::{SpgCell, SymmetryEngine, Tolerance};

use moyo::base::{AngleTolerance, Cell, Lattice, Operation};
use moyo::data::{arithmetic_crystal_class_entry, hall_symbol_entry, ArithmeticNumber, Setting};
use moyo::identify::PointGroup as MoyoPointGroup;
use moyo::MoyoDataset;
use nalgebra::{Matrix3, Vector3};

/// 基于 `moyo` 的引擎
#[derive(Debug, Clone, Copy, Default)]
pub struct MoyoEngine;

impl MoyoEngine {
    fn run(&self, cell: &SpgCell, setting: Setting, tolerance: Tolerance) -> Option<MoyoDataset> {
        let angle = match tolerance.angle_tolerance {
            Some(deg) => AngleTolerance::Radian(deg.to_radians()),
            None => AngleTolerance::Default,
        };
        MoyoDataset::new(&to_moyo_cell(cell), tolerance.symprec, angle, setting).ok()
    }

    fn error(&self, reason: impl Into<String>) -> SymError {
        SymError::Backend {
            engine: self.name().to_string(),
            reason: reason.into(),
        }
    }
}

impl SymmetryEngine for MoyoEngine {
    fn name(&self) -> &'static str {
        "moyo"
    }

    fn dataset(
        &self,
        cell: &SpgCell,
        hall_number: i32,
        tolerance: Tolerance,
    ) -> Result<Option<SymmetryDataset>> {
        let setting = if hall_number == 0 {
            Setting::Spglib
        } else {
            Setting::HallNumber(hall_number)
        };

        let Some(ds) = self.run(cell, setting, tolerance) else {
            return Ok(None);
        };

        let entry = hall_symbol_entry(ds.hall_number)
            .ok_or_else(|| self.error(format!("unknown Hall number {}", ds.hall_number)))?;

        let wyckoffs = ds
            .wyckoffs
            .iter()
            .map(|&c| {
                wyckoff_index(c).ok_or_else(|| self.error(format!("unknown Wyckoff letter '{}'", c)))
            })
            .collect::<Result<Vec<_>>>()?;

        let std_cell = from_moyo_cell(&ds.std_cell, &cell.species);
        // moyo 不对标准化晶胞的坐标取模
        let std_positions = std_cell
            .positions
            .iter()
            .map(|&p| p.map(reduce_fraction))
            .collect();

        Ok(Some(SymmetryDataset {
            spacegroup_number: ds.number,
            // 数据库中的 HM 短符号可能带空格，统一为 "Pm-3m" 形式
            international_symbol: entry.hm_short.split_whitespace().collect(),
            hall_number: ds.hall_number,
            hall_symbol: entry.hall_symbol.to_string(),
            choice: entry.setting.to_string(),
            transformation_matrix: matrix_to_array(&ds.std_linear),
            origin_shift: vector_to_array(&ds.std_origin_shift),
            operations: to_operations(&ds.operations),
            wyckoffs,
            std_lattice: std_cell.lattice,
            std_types: std_cell.types,
            std_positions,
        }))
    }

    fn operations(&self, cell: &SpgCell, symprec: f64) -> Result<SymmetryOperations> {
        let tolerance = Tolerance::new(symprec, None);
        Ok(self
            .run(cell, Setting::Spglib, tolerance)
            .map(|ds| to_operations(&ds.operations))
            .unwrap_or_default())
    }

    fn point_group(&self, rotations: &[[[i32; 3]; 3]]) -> Result<PointGroup> {
        // 心化平移带来的重复旋转先去掉
        let mut unique: Vec<Matrix3<i32>> = Vec::with_capacity(rotations.len());
        for r in rotations {
            let m = Matrix3::new(
                r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
            );
            if !unique.contains(&m) {
                unique.push(m);
            }
        }

        let pg = MoyoPointGroup::new(&unique).map_err(|e| self.error(e.to_string()))?;
        let entry = arithmetic_crystal_class_entry(pg.arithmetic_number).ok_or_else(|| {
            self.error(format!(
                "unknown arithmetic crystal class {}",
                pg.arithmetic_number
            ))
        })?;

        Ok(PointGroup {
            symbol: entry.geometric_crystal_class.to_string(),
            number: geometric_class_number(pg.arithmetic_number),
            transformation: Some(int_matrix_to_array(&pg.prim_trans_mat)),
        })
    }

    fn primitive_cell(&self, cell: &SpgCell, tolerance: Tolerance) -> Result<Option<SpgCell>> {
        Ok(self
            .run(cell, Setting::Spglib, tolerance)
            .map(|ds| from_moyo_cell(&ds.prim_std_cell, &cell.species)))
    }
}

fn to_moyo_cell(cell: &SpgCell) -> Cell {
    let l = cell.lattice;
    // Lattice::new 接受行向量基矢
    let basis = Matrix3::new(
        l[0][0], l[1][0], l[2][0], l[0][1], l[1][1], l[2][1], l[0][2], l[1][2], l[2][2],
    );
    let positions = cell
        .positions
        .iter()
        .map(|p| Vector3::new(p[0], p[1], p[2]))
        .collect();
    Cell::new(Lattice::new(basis), positions, cell.types.clone())
}

fn from_moyo_cell(cell: &Cell, species: &[String]) -> SpgCell {
    SpgCell {
        // basis 的列为基矢，与 SpgCell 的约定一致
        lattice: matrix_to_array(&cell.lattice.basis),
        positions: cell.positions.iter().map(vector_to_array).collect(),
        types: cell.numbers.clone(),
        species: species.to_vec(),
    }
}

fn to_operations(operations: &[Operation]) -> SymmetryOperations {
    let rotations = operations
        .iter()
        .map(|op| {
            let r = &op.rotation;
            [
                [r[(0, 0)], r[(0, 1)], r[(0, 2)]],
                [r[(1, 0)], r[(1, 1)], r[(1, 2)]],
                [r[(2, 0)], r[(2, 1)], r[(2, 2)]],
            ]
        })
        .collect();
    let translations = operations
        .iter()
        .map(|op| vector_to_array(&op.translation))
        .collect();
    SymmetryOperations::new(rotations, translations)
}

/// 几何晶类编号 (1-32)
///
/// 算术晶类表按几何晶类排列，数到 `arithmetic_number` 为止出现过的不同几何晶类即可。
fn geometric_class_number(arithmetic_number: ArithmeticNumber) -> i32 {
    let mut number = 0;
    let mut previous = None;
    for entry in (1..=arithmetic_number).filter_map(arithmetic_crystal_class_entry) {
        if previous != Some(entry.geometric_crystal_class) {
            number += 1;
            previous = Some(entry.geometric_crystal_class);
        }
    }
    number
}

fn int_matrix_to_array(m: &Matrix3<i32>) -> [[i32; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

fn matrix_to_array(m: &Matrix3<f64>) -> [[f64; 3]; 3] {
    [
        [m[(0, 0)], m[(0, 1)], m[(0, 2)]],
        [m[(1, 0)], m[(1, 1)], m[(1, 2)]],
        [m[(2, 0)], m[(2, 1)], m[(2, 2)]],
    ]
}

fn vector_to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v[0], v[1], v[2]]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Crystal, Lattice as CrystalLattice};

    fn cubic(a: f64, atoms: Vec<Atom>) -> SpgCell {
        let lattice = CrystalLattice::from_vectors([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]);
        SpgCell::from_crystal(&Crystal::new("test", lattice, atoms), [0.0; 3])
    }

    fn simple_cubic() -> SpgCell {
        cubic(1.0, vec![Atom::new("Po", [0.0, 0.0, 0.0])])
    }

    fn rock_salt() -> SpgCell {
        cubic(
            5.64,
            vec![
                Atom::new("Na", [0.0, 0.0, 0.0]),
                Atom::new("Na", [0.5, 0.5, 0.0]),
                Atom::new("Na", [0.5, 0.0, 0.5]),
                Atom::new("Na", [0.0, 0.5, 0.5]),
                Atom::new("Cl", [0.5, 0.0, 0.0]),
                Atom::new("Cl", [0.0, 0.5, 0.0]),
                Atom::new("Cl", [0.0, 0.0, 0.5]),
                Atom::new("Cl", [0.5, 0.5, 0.5]),
            ],
        )
    }

    fn tol() -> Tolerance {
        Tolerance::new(1e-5, None)
    }

    #[test]
    fn test_simple_cubic_dataset() {
        let engine = MoyoEngine;
        let ds = engine.dataset(&simple_cubic(), 0, tol()).unwrap().unwrap();

        assert_eq!(ds.spacegroup_number, 221);
        assert_eq!(ds.international_symbol, "Pm-3m");
        assert_eq!(ds.hall_number, 517);
        assert_eq!(ds.operations.len(), 48);
        assert_eq!(ds.wyckoffs, vec![0]);

        let pg = engine.point_group(&ds.operations.rotations).unwrap();
        assert_eq!(pg.symbol, "m-3m");
        assert_eq!(pg.number, 32);
        let t = pg.transformation.unwrap();
        let det = t[0][0] * (t[1][1] * t[2][2] - t[1][2] * t[2][1])
            - t[0][1] * (t[1][0] * t[2][2] - t[1][2] * t[2][0])
            + t[0][2] * (t[1][0] * t[2][1] - t[1][1] * t[2][0]);
        assert_eq!(det, 1);
    }

    #[test]
    fn test_point_group_classes() {
        const E: [[i32; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
        const INV: [[i32; 3]; 3] = [[-1, 0, 0], [0, -1, 0], [0, 0, -1]];
        const C2Z: [[i32; 3]; 3] = [[-1, 0, 0], [0, -1, 0], [0, 0, 1]];
        const MZ: [[i32; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, -1]];

        let engine = MoyoEngine;
        let one = engine.point_group(&[E]).unwrap();
        assert_eq!((one.symbol.as_str(), one.number), ("1", 1));

        // 重复的旋转不影响结果
        let ci = engine.point_group(&[E, INV, E, INV]).unwrap();
        assert_eq!((ci.symbol.as_str(), ci.number), ("-1", 2));

        let c2h = engine.point_group(&[E, C2Z, INV, MZ]).unwrap();
        assert_eq!((c2h.symbol.as_str(), c2h.number), ("2/m", 5));

        // 不构成群
        assert!(matches!(
            engine.point_group(&[E, C2Z, INV]),
            Err(SymError::Backend { .. })
        ));
        assert!(engine.point_group(&[]).is_err());
    }

    #[test]
    fn test_shift_keeps_space_group() {
        let lattice = CrystalLattice::from_vectors([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
        let crystal = Crystal::new("Po", lattice, vec![Atom::new("Po", [0.0, 0.0, 0.0])]);
        let cell = SpgCell::from_crystal(&crystal, [0.5, 0.5, 0.5]);
        assert_eq!(cell.positions[0], [0.5, 0.5, 0.5]);

        let ds = MoyoEngine.dataset(&cell, 0, tol()).unwrap().unwrap();
        assert_eq!(ds.spacegroup_number, 221);
    }

    #[test]
    fn test_rock_salt() {
        let engine = MoyoEngine;
        let ds = engine.dataset(&rock_salt(), 0, tol()).unwrap().unwrap();

        assert_eq!(ds.spacegroup_number, 225);
        assert_eq!(ds.operations.len(), 192);
        let pg = engine.point_group(&ds.operations.rotations).unwrap();
        assert_eq!(pg.symbol, "m-3m");
        // Na 4a, Cl 4b
        assert_eq!(ds.wyckoffs[0], 0);
        assert_eq!(ds.wyckoffs[7], 1);
    }

    #[test]
    fn test_std_positions_are_wrapped() {
        let crystal = Crystal::new(
            "NaCl",
            CrystalLattice::from_vectors([[5.64, 0.0, 0.0], [0.0, 5.64, 0.0], [0.0, 0.0, 5.64]]),
            vec![
                Atom::new("Na", [0.0, 0.0, 0.0]),
                Atom::new("Na", [0.5, 0.5, 0.0]),
                Atom::new("Na", [0.5, 0.0, 0.5]),
                Atom::new("Na", [0.0, 0.5, 0.5]),
                Atom::new("Cl", [0.5, 0.0, 0.0]),
                Atom::new("Cl", [0.0, 0.5, 0.0]),
                Atom::new("Cl", [0.0, 0.0, 0.5]),
                Atom::new("Cl", [0.5, 0.5, 0.5]),
            ],
        );
        let cell = SpgCell::from_crystal(&crystal, [-0.305, -0.305, 0.1]);
        let ds = MoyoEngine.dataset(&cell, 0, tol()).unwrap().unwrap();

        assert_eq!(ds.spacegroup_number, 225);
        for p in &ds.std_positions {
            assert!(p.iter().all(|x| (0.0..1.0).contains(x)), "{:?}", p);
        }
    }

    #[test]
    fn test_explicit_hall_number() {
        let ds = MoyoEngine
            .dataset(&simple_cubic(), 517, tol())
            .unwrap()
            .unwrap();
        assert_eq!(ds.hall_number, 517);
    }

    #[test]
    fn test_operations_only() {
        let bcc = cubic(
            3.0,
            vec![
                Atom::new("Fe", [0.0, 0.0, 0.0]),
                Atom::new("Fe", [0.5, 0.5, 0.5]),
            ],
        );
        let ops = MoyoEngine.operations(&bcc, 1e-5).unwrap();
        assert_eq!(ops.len(), 96);
    }

    #[test]
    fn test_primitive_cell() {
        let prim = MoyoEngine
            .primitive_cell(&rock_salt(), tol())
            .unwrap()
            .unwrap();

        assert_eq!(prim.num_atoms(), 2);
        let mut types = prim.types.clone();
        types.sort();
        assert_eq!(types, vec![1, 2]);
        assert_eq!(prim.species, vec!["Na", "Cl"]);
    }
}
