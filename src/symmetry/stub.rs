//! 测试用的假引擎：返回预置数据集，并记录收到的 Hall 序号。
//! 点群识别转交 `MoyoEngine`。

use crate::error::Result;
use crate::models::{PointGroup, SymmetryDataset, SymmetryOperations};
use crate::symmetry::moyo::MoyoEngine;
use crate::symmetry::{SpgCell, SymmetryEngine, Tolerance};
use std::cell::RefCell;

pub const IDENTITY: [[i32; 3]; 3] = [[1, 0, 0], [0, 1, 0], [0, 0, 1]];
pub const INVERSION: [[i32; 3]; 3] = [[-1, 0, 0], [0, -1, 0], [0, 0, -1]];

pub struct StubEngine {
    pub dataset: Option<SymmetryDataset>,
    pub primitive: Option<SpgCell>,
    pub calls: RefCell<Vec<i32>>,
}

impl StubEngine {
    /// P-1 数据集：两个操作，两个原子
    pub fn triclinic() -> Self {
        StubEngine {
            dataset: Some(SymmetryDataset {
                spacegroup_number: 2,
                international_symbol: "P-1 ".to_string(),
                hall_number: 2,
                hall_symbol: "-P 1".to_string(),
                choice: String::new(),
                transformation_matrix: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
                origin_shift: [0.0, 0.0, 0.0],
                operations: SymmetryOperations::new(
                    vec![IDENTITY, INVERSION],
                    vec![[0.0, 0.0, 0.0], [0.0, 0.0, 0.5]],
                ),
                wyckoffs: vec![8, 26],
                std_lattice: [[2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]],
                std_types: vec![1, 2],
                std_positions: vec![[0.0, 0.0, 0.0], [0.25, -0.5, 1.0]],
            }),
            primitive: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    /// 与 `triclinic` 同形的另一份数据，空间群号为 221
    pub fn cubic() -> Self {
        let mut stub = Self::triclinic();
        if let Some(ds) = stub.dataset.as_mut() {
            ds.spacegroup_number = 221;
            ds.international_symbol = "Pm-3m".to_string();
            ds.hall_number = 517;
            ds.hall_symbol = "-P 4 2 3".to_string();
        }
        stub
    }

    /// 永远找不到空间群
    pub fn unresolved() -> Self {
        StubEngine {
            dataset: None,
            primitive: None,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn with_primitive(mut self, cell: SpgCell) -> Self {
        self.primitive = Some(cell);
        self
    }
}

impl SymmetryEngine for StubEngine {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn dataset(
        &self,
        _cell: &SpgCell,
        hall_number: i32,
        _tolerance: Tolerance,
    ) -> Result<Option<SymmetryDataset>> {
        self.calls.borrow_mut().push(hall_number);
        Ok(self.dataset.clone().map(|mut ds| {
            if hall_number != 0 {
                ds.hall_number = hall_number;
                ds.choice = format!("s{}", hall_number);
            }
            ds
        }))
    }

    fn operations(&self, _cell: &SpgCell, _symprec: f64) -> Result<SymmetryOperations> {
        Ok(SymmetryOperations::new(
            vec![IDENTITY],
            vec![[0.0, 0.0, 0.0]],
        ))
    }

    fn point_group(&self, rotations: &[[[i32; 3]; 3]]) -> Result<PointGroup> {
        MoyoEngine.point_group(rotations)
    }

    fn primitive_cell(&self, _cell: &SpgCell, _tolerance: Tolerance) -> Result<Option<SpgCell>> {
        Ok(self.primitive.clone())
    }
}
