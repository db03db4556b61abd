//! # 原胞输出
//!
//! 把输入晶胞约化为原胞，以 POSCAR 格式输出。
//! 原子沿用输入的元素名（通过类型编号对应）。
//!
//! ## 依赖关系
//! - 被 `commands/mod.rs` 使用
//! - 使用 `parsers/poscar.rs` 的写出函数

use crate::config::Config;
use crate::error::Result;
use crate::parsers::poscar::to_poscar_string;
use crate::symmetry::{SpgCell, SymmetryEngine};
use crate::utils::output;

/// 原胞的 POSCAR 文本；引擎无法约化时返回 None
pub fn primitive_poscar(
    engine: &dyn SymmetryEngine,
    cell: &SpgCell,
    config: &Config,
    name: &str,
) -> Result<Option<String>> {
    let primitive = match engine.primitive_cell(cell, config.tolerance())? {
        Some(p) => p,
        None => {
            output::print_warning(config.verbose, "Primitive cell could not be found");
            return Ok(None);
        }
    };

    output::print_info(
        config.verbose,
        &format!(
            "Primitive cell: {} -> {} atoms",
            cell.num_atoms(),
            primitive.num_atoms()
        ),
    );

    Ok(Some(to_poscar_string(&primitive.to_crystal(name))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Atom, Crystal, Lattice};
    use crate::parsers::poscar::parse_poscar_content;
    use crate::symmetry::stub::StubEngine;

    fn fcc_nacl() -> SpgCell {
        let crystal = Crystal::new(
            "NaCl",
            Lattice::from_vectors([[5.64, 0.0, 0.0], [0.0, 5.64, 0.0], [0.0, 0.0, 5.64]]),
            vec![
                Atom::new("Na", [0.0, 0.0, 0.0]),
                Atom::new("Cl", [0.5, 0.5, 0.5]),
            ],
        );
        SpgCell::from_crystal(&crystal, [0.0; 3])
    }

    #[test]
    fn test_primitive_round_trips_through_reader() {
        let mut reduced = fcc_nacl();
        reduced.lattice = [[0.0, 2.82, 2.82], [2.82, 0.0, 2.82], [2.82, 2.82, 0.0]];
        let engine = StubEngine::triclinic().with_primitive(reduced);

        let text = primitive_poscar(&engine, &fcc_nacl(), &Config::default(), "NaCl")
            .unwrap()
            .unwrap();
        let parsed = parse_poscar_content(&text, "x").unwrap();

        assert_eq!(parsed.name, "NaCl");
        assert_eq!(parsed.species(), vec!["Na", "Cl"]);
        assert_eq!(parsed.atoms.len(), 2);
        assert!((parsed.atoms[1].position[2] - 0.5).abs() < 1e-9);
        assert!((parsed.lattice.volume() - 2.0 * 2.82f64.powi(3)).abs() < 1e-6);
    }

    #[test]
    fn test_no_primitive() {
        let engine = StubEngine::triclinic();
        let out =
            primitive_poscar(&engine, &fcc_nacl(), &Config::default(), "NaCl").unwrap();
        assert!(out.is_none());
    }
}
