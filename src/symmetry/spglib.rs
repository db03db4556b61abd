//! # spglib FFI 引擎
//!
//! 直接链接系统中的 spglib C 库 (`libsymspg`)，逐个调用
//! `spgat_get_dataset_with_hall_number`、`spg_get_symmetry`、
//! `spg_get_pointgroup` 和 `spgat_standardize_cell`。
//! 结构体布局对应 spglib 2.x 的 `spglib.h`。
//!
//! 仅在启用 `spglib` feature 时编译。
//!
//! ## 依赖关系
//! - 被 `symmetry/mod.rs` 的 `create_engine` 使用
//! - 需要链接 `libsymspg`

use crate::error::{Result, SymError};
use crate::models::{PointGroup, SymmetryDataset, SymmetryOperations};
use crate::symmetry::{SpgCell, SymmetryEngine, Tolerance};

use std::ffi::CStr;
use std::os::raw::{c_char, c_int};

#[repr(C)]
struct SpglibDataset {
    spacegroup_number: c_int,
    hall_number: c_int,
    international_symbol: [c_char; 11],
    hall_symbol: [c_char; 17],
    choice: [c_char; 6],
    transformation_matrix: [[f64; 3]; 3],
    origin_shift: [f64; 3],
    n_operations: c_int,
    rotations: *mut [[c_int; 3]; 3],
    translations: *mut [f64; 3],
    n_atoms: c_int,
    wyckoffs: *mut c_int,
    site_symmetry_symbols: *mut [c_char; 7],
    equivalent_atoms: *mut c_int,
    crystallographic_orbits: *mut c_int,
    primitive_lattice: [[f64; 3]; 3],
    mapping_to_primitive: *mut c_int,
    n_std_atoms: c_int,
    std_lattice: [[f64; 3]; 3],
    std_types: *mut c_int,
    std_positions: *mut [f64; 3],
    std_rotation_matrix: [[f64; 3]; 3],
    std_mapping_to_primitive: *mut c_int,
    pointgroup_symbol: [c_char; 6],
}

#[link(name = "symspg")]
extern "C" {
    fn spgat_get_dataset_with_hall_number(
        lattice: *const [f64; 3],
        position: *const [f64; 3],
        types: *const c_int,
        num_atom: c_int,
        hall_number: c_int,
        symprec: f64,
        angle_tolerance: f64,
    ) -> *mut SpglibDataset;

    fn spg_free_dataset(dataset: *mut SpglibDataset);

    fn spg_get_symmetry(
        rotation: *mut [[c_int; 3]; 3],
        translation: *mut [f64; 3],
        max_size: c_int,
        lattice: *const [f64; 3],
        position: *const [f64; 3],
        types: *const c_int,
        num_atom: c_int,
        symprec: f64,
    ) -> c_int;

    fn spg_get_pointgroup(
        symbol: *mut c_char,
        trans_mat: *mut [c_int; 3],
        rotations: *const [[c_int; 3]; 3],
        num_rotations: c_int,
    ) -> c_int;

    fn spgat_standardize_cell(
        lattice: *mut [f64; 3],
        position: *mut [f64; 3],
        types: *mut c_int,
        num_atom: c_int,
        to_primitive: c_int,
        no_idealize: c_int,
        symprec: f64,
        angle_tolerance: f64,
    ) -> c_int;
}

/// spglib 对未设置的角度容差约定为负值
fn angle_arg(tolerance: Tolerance) -> f64 {
    tolerance.angle_tolerance.unwrap_or(-1.0)
}

fn c_string(buf: &[c_char]) -> String {
    // 字段都是以 NUL 结尾的定长数组
    unsafe { CStr::from_ptr(buf.as_ptr()) }
        .to_string_lossy()
        .into_owned()
}

/// 把 C 侧数组拷贝成 Vec；长度为 0 或指针为空时返回空
unsafe fn copy_slice<T: Copy>(ptr: *const T, len: c_int) -> Vec<T> {
    if ptr.is_null() || len <= 0 {
        return Vec::new();
    }
    std::slice::from_raw_parts(ptr, len as usize).to_vec()
}

/// 链接 libsymspg 的引擎
#[derive(Debug, Clone, Copy, Default)]
pub struct SpglibEngine;

impl SpglibEngine {
    fn num_atoms(&self, cell: &SpgCell) -> Result<c_int> {
        c_int::try_from(cell.num_atoms()).map_err(|_| SymError::Backend {
            engine: self.name().to_string(),
            reason: format!("too many atoms: {}", cell.num_atoms()),
        })
    }
}

impl SymmetryEngine for SpglibEngine {
    fn name(&self) -> &'static str {
        "spglib"
    }

    fn dataset(
        &self,
        cell: &SpgCell,
        hall_number: i32,
        tolerance: Tolerance,
    ) -> Result<Option<SymmetryDataset>> {
        let num_atom = self.num_atoms(cell)?;
        let raw = unsafe {
            spgat_get_dataset_with_hall_number(
                cell.lattice.as_ptr(),
                cell.positions.as_ptr(),
                cell.types.as_ptr(),
                num_atom,
                hall_number,
                tolerance.symprec,
                angle_arg(tolerance),
            )
        };
        if raw.is_null() {
            return Ok(None);
        }

        let dataset = unsafe {
            let ds = &*raw;
            let wyckoffs = copy_slice(ds.wyckoffs, ds.n_atoms)
                .into_iter()
                .map(|w| w.max(0) as usize)
                .collect();
            let converted = SymmetryDataset {
                spacegroup_number: ds.spacegroup_number,
                international_symbol: c_string(&ds.international_symbol),
                hall_number: ds.hall_number,
                hall_symbol: c_string(&ds.hall_symbol),
                choice: c_string(&ds.choice),
                transformation_matrix: ds.transformation_matrix,
                origin_shift: ds.origin_shift,
                operations: SymmetryOperations::new(
                    copy_slice(ds.rotations, ds.n_operations),
                    copy_slice(ds.translations, ds.n_operations),
                ),
                wyckoffs,
                std_lattice: ds.std_lattice,
                std_types: copy_slice(ds.std_types, ds.n_std_atoms),
                std_positions: copy_slice(ds.std_positions, ds.n_std_atoms),
            };
            spg_free_dataset(raw);
            converted
        };

        Ok(Some(dataset))
    }

    fn operations(&self, cell: &SpgCell, symprec: f64) -> Result<SymmetryOperations> {
        let num_atom = self.num_atoms(cell)?;
        let max_size = 48 * cell.num_atoms().max(1);
        let mut rotations = vec![[[0 as c_int; 3]; 3]; max_size];
        let mut translations = vec![[0.0f64; 3]; max_size];

        let n = unsafe {
            spg_get_symmetry(
                rotations.as_mut_ptr(),
                translations.as_mut_ptr(),
                max_size as c_int,
                cell.lattice.as_ptr(),
                cell.positions.as_ptr(),
                cell.types.as_ptr(),
                num_atom,
                symprec,
            )
        };

        let n = n.max(0) as usize;
        rotations.truncate(n);
        translations.truncate(n);
        Ok(SymmetryOperations::new(rotations, translations))
    }

    fn point_group(&self, rotations: &[[[i32; 3]; 3]]) -> Result<PointGroup> {
        let mut symbol = [0 as c_char; 6];
        let mut trans_mat = [[0 as c_int; 3]; 3];
        let number = unsafe {
            spg_get_pointgroup(
                symbol.as_mut_ptr(),
                trans_mat.as_mut_ptr(),
                rotations.as_ptr(),
                rotations.len() as c_int,
            )
        };
        if number <= 0 {
            return Err(SymError::Backend {
                engine: self.name().to_string(),
                reason: "point group not found".to_string(),
            });
        }

        Ok(PointGroup {
            symbol: c_string(&symbol).trim().to_string(),
            number,
            transformation: Some(trans_mat),
        })
    }

    fn primitive_cell(&self, cell: &SpgCell, tolerance: Tolerance) -> Result<Option<SpgCell>> {
        let num_atom = self.num_atoms(cell)?;
        let mut lattice = cell.lattice;
        let mut positions = cell.positions.clone();
        let mut types = cell.types.clone();

        let n = unsafe {
            spgat_standardize_cell(
                lattice.as_mut_ptr(),
                positions.as_mut_ptr(),
                types.as_mut_ptr(),
                num_atom,
                1,
                0,
                tolerance.symprec,
                angle_arg(tolerance),
            )
        };
        if n <= 0 {
            return Ok(None);
        }

        positions.truncate(n as usize);
        types.truncate(n as usize);
        Ok(Some(SpgCell {
            lattice,
            positions,
            types,
            species: cell.species.clone(),
        }))
    }
}
