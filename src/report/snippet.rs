//! # C 代码片段
//!
//! 生成一个独立的 C 程序，用规范化后的晶胞调用
//! `spg_get_international` 并打印 "<symbol> (<number>)"，
//! 方便直接拿去和 spglib 对照。
//!
//! 浮点数用 `{:?}` 输出（最短可回读表示，例如 `1.0`、`1e-5`），
//! 都是合法的 C 字面量。

use crate::error::{Result, SymError};
use crate::symmetry::SpgCell;
use std::fmt::Write as _;
use std::path::Path;

/// 片段的固定文件名
pub const SNIPPET_FILE: &str = "findspg.c";

/// 生成 C 源码
pub fn render(cell: &SpgCell, symprec: f64) -> String {
    let l = &cell.lattice;
    let mut src = String::new();

    src.push_str(
        "#include <stdio.h>\n\
         #include \"spglib.h\"\n\
         \n\
         static void get_international(void);\n\
         \n\
         int main(void)\n\
         {\n\
         \x20 get_international();\n\
         \x20 return 0;\n\
         }\n\
         \n\
         static void get_international(void)\n\
         {\n",
    );

    // String 的 fmt::Write 不会失败
    let _ = writeln!(
        src,
        "  double lattice[3][3] = {{{{{:?}, {:?}, {:?}}},",
        l[0][0], l[0][1], l[0][2]
    );
    let _ = writeln!(
        src,
        "                          {{{:?}, {:?}, {:?}}},",
        l[1][0], l[1][1], l[1][2]
    );
    let _ = writeln!(
        src,
        "                          {{{:?}, {:?}, {:?}}}}};",
        l[2][0], l[2][1], l[2][2]
    );

    src.push_str("  double position[][3] =\n    {\n");
    for p in &cell.positions {
        let _ = writeln!(src, "      {{{:?}, {:?}, {:?}}},", p[0], p[1], p[2]);
    }
    src.push_str("    };\n");

    src.push_str("  int types[] = {");
    for t in &cell.types {
        let _ = write!(src, "{}, ", t);
    }
    src.push_str("};\n");

    let _ = writeln!(src, "  int num_spg, num_atom = {};", cell.num_atoms());
    src.push_str("  char symbol[21];\n\n");
    let _ = writeln!(
        src,
        "  num_spg = spg_get_international(symbol, lattice, position, types, num_atom, {:?});",
        symprec
    );
    src.push_str(
        "  if (num_spg > 0) {\n\
         \x20   printf(\"%s (%d)\\n\", symbol, num_spg);\n\
         \x20 }\n\
         }\n",
    );

    src
}

/// 写入 `dir/findspg.c`，返回写入的路径
pub fn write_snippet(dir: &Path, cell: &SpgCell, symprec: f64) -> Result<std::path::PathBuf> {
    let path = dir.join(SNIPPET_FILE);
    std::fs::write(&path, render(cell, symprec)).map_err(|e| SymError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(path)
}
