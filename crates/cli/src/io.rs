//! Half-space file loading and JSON result shapes.
//!
//! Inputs
//! - `.csv` / `.parquet`: columns `a, b, c, d`, one half-space `a x + b y + c z + d <= 0` per row.
//! - anything else: JSON, either `{"halfspaces": [[a, b, c, d], ...]}` or a bare array.

use anyhow::{bail, Context, Result};
use corridor_geom::geom3::{Enumeration, HPoly3};
use nalgebra::Vector3;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const COLUMNS: [&str; 4] = ["a", "b", "c", "d"];

#[derive(Deserialize)]
#[serde(untagged)]
enum HalfspaceDoc {
    Wrapped { halfspaces: Vec<[f64; 4]> },
    Bare(Vec<[f64; 4]>),
}

#[derive(Serialize)]
pub struct InteriorOut {
    pub interior: [f64; 3],
}

#[derive(Serialize)]
pub struct OverlapOut {
    pub overlap: bool,
    pub margin: Option<f64>,
}

#[derive(Serialize)]
pub struct VerticesOut {
    pub vertices: Vec<[f64; 3]>,
}

impl From<&Enumeration> for VerticesOut {
    fn from(e: &Enumeration) -> Self {
        Self {
            vertices: e.vertices.iter().map(to_array).collect(),
        }
    }
}

fn to_array(v: &Vector3<f64>) -> [f64; 3] {
    [v.x, v.y, v.z]
}

pub fn load_halfspaces(path: &Path) -> Result<HPoly3> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let poly = match ext {
        "csv" => {
            let lf = LazyCsvReader::new(path)
                .with_has_header(true)
                .with_infer_schema_length(Some(100))
                .finish()
                .with_context(|| format!("opening {}", path.display()))?;
            rows_from_frame(lf)?
        }
        "parquet" => {
            let lf = LazyFrame::scan_parquet(path, ScanArgsParquet::default())
                .with_context(|| format!("opening {}", path.display()))?;
            rows_from_frame(lf)?
        }
        _ => {
            let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
            let doc: HalfspaceDoc = serde_json::from_slice(&bytes)
                .with_context(|| format!("parsing half-spaces from {}", path.display()))?;
            match doc {
                HalfspaceDoc::Wrapped { halfspaces } | HalfspaceDoc::Bare(halfspaces) => {
                    HPoly3::from_rows(&halfspaces)
                }
            }
        }
    };
    tracing::debug!(path = %path.display(), rows = poly.len(), "loaded half-spaces");
    Ok(poly)
}

fn rows_from_frame(lf: LazyFrame) -> Result<HPoly3> {
    let df = lf
        .select(COLUMNS.map(|c| col(c).cast(DataType::Float64)))
        .collect()
        .context("expected numeric columns a, b, c, d")?;
    let mut cols = Vec::with_capacity(COLUMNS.len());
    for name in COLUMNS {
        let ca = df.column(name)?.f64()?;
        let vals: Option<Vec<f64>> = ca.into_iter().collect();
        match vals {
            Some(v) => cols.push(v),
            None => bail!("column {name} has missing values"),
        }
    }
    let rows: Vec<[f64; 4]> = (0..df.height())
        .map(|i| [cols[0][i], cols[1][i], cols[2][i], cols[3][i]])
        .collect();
    Ok(HPoly3::from_rows(&rows))
}

/// Pretty JSON to `path`, creating parent directories.
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use corridor_geom::geom3::{enumerate_vertices, DEFAULT_EPS};
    use serde_json::Value;
    use tempfile::tempdir;

    const CUBE_ROWS: &str = "[[1,0,0,-1],[-1,0,0,0],[0,1,0,-1],[0,-1,0,0],[0,0,1,-1],[0,0,-1,0]]";

    #[test]
    fn json_wrapped_and_bare_agree() {
        let dir = tempdir().unwrap();
        let wrapped = dir.path().join("cube.json");
        let bare = dir.path().join("cube_bare.json");
        fs::write(&wrapped, format!("{{\"halfspaces\": {CUBE_ROWS}}}")).unwrap();
        fs::write(&bare, CUBE_ROWS).unwrap();
        let a = load_halfspaces(&wrapped).unwrap();
        let b = load_halfspaces(&bare).unwrap();
        assert_eq!(a.len(), 6);
        assert_eq!(a, b);
    }

    #[test]
    fn csv_columns_by_name() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("slab.csv");
        // Column order differs from a,b,c,d; integers are cast.
        fs::write(&path, "d,a,b,c\n-1,1,0,0\n0,-1,0,0\n").unwrap();
        let poly = load_halfspaces(&path).unwrap();
        assert_eq!(poly.len(), 2);
        assert_eq!(poly.hs[0].n, Vector3::new(1.0, 0.0, 0.0));
        assert_eq!(poly.hs[0].d, -1.0);
        assert_eq!(poly.hs[1].d, 0.0);
    }

    #[test]
    fn malformed_inputs_are_errors() {
        let dir = tempdir().unwrap();
        let json = dir.path().join("bad.json");
        fs::write(&json, "[[1, 2, 3]]").unwrap();
        assert!(load_halfspaces(&json).is_err());

        let csv = dir.path().join("bad.csv");
        fs::write(&csv, "x,y\n1,2\n").unwrap();
        assert!(load_halfspaces(&csv).is_err());

        assert!(load_halfspaces(&dir.path().join("missing.json")).is_err());
    }

    #[test]
    fn vertices_output_shape() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cube.json");
        fs::write(&input, CUBE_ROWS).unwrap();
        let poly = load_halfspaces(&input).unwrap();
        let res = enumerate_vertices(&poly, None, DEFAULT_EPS).unwrap();

        let out = dir.path().join("nested/out/verts.json");
        write_json(&out, &VerticesOut::from(&res)).unwrap();
        let parsed: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        let verts = parsed["vertices"].as_array().unwrap();
        assert_eq!(verts.len(), 8);
        assert_eq!(verts[0].as_array().unwrap().len(), 3);
    }
}
