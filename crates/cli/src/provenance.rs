//! Run records written next to CLI artifacts as `<stem>.provenance.json`.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::panic::Location;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Backends every geometric command runs on.
pub const LP_BACKEND: &str = "seidel";
pub const HULL_BACKEND: &str = "parry3d-f64";

/// Half-space file a run consumed; `bytes` is `None` when it cannot be stat'ed.
#[derive(Debug, Serialize)]
pub struct InputRef {
    pub path: String,
    pub bytes: Option<u64>,
}

impl InputRef {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_string_lossy().into_owned(),
            bytes: fs::metadata(path).ok().map(|m| m.len()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Callsite {
    pub file: &'static str,
    pub line: u32,
}

#[derive(Debug, Serialize)]
pub struct Backends {
    pub lp: &'static str,
    pub hull: &'static str,
}

/// Everything recorded about one CLI run.
#[derive(Debug, Serialize)]
pub struct RunRecord {
    pub code_rev: String,
    pub version: &'static str,
    pub command: &'static str,
    pub tag: Option<String>,
    pub eps: Option<f64>,
    pub backends: Backends,
    pub inputs: Vec<InputRef>,
    pub params: Value,
    pub outputs: Vec<String>,
    pub callsite: Option<Callsite>,
}

impl RunRecord {
    pub fn new(command: &'static str) -> Self {
        Self {
            code_rev: current_git_rev(),
            version: corridor_geom::VERSION,
            command,
            tag: None,
            eps: None,
            backends: Backends {
                lp: LP_BACKEND,
                hull: HULL_BACKEND,
            },
            inputs: Vec::new(),
            params: Value::Object(Default::default()),
            outputs: Vec::new(),
            callsite: None,
        }
    }

    pub fn tag(mut self, tag: Option<String>) -> Self {
        self.tag = tag;
        self
    }

    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = Some(eps);
        self
    }

    pub fn input(mut self, path: &Path) -> Self {
        self.inputs.push(InputRef::new(path));
        self
    }

    pub fn params(mut self, params: Value) -> Self {
        self.params = params;
        self
    }
}

/// Record `artifact` as the run's output and write the sidecar beside it.
#[track_caller]
pub fn write_sidecar<P: AsRef<Path>>(artifact: P, mut record: RunRecord) -> Result<PathBuf> {
    let artifact = artifact.as_ref();
    let caller = Location::caller();
    record.callsite = Some(Callsite {
        file: caller.file(),
        line: caller.line(),
    });
    record.outputs.push(artifact.to_string_lossy().into_owned());

    let path = sidecar_path(artifact);
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating provenance dir {}", dir.display()))?;
    }
    fs::write(&path, serde_json::to_vec_pretty(&record)?)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

fn sidecar_path(artifact: &Path) -> PathBuf {
    let stem = artifact
        .file_stem()
        .map_or_else(|| "artifact".into(), |s| s.to_string_lossy().into_owned());
    artifact.with_file_name(format!("{stem}.provenance.json"))
}

/// Commit hash from `GIT_COMMIT` (build time, then run time) or `git rev-parse`.
pub fn current_git_rev() -> String {
    let nonempty = |s: String| (!s.is_empty()).then_some(s);
    option_env!("GIT_COMMIT")
        .map(str::to_string)
        .and_then(nonempty)
        .or_else(|| std::env::var("GIT_COMMIT").ok().and_then(nonempty))
        .or_else(|| {
            let out = Command::new("git").args(["rev-parse", "HEAD"]).output().ok()?;
            if !out.status.success() {
                return None;
            }
            String::from_utf8(out.stdout)
                .ok()
                .map(|s| s.trim().to_string())
                .and_then(nonempty)
        })
        .unwrap_or_else(|| "unknown".to_string())
}
