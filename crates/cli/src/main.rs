use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use corridor_geom::geom3::{
    enumerate_vertices, find_interior, overlap_margin, overlaps, InteriorSource,
};
use nalgebra::Vector3;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use io::{load_halfspaces, write_json, InteriorOut, OverlapOut, VerticesOut};
use provenance::{write_sidecar, RunRecord};

#[derive(Parser)]
#[command(name = "corridor")]
#[command(about = "Interior points, overlap tests, and vertices of 3D half-space systems")]
struct Cmd {
    /// Tolerance for overlap margin and vertex merging
    #[arg(long, global = true, default_value_t = corridor_geom::geom3::DEFAULT_EPS)]
    eps: f64,

    /// Optional run tag; propagated to provenance and logs
    #[arg(long, global = true)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Print a point strictly inside the region
    Interior {
        #[arg(long)]
        input: PathBuf,
    },
    /// Decide whether two regions overlap with positive volume
    Overlap {
        #[arg(long)]
        a: PathBuf,
        #[arg(long)]
        b: PathBuf,
    },
    /// Enumerate the vertices of a bounded region
    Vertices {
        #[arg(long)]
        input: PathBuf,
        /// Interior point `x,y,z` to use instead of solving for one
        #[arg(long, value_delimiter = ',', num_args = 3)]
        interior: Option<Vec<f64>>,
        /// Write JSON here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the run record (code revision, version, backends) without running anything
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Interior { input } => interior(input),
        Action::Overlap { a, b } => overlap(a, b, cmd.eps),
        Action::Vertices {
            input,
            interior,
            out,
        } => vertices(input, interior, out, cmd.eps, cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn interior(input: PathBuf) -> Result<()> {
    tracing::info!(input = %input.display(), "interior");
    let poly = load_halfspaces(&input)?;
    let p = find_interior(&poly)
        .with_context(|| format!("no interior point for {}", input.display()))?;
    let out = InteriorOut {
        interior: [p.x, p.y, p.z],
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn overlap(a: PathBuf, b: PathBuf, eps: f64) -> Result<()> {
    tracing::info!(a = %a.display(), b = %b.display(), eps, "overlap");
    let pa = load_halfspaces(&a)?;
    let pb = load_halfspaces(&b)?;
    let out = OverlapOut {
        overlap: overlaps(&pa, &pb, eps),
        margin: overlap_margin(&pa, &pb),
    };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn vertices(
    input: PathBuf,
    interior: Option<Vec<f64>>,
    out: Option<PathBuf>,
    eps: f64,
    tag: Option<String>,
) -> Result<()> {
    tracing::info!(input = %input.display(), eps, tag = ?tag, "vertices");
    let poly = load_halfspaces(&input)?;
    let hint = interior.map(|v| Vector3::new(v[0], v[1], v[2]));
    let res = enumerate_vertices(&poly, hint, eps)
        .with_context(|| format!("vertex enumeration failed for {}", input.display()))?;
    tracing::info!(count = res.vertices.len(), source = ?res.source, "enumerated");

    let doc = VerticesOut::from(&res);
    let Some(out) = out else {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    };
    write_json(&out, &doc)?;
    let params = json!({
        "rows": poly.len(),
        "interior": [res.interior.x, res.interior.y, res.interior.z],
        "interior_source": match res.source {
            InteriorSource::Supplied => "supplied",
            InteriorSource::Computed => "computed",
        },
        "vertices": res.vertices.len(),
    });
    let record = RunRecord::new("vertices")
        .tag(tag)
        .eps(eps)
        .input(&input)
        .params(params);
    let prov = write_sidecar(&out, record)?;
    tracing::info!(out = %out.display(), provenance = %prov.display(), "wrote");
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let record = RunRecord::new("report").tag(tag);
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
