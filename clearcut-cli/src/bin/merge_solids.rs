//! Detects geometrically coincident vertices, edges and faces across the
//! assembly and rebuilds the topology so coincident sub-shapes are shared.
//! The output is written as a compsolid, since its members share topology.

use clap::Parser;
use clearcut_cli::{load_document, run_stage, store_document};
use clearcut_engine::{merge_shapes, Document, MergeConfig};
use clearcut_topology::compress::AssemblyKind;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(about = "Merge coincident sub-shapes across an assembly")]
struct Args {
    /// coincidence tolerance
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    /// input BREP assembly
    input: PathBuf,

    /// output BREP assembly
    output: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_stage(|| {
        let config = MergeConfig {
            tolerance: args.tolerance,
        };
        config.validate().map_err(clearcut_engine::EngineError::from)?;
        let loaded = load_document(&args.input)?;
        let mut shapes = loaded.document.into_shapes();
        merge_shapes(&mut shapes, &config)?;
        store_document(&Document::new(shapes), AssemblyKind::CompSolid, &args.output)?;
        Ok(ExitCode::SUCCESS)
    })
}
