//! Rewrites overlapping solid pairs so each overlap region belongs to
//! exactly one solid. The pair list comes from standard input, as written
//! by the overlap checker; `touch` rows are ignored. Rows are applied in
//! lexicographic order so reruns are reproducible, and any failed pair
//! withholds the output file.

use clap::Parser;
use clearcut_cli::{load_document, run_stage, store_document};
use clearcut_engine::{imprint_document, ImprintConfig};
use clearcut_io::parse_rows;
use clearcut_kernel::RectKernel;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Imprint overlapping solids, consuming a pair list on stdin")]
struct Args {
    /// fuzzy tolerance of the imprint recipe
    #[arg(long, default_value_t = 0.001)]
    tolerance: f64,

    /// wall-clock budget per pair, in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 60.0)]
    time_per_pair: f64,

    /// input BREP assembly
    input: PathBuf,

    /// output BREP assembly
    output: PathBuf,
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_stage(|| {
        let config = ImprintConfig {
            tolerance: args.tolerance,
            time_per_pair: match args.time_per_pair > 0.0 {
                true => Some(Duration::from_secs_f64(args.time_per_pair)),
                false => None,
            },
        };
        config.validate().map_err(clearcut_engine::EngineError::from)?;

        let rows = parse_rows(std::io::stdin().lock())?;
        let mut pairs: Vec<(usize, usize)> = rows
            .iter()
            .filter(|row| row.class.is_overlap())
            .map(|row| (row.i, row.j))
            .collect();
        pairs.sort_unstable();

        let mut loaded = load_document(&args.input)?;
        let kernel = RectKernel::new();
        let outcome = imprint_document(&kernel, &mut loaded.document, &pairs, &config)?;
        outcome.into_result()?;
        store_document(&loaded.document, loaded.kind, &args.output)?;
        Ok(ExitCode::SUCCESS)
    })
}
