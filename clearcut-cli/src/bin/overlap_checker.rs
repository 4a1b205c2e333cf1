//! Finds all solid pairs of an assembly that touch or overlap within a
//! tolerance, printing one CSV row per non-distinct pair to standard
//! output. A non-zero count of failed pairs or overly large overlaps makes
//! the process exit non-zero, so unfit geometry fails CI.

use clap::Parser;
use clearcut_cli::{load_document, run_stage, CliError};
use clearcut_engine::{scan_overlaps, OverlapConfig, WorkerPool};
use clearcut_io::format_row;
use clearcut_kernel::RectKernel;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(about = "Report touching and overlapping solid pairs of an assembly")]
struct Args {
    /// worker threads
    #[arg(short = 'j', long = "threads")]
    threads: Option<usize>,

    /// clearance added to every bounding box before pair rejection
    #[arg(long, default_value_t = 0.5)]
    bbox_clearance: f64,

    /// fuzzy tolerance ladder, tried in order (repeatable)
    #[arg(long = "imprint-tolerance")]
    imprint_tolerance: Vec<f64>,

    /// overlaps beyond this share of the smaller solid fail the run
    #[arg(long, default_value_t = 0.01)]
    max_common_volume_ratio: f64,

    /// wall-clock budget per pair, in seconds (0 disables the timeout)
    #[arg(long, default_value_t = 60.0)]
    time_per_pair: f64,

    /// input BREP assembly
    input: PathBuf,
}

impl Args {
    fn config(&self) -> OverlapConfig {
        let defaults = OverlapConfig::default();
        OverlapConfig {
            threads: self.threads.unwrap_or(defaults.threads),
            bbox_clearance: self.bbox_clearance,
            ladder: match self.imprint_tolerance.is_empty() {
                true => defaults.ladder,
                false => self.imprint_tolerance.clone(),
            },
            max_common_volume_ratio: self.max_common_volume_ratio,
            time_per_pair: match self.time_per_pair > 0.0 {
                true => Some(Duration::from_secs_f64(self.time_per_pair)),
                false => None,
            },
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    run_stage(|| {
        let config = args.config();
        config.validate().map_err(clearcut_engine::EngineError::from)?;
        let loaded = load_document(&args.input)?;
        let kernel = Arc::new(RectKernel::new());
        let pool = WorkerPool::new(config.threads);
        let stdout = std::io::stdout();
        let mut out = std::io::BufWriter::new(stdout.lock());
        let mut write_failed: Option<std::io::Error> = None;
        let summary = scan_overlaps(&kernel, &loaded.document, &config, &pool, |row| {
            if write_failed.is_none() {
                if let Err(error) = writeln!(out, "{}", format_row(row)) {
                    write_failed = Some(error);
                }
            }
        })?;
        if let Some(error) = write_failed {
            return Err(CliError::Io(error.into()));
        }
        out.flush().map_err(clearcut_io::IoError::Stream)?;
        Ok(match summary.is_clean() {
            true => ExitCode::SUCCESS,
            false => ExitCode::FAILURE,
        })
    })
}
