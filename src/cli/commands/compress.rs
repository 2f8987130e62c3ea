use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{pool_config, render_batch};
use crate::cli::Output;
use crate::pool::{suggested_capacity, Job, TaskPool, WorkFn};
use crate::transform::image::{recompress, CompressOptions};
use crate::walker;

#[derive(Args, Serialize)]
pub struct CompressArgs {
    /// File or directory to process
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Maximum number of jobs to run at once
    #[arg(short, long, default_value_t = suggested_capacity())]
    pub jobs: usize,

    /// JPEG quality for re-encoding (1-100)
    #[arg(long, default_value_t = 80)]
    pub quality: u8,

    /// Minimum size reduction (percent) required to keep the rewrite
    #[arg(long, default_value_t = 5.0)]
    pub min_reduction: f64,

    /// File extensions to process
    #[arg(long, value_delimiter = ',', default_values = ["jpg", "jpeg", "png"])]
    pub ext: Vec<String>,

    /// Seconds to wait before giving up on a hung worker
    #[arg(long, default_value_t = 300)]
    pub worker_timeout: u64,
}

pub fn execute(args: CompressArgs, format: &str, output: &Output) -> Result<()> {
    let started = Instant::now();
    let files = walker::collect_files(&args.path, &args.ext)?;
    if files.is_empty() {
        output.warning("No matching files found");
        return Ok(());
    }
    output.verbose(&format!(
        "quality={} min_reduction={}% extensions={:?}",
        args.quality, args.min_reduction, args.ext
    ));
    output.step(&format!(
        "Recompressing {} files with up to {} workers...",
        files.len(),
        args.jobs
    ));

    let options = CompressOptions {
        quality: args.quality,
        min_reduction: args.min_reduction,
    };
    let work: WorkFn<PathBuf> = Arc::new(move |job: &Job<PathBuf>| recompress(job, &options));
    let mut pool = TaskPool::new(
        pool_config(args.jobs, args.worker_timeout),
        work,
        output.progress_sink(format == "json"),
    )?;
    for file in files {
        pool.submit(Job::new(file.display().to_string(), file));
    }
    let state = pool.drain();
    render_batch(&state, started.elapsed().as_secs_f64(), format, output)
}
