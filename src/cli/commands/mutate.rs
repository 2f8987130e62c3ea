use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use super::{pool_config, render_batch};
use crate::cli::Output;
use crate::pool::{suggested_capacity, Job, TaskPool, WorkFn};
use crate::transform::checksum::{mutate, MutateOptions};
use crate::walker;

#[derive(Args, Serialize)]
pub struct MutateArgs {
    /// File or directory to process
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Maximum number of jobs to run at once
    #[arg(short, long, default_value_t = suggested_capacity())]
    pub jobs: usize,

    /// Upper bound on appended trailer bytes
    #[arg(long, default_value_t = 16)]
    pub max_trailer: usize,

    /// File extensions to process
    #[arg(long, value_delimiter = ',', default_values = ["jpg", "jpeg", "png", "gif", "mp4"])]
    pub ext: Vec<String>,

    /// Seconds to wait before giving up on a hung worker
    #[arg(long, default_value_t = 300)]
    pub worker_timeout: u64,
}

pub fn execute(args: MutateArgs, format: &str, output: &Output) -> Result<()> {
    let started = Instant::now();
    let files = walker::collect_files(&args.path, &args.ext)?;
    if files.is_empty() {
        output.warning("No matching files found");
        return Ok(());
    }
    output.verbose(&format!(
        "max_trailer={} extensions={:?}",
        args.max_trailer, args.ext
    ));
    output.step(&format!(
        "Mutating checksums of {} files with up to {} workers...",
        files.len(),
        args.jobs
    ));

    let options = MutateOptions { max_trailer: args.max_trailer };
    let work: WorkFn<PathBuf> = Arc::new(move |job: &Job<PathBuf>| mutate(job, &options));
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
