//! Command implementations for the Filepress CLI
//!
//! Each command builds a job list, runs it through the task pool, and
//! renders the final batch state.

pub mod compress;
pub mod mutate;

use std::time::Duration;

use anyhow::Result;

use crate::cli::Output;
use crate::pool::{PoolConfig, ProgressState};
use crate::utils::format_bytes;

pub(crate) fn pool_config(jobs: usize, worker_timeout_secs: u64) -> PoolConfig {
    PoolConfig {
        capacity: jobs,
        worker_timeout: Duration::from_secs(worker_timeout_secs),
    }
}

/// Render the drained batch state: JSON when requested, a styled summary
/// otherwise. Failed jobs do not fail the batch; they are per-job outcomes.
pub(crate) fn render_batch(
    state: &ProgressState,
    elapsed_secs: f64,
    format: &str,
    output: &Output,
) -> Result<()> {
    if format == "json" {
        println!("{}", serde_json::to_string_pretty(state)?);
        return Ok(());
    }
    output.success(&format!(
        "Batch finished in {:.2}s: {} succeeded, {} skipped, {} failed ({} -> {}, reduction {})",
        elapsed_secs,
        state.succeeded,
        state.skipped,
        state.failed,
        format_bytes(state.original_bytes),
        format_bytes(state.transformed_bytes),
        state.reduction_label(),
    ));
    if state.failed > 0 {
        output.warning(&format!("{} jobs failed; see the lines above", state.failed));
    }
    Ok(())
}
