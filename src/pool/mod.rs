//! Bounded-concurrency task pool
//!
//! This module provides the coordination core of filepress: a FIFO task pool
//! that admits at most `capacity` jobs at once, runs each admitted job on an
//! isolated, supervised worker thread, and aggregates per-job reports into a
//! running progress view.
//!
//! # Architecture Responsibilities
//!
//! The pool focuses exclusively on **admission control** and the
//! **result-reporting protocol**:
//!
//! ## What This Module Does:
//! - **Admission**: pops pending jobs in submission order while headroom exists
//! - **Isolation**: one worker thread per job, one report per worker, delivered
//!   over a one-shot channel and supervised with a timeout
//! - **Drain**: `drain()` blocks until every submitted job has produced exactly
//!   one report and nothing is pending or in flight
//! - **Aggregation**: a dedicated progress thread consumes reports in
//!   completion order and emits human-readable lines to a pluggable sink
//!
//! ## What This Module Does NOT Do:
//! - **Domain logic**: it treats a job as an opaque `(Job) -> JobReport` call
//! - **Prioritisation or cancellation**: admission is strictly FIFO and an
//!   admitted job always runs to completion (or timeout)
//!
//! # Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use filepress::pool::{Job, JobMetrics, JobReport, PoolConfig, TaskPool, WorkFn};
//!
//! let work: WorkFn<u64> = Arc::new(|job: &Job<u64>| {
//!     Ok(JobReport::succeeded(job.id.as_str(), JobMetrics {
//!         original_bytes: job.payload,
//!         transformed_bytes: job.payload / 2,
//!     }))
//! });
//!
//! let mut pool = TaskPool::new(PoolConfig::default(), work, Box::new(|_: &str| {})).unwrap();
//! pool.submit(Job::new("a", 100));
//! pool.submit(Job::new("b", 200));
//! let state = pool.drain();
//! assert_eq!(state.completed, 2);
//! ```

pub mod executor;
pub mod job;
pub mod progress;
pub mod scheduler;

// Re-export main types for easier access
pub use executor::WorkFn;
pub use job::{Job, JobMetrics, JobReport, JobStatus};
pub use progress::{LineSink, ProgressState};
pub use scheduler::{suggested_capacity, PoolConfig, PoolError, TaskPool, DEFAULT_CAPACITY};
