//! # Filepress - Batch File Transforms Under a Bounded Worker Pool
//!
//! Filepress runs CPU-bound file transforms (image recompression, checksum
//! mutation) over a batch of files while never exceeding a configured number
//! of concurrent workers.
//!
//! ## Features
//!
//! - **Bounded concurrency**: FIFO admission under a hard worker ceiling
//! - **Job isolation**: each job runs on its own supervised thread; a panic
//!   or hang becomes a per-job failure, never a crashed batch
//! - **Live progress**: per-job progress lines and a final size summary
//! - **Safe writes**: transformed files land via temp-file-and-rename
//!
//! ## Quick Start
//!
//! ```bash
//! # Install filepress
//! cargo install filepress
//!
//! # Recompress every image under ./photos with 4 workers
//! filepress compress ./photos --jobs 4
//!
//! # Change the checksum of every mp4 under ./clips
//! filepress mutate ./clips --ext mp4
//! ```

pub mod cli;
pub mod pool;
pub mod transform;
pub mod utils;
pub mod walker;

pub use cli::{Cli, Output};
pub use pool::{Job, JobReport, PoolConfig, TaskPool};

/// Result type alias for Filepress operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
