//! Checksum mutation: append random trailer bytes so a file's digest
//! changes while the content stays playable/viewable for formats that
//! tolerate trailing garbage.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::pool::{Job, JobMetrics, JobReport};

#[derive(Debug, Clone)]
pub struct MutateOptions {
    /// Upper bound on the number of appended trailer bytes (at least 1)
    pub max_trailer: usize,
}

impl Default for MutateOptions {
    fn default() -> Self {
        Self { max_trailer: 16 }
    }
}

/// Append 1..=`max_trailer` random bytes to the file at `job.payload` and
/// verify its SHA-256 actually changed.
pub fn mutate(job: &Job<PathBuf>, options: &MutateOptions) -> Result<JobReport> {
    let path = &job.payload;
    let original = fs::read(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    if original.is_empty() {
        bail!("refusing to mutate empty file {}", path.display());
    }

    let before = Sha256::digest(&original);

    let mut rng = rand::rng();
    let trailer_len = rng.random_range(1..=options.max_trailer.max(1));
    let mut trailer = vec![0u8; trailer_len];
    rng.fill(&mut trailer[..]);

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open {} for append", path.display()))?;
    file.write_all(&trailer)
        .with_context(|| format!("failed to append trailer to {}", path.display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&original);
    hasher.update(&trailer);
    let after = hasher.finalize();
    if after == before {
        bail!("digest unchanged after mutation of {}", path.display());
    }
    trace!(
        path = %path.display(),
        trailer_len,
        before = %hex_prefix(&before),
        after = %hex_prefix(&after),
        "digest mutated"
    );

    let original_bytes = original.len() as u64;
    Ok(JobReport::succeeded(
        job.id.as_str(),
        JobMetrics {
            original_bytes,
            transformed_bytes: original_bytes + trailer_len as u64,
        },
    ))
}

fn hex_prefix(digest: &[u8]) -> String {
    digest.iter().take(8).map(|b| format!("{b:02x}")).collect()
}
