//! Image recompression: re-encode an image in place, keeping the rewrite
//! only when it beats the configured minimum size reduction.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use tracing::trace;

use super::write_atomic;
use crate::pool::{Job, JobMetrics, JobReport};

#[derive(Debug, Clone)]
pub struct CompressOptions {
    /// JPEG quality used when re-encoding (1-100)
    pub quality: u8,
    /// Minimum size reduction, in percent, required to keep the rewrite
    pub min_reduction: f64,
}

impl Default for CompressOptions {
    fn default() -> Self {
        Self { quality: 80, min_reduction: 5.0 }
    }
}

/// Re-encode the image at `job.payload`. PNG files are re-encoded as PNG at
/// maximum compression; everything else decodable becomes JPEG at the
/// configured quality. Files that do not shrink enough are left untouched
/// and reported as skipped.
pub fn recompress(job: &Job<PathBuf>, options: &CompressOptions) -> Result<JobReport> {
    let path = &job.payload;
    let original_bytes = fs::metadata(path)
        .with_context(|| format!("failed to stat {}", path.display()))?
        .len();

    let img = image::open(path)
        .with_context(|| format!("failed to decode {}", path.display()))?;

    let mut encoded = Vec::new();
    if is_png(path) {
        let encoder =
            PngEncoder::new_with_quality(&mut encoded, CompressionType::Best, FilterType::Adaptive);
        img.write_with_encoder(encoder)
            .with_context(|| format!("failed to re-encode {}", path.display()))?;
    } else {
        let encoder = JpegEncoder::new_with_quality(&mut encoded, options.quality);
        img.to_rgb8()
            .write_with_encoder(encoder)
            .with_context(|| format!("failed to re-encode {}", path.display()))?;
    }

    let transformed_bytes = encoded.len() as u64;
    let keep_below = original_bytes as f64 * (1.0 - options.min_reduction / 100.0);
    trace!(path = %path.display(), original_bytes, transformed_bytes, "re-encoded");
    if transformed_bytes as f64 >= keep_below {
        return Ok(JobReport::skipped(job.id.as_str(), "no significant size reduction"));
    }

    write_atomic(path, &encoded)?;
    Ok(JobReport::succeeded(
        job.id.as_str(),
        JobMetrics { original_bytes, transformed_bytes },
    ))
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"))
}
