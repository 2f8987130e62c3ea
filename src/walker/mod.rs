//! Filesystem walk that builds the ordered job source.
//!
//! Collaborator around the pool: it produces the finite, ordered file list a
//! batch is built from. Hidden files are skipped; gitignore rules are not
//! applied since media trees are usually not git repositories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;
use tracing::trace;

/// Collect every file under `root` whose extension matches (case-insensitive).
/// A `root` that is itself a matching file yields a single-entry batch.
/// The returned list is sorted so submission order is deterministic.
pub fn collect_files(root: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(if matches_extension(root, extensions) {
            vec![root.to_path_buf()]
        } else {
            Vec::new()
        });
    }

    let mut files = Vec::new();
    let walker = WalkBuilder::new(root)
        .standard_filters(false)
        .hidden(true)
        .build();
    for entry in walker {
        let entry = entry.with_context(|| format!("failed to walk {}", root.display()))?;
        let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
        if is_file && matches_extension(entry.path(), extensions) {
            trace!(path = %entry.path().display(), "collected");
            files.push(entry.into_path());
        }
    }
    files.sort();
    Ok(files)
}

fn matches_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return false;
    };
    extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn exts(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn filters_by_extension_case_insensitively() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("b.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/c.PNG"), b"x").unwrap();

        let files = collect_files(dir.path(), &exts(&["jpg", "png"])).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.jpg", "c.PNG"]);
    }

    #[test]
    fn skips_hidden_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".hidden.jpg"), b"x").unwrap();
        fs::write(dir.path().join("seen.jpg"), b"x").unwrap();

        let files = collect_files(dir.path(), &exts(&["jpg"])).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("seen.jpg"));
    }

    #[test]
    fn single_file_root_yields_one_job() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("only.jpg");
        fs::write(&file, b"x").unwrap();

        let files = collect_files(&file, &exts(&["jpg"])).unwrap();
        assert_eq!(files, vec![file.clone()]);
        assert!(collect_files(&file, &exts(&["png"])).unwrap().is_empty());
    }
}
