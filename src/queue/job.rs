use crate::tracks::Track;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One file to clean together with the intent captured for its tracks
#[derive(Debug, Clone)]
pub struct BatchJob {
    pub source: PathBuf,
    pub tracks: Vec<Track>,
}

impl BatchJob {
    pub fn new(source: PathBuf, tracks: Vec<Track>) -> Self {
        Self { source, tracks }
    }

    /// Get the filename
    pub fn filename(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Check if a path is a Matroska file
pub fn is_mkv_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("mkv"))
}

/// Expand files and directories into a sorted, de-duplicated list of MKV files.
/// Output directories of earlier runs found while walking are skipped; a
/// directory given explicitly is always walked.
pub fn collect_inputs(paths: &[PathBuf], output_dir: &str) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            let walker = WalkDir::new(path).follow_links(true).into_iter().filter_entry(|e| {
                let skip = e.depth() > 0 && e.file_type().is_dir() && is_output_dir(e.path(), output_dir);
                if skip {
                    debug!("Skipping output directory {}", e.path().display());
                }
                !skip
            });
            for entry in walker {
                match entry {
                    Ok(entry) if entry.file_type().is_file() && is_mkv_file(entry.path()) => {
                        files.push(entry.into_path());
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Skipping unreadable entry under {}: {}", path.display(), e),
                }
            }
        } else if is_mkv_file(path) {
            files.push(path.clone());
        } else {
            debug!("Ignoring non-MKV input {}", path.display());
        }
    }

    files.sort();
    files.dedup();
    files
}

/// Resolve the output directory for a source file. Relative directories are
/// placed next to the source, absolute ones are used as they are.
pub fn resolve_output_dir(source: &Path, output_dir: &str) -> PathBuf {
    let output_dir = Path::new(output_dir);
    if output_dir.is_absolute() {
        output_dir.to_path_buf()
    } else {
        source
            .parent()
            .unwrap_or(Path::new("."))
            .join(output_dir)
    }
}

/// Output file for a source: the resolved output directory plus the source file name
pub fn output_path(source: &Path, output_dir: &str) -> Option<PathBuf> {
    source
        .file_name()
        .map(|name| resolve_output_dir(source, output_dir).join(name))
}

/// True when `dir` is where files from one of its ancestors would be written
fn is_output_dir(dir: &Path, output_dir: &str) -> bool {
    let output = Path::new(output_dir);
    if output.is_absolute() {
        return dir == output
            || matches!((dir.canonicalize(), output.canonicalize()), (Ok(a), Ok(b)) if a == b);
    }
    dir.ancestors().skip(1).any(|ancestor| ancestor.join(output) == dir)
}
