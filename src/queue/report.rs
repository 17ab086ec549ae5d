use crate::error::AppError;
use crate::utils::format_file_size;
use std::path::PathBuf;
use std::time::Duration;

/// Result of processing one file
#[derive(Debug)]
pub enum FileOutcome {
    /// Rewritten successfully
    Done {
        destination: PathBuf,
        size: Option<u64>,
    },
    /// Dry run: the command that would have been launched
    Planned {
        destination: PathBuf,
        command: Vec<String>,
    },
    /// Discovery, directory creation or the backend failed
    Failed(AppError),
    /// Not started because the batch was cancelled
    Cancelled,
}

/// Per-file entry of a batch report
#[derive(Debug)]
pub struct FileReport {
    pub source: PathBuf,
    pub outcome: FileOutcome,
}

/// Outcome of a whole batch, in input order
#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub elapsed: Duration,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Done { .. } | FileOutcome::Planned { .. }))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.failures().count()
    }

    pub fn cancelled(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Cancelled))
            .count()
    }

    pub fn has_failures(&self) -> bool {
        self.failed() > 0
    }

    /// Failed files with their errors
    pub fn failures(&self) -> impl Iterator<Item = (&PathBuf, &AppError)> {
        self.files.iter().filter_map(|f| match &f.outcome {
            FileOutcome::Failed(e) => Some((&f.source, e)),
            _ => None,
        })
    }

    /// Total size of all written outputs
    pub fn total_output_size(&self) -> u64 {
        self.files
            .iter()
            .filter_map(|f| match f.outcome {
                FileOutcome::Done { size, .. } => size,
                _ => None,
            })
            .sum()
    }

    /// Human readable summary printed after the batch
    pub fn summary(&self) -> String {
        let mut lines = Vec::new();

        for file in &self.files {
            match &file.outcome {
                FileOutcome::Done { destination, size } => lines.push(format!(
                    "  ok      {} -> {} ({})",
                    file.source.display(),
                    destination.display(),
                    size.map(format_file_size).unwrap_or_else(|| "size unknown".to_string())
                )),
                FileOutcome::Planned { destination, .. } => lines.push(format!(
                    "  planned {} -> {}",
                    file.source.display(),
                    destination.display()
                )),
                FileOutcome::Failed(e) => {
                    let hint = if e.is_command_not_found() {
                        " (install it or set its path in the config file)"
                    } else {
                        ""
                    };
                    lines.push(format!("  failed  {}: {}{}", file.source.display(), e, hint))
                }
                FileOutcome::Cancelled => {
                    lines.push(format!("  skipped {} (cancelled)", file.source.display()))
                }
            }
        }

        lines.push(format!(
            "{} succeeded, {} failed, {} cancelled in {:.1}s, {} written",
            self.succeeded(),
            self.failed(),
            self.cancelled(),
            self.elapsed.as_secs_f64(),
            format_file_size(self.total_output_size())
        ));
        lines.join("\n")
    }
}
