use super::job::{BatchJob, output_path, resolve_output_dir};
use super::reconcile::reconcile;
use super::report::{BatchReport, FileOutcome, FileReport};
use crate::analyzer;
use crate::builder::{ProcessFlags, build_command, display_command};
use crate::config::Binaries;
use crate::error::AppError;
use crate::runner::run_command;
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Everything a worker needs besides the job itself
#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub binaries: Binaries,
    pub flags: ProcessFlags,
    pub output_dir: String,
    pub max_workers: usize,
    /// Build and report commands without running them
    pub dry_run: bool,
}

/// Process all jobs with at most `max_workers` files in flight.
///
/// A failed file never stops the others. Once `cancel_flag` is set, files
/// that have not started yet are reported as cancelled; commands already
/// launched run to completion.
pub async fn run_batch(
    jobs: Vec<BatchJob>,
    settings: Arc<BatchSettings>,
    cancel_flag: Arc<AtomicBool>,
) -> BatchReport {
    let start = Instant::now();
    let semaphore = Arc::new(Semaphore::new(settings.max_workers.max(1)));

    info!(
        "Processing {} file(s) with {} using up to {} worker(s)",
        jobs.len(),
        settings.flags.backend,
        settings.max_workers
    );

    let mut destinations = HashSet::new();
    let handles: Vec<_> = jobs
        .into_iter()
        .map(|job| {
            let source = job.source.clone();
            if let Some(destination) = output_path(&job.source, &settings.output_dir)
                && !destinations.insert(destination.clone())
            {
                warn!(
                    "{}: {} is already the output of another file",
                    job.filename(),
                    destination.display()
                );
                let outcome = FileOutcome::Failed(AppError::Config(format!(
                    "{} is already the output of another file",
                    destination.display()
                )));
                return (source, Err(outcome));
            }

            let semaphore = semaphore.clone();
            let settings = settings.clone();
            let cancel_flag = cancel_flag.clone();
            let handle = tokio::spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return FileOutcome::Cancelled;
                };
                if cancel_flag.load(Ordering::Relaxed) {
                    return FileOutcome::Cancelled;
                }
                match process_file(&job, &settings).await {
                    Ok(outcome) => outcome,
                    Err(e) => {
                        error!("{}: {}", job.filename(), e);
                        FileOutcome::Failed(e)
                    }
                }
            });
            (source, Ok(handle))
        })
        .collect();

    let mut files = Vec::with_capacity(handles.len());
    for (source, task) in handles {
        let outcome = match task {
            Err(outcome) => outcome,
            Ok(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("Worker for {} stopped: {}", source.display(), e);
                    FileOutcome::Failed(AppError::Worker(e.to_string()))
                }
            },
        };
        files.push(FileReport { source, outcome });
    }

    BatchReport {
        files,
        elapsed: start.elapsed(),
    }
}

/// Re-discover, reconcile, build and run the command for one file
async fn process_file(job: &BatchJob, settings: &BatchSettings) -> Result<FileOutcome, AppError> {
    let fresh = analyzer::discover(&job.source, settings.flags.backend, &settings.binaries).await?;
    let tracks = reconcile(fresh, &job.tracks);

    let output_dir = resolve_output_dir(&job.source, &settings.output_dir);
    let destination = output_path(&job.source, &settings.output_dir)
        .ok_or_else(|| AppError::Config(format!("{} has no file name", job.source.display())))?;

    if destination == job.source || is_same_file(&job.source, &destination).await {
        return Err(AppError::Config(format!(
            "Output would overwrite the source file {}",
            job.source.display()
        )));
    }

    let command = build_command(
        &job.source,
        &destination,
        &tracks,
        &settings.flags,
        &settings.binaries,
    );

    if settings.dry_run {
        return Ok(FileOutcome::Planned {
            destination,
            command,
        });
    }

    tokio::fs::create_dir_all(&output_dir).await?;

    info!("Running: {}", display_command(&command));
    run_command(&command, false).await?;

    let size = tokio::fs::metadata(&destination).await.ok().map(|m| m.len());
    info!("Finished {} -> {}", job.filename(), destination.display());

    Ok(FileOutcome::Done { destination, size })
}

/// True when both paths lead to one existing file, whatever their spelling
async fn is_same_file(a: &Path, b: &Path) -> bool {
    match (tokio::fs::canonicalize(a).await, tokio::fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
