mod analyzer;
mod builder;
mod config;
mod error;
mod queue;
mod runner;
mod tracks;
mod utils;

use anyhow::{Context, bail};
use builder::{ProcessFlags, display_command};
use clap::{Args, Parser, Subcommand};
use config::{AppConfig, Backend};
use queue::{BatchJob, BatchSettings, FileOutcome, FileReport};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};
use tracks::{Track, group_by_layout, selection};
use utils::DependencyStatus;

#[derive(Debug, Parser)]
#[command(
    name = "mkvcleaner",
    version,
    about = "Drop audio/subtitle tracks and fix default/forced flags in MKV files"
)]
struct Cli {
    /// Configuration file (.toml or .json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Backend used for discovery and rewriting
    #[arg(long, global = true, value_enum)]
    backend: Option<Backend>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show the tracks of MKV files, grouped by identical layout
    Inspect {
        /// Files or directories
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Rewrite MKV files into the output directory
    Process(ProcessArgs),
}

#[derive(Debug, Args)]
struct ProcessArgs {
    /// Files or directories
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Drop a track (native id, repeatable)
    #[arg(long = "remove", value_name = "ID")]
    remove: Vec<u32>,

    /// Set the forced flag on a subtitle track (repeatable)
    #[arg(long = "forced", value_name = "ID")]
    forced: Vec<u32>,

    /// Clear the forced flag on a subtitle track (repeatable)
    #[arg(long = "unforced", value_name = "ID")]
    unforced: Vec<u32>,

    /// Make this audio track the only default audio track
    #[arg(long, value_name = "ID")]
    default_audio: Option<u32>,

    /// Make this subtitle track the only default subtitle track
    #[arg(long, value_name = "ID")]
    default_subtitle: Option<u32>,

    /// Drop every subtitle track
    #[arg(long)]
    wipe_subs: bool,

    /// Clear the forced flag on every kept subtitle track
    #[arg(long)]
    wipe_forced: bool,

    /// Output directory, relative to each source file unless absolute
    #[arg(long, value_name = "DIR")]
    output_dir: Option<String>,

    /// Number of files processed at the same time
    #[arg(short, long, value_name = "N")]
    jobs: Option<usize>,

    /// Print the commands instead of running them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let _guard = utils::init_logging(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::load(),
    };
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }

    match cli.command {
        Commands::Inspect { paths } => inspect(&config, &paths).await,
        Commands::Process(args) => {
            if let Some(dir) = &args.output_dir {
                config.output.directory = dir.clone();
            }
            if let Some(jobs) = args.jobs {
                config.performance.max_workers = jobs;
            }
            config.validate()?;
            process(&config, args).await
        }
    }
}

/// Print every layout group with its tracks and files
async fn inspect(config: &AppConfig, paths: &[PathBuf]) -> anyhow::Result<ExitCode> {
    let files = queue::collect_inputs(paths, &config.output.directory);
    if files.is_empty() {
        bail!("No MKV files found");
    }

    let mut discovered = Vec::new();
    let mut failed = false;
    for file in files {
        match analyzer::discover(&file, config.backend, &config.binaries).await {
            Ok(tracks) => discovered.push((file, tracks)),
            Err(e) => {
                warn!("Failed to load {}: {}", file.display(), e);
                failed = true;
            }
        }
    }

    for (number, group) in group_by_layout(discovered).iter().enumerate() {
        println!("Layout {} ({} file(s))", number + 1, group.files.len());
        for track in &group.tracks {
            println!("  {}", track.display_name());
        }
        for file in &group.files {
            println!("    {}", file.display());
        }
    }

    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Apply the requested edits and run the batch
async fn process(config: &AppConfig, args: ProcessArgs) -> anyhow::Result<ExitCode> {
    let files = queue::collect_inputs(&args.paths, &config.output.directory);
    if files.is_empty() {
        bail!("No MKV files found");
    }

    if !args.dry_run {
        let status = DependencyStatus::check(config.backend, &config.binaries).await;
        if !status.is_ready() {
            warn!(
                "{} not available: {}",
                config.backend,
                status.missing.join(", ")
            );
        }
    }

    let mut jobs = Vec::new();
    let mut early_failures = Vec::new();
    for file in files {
        match analyzer::discover(&file, config.backend, &config.binaries).await {
            Ok(mut tracks) => {
                apply_edits(&mut tracks, &args, &file);
                jobs.push(BatchJob::new(file, tracks));
            }
            Err(e) => early_failures.push(FileReport {
                source: file,
                outcome: FileOutcome::Failed(e),
            }),
        }
    }

    let settings = Arc::new(BatchSettings {
        binaries: config.binaries.clone(),
        flags: ProcessFlags {
            wipe_all: args.wipe_subs,
            wipe_forced: args.wipe_forced,
            backend: config.backend,
        },
        output_dir: config.output.directory.clone(),
        max_workers: config.performance.max_workers,
        dry_run: args.dry_run,
    });

    let cancel_flag = Arc::new(AtomicBool::new(false));
    let signal_flag = cancel_flag.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Cancelling: files not yet started will be skipped");
            signal_flag.store(true, Ordering::Relaxed);
        }
    });

    let mut report = queue::run_batch(jobs, settings, cancel_flag).await;
    report.files.extend(early_failures);
    report.files.sort_by(|a, b| a.source.cmp(&b.source));

    for file in &report.files {
        if let FileOutcome::Planned { command, .. } = &file.outcome {
            println!("{}", display_command(command));
        }
    }
    println!("{}", report.summary());
    info!("Batch finished");

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Apply command-line intent to one file's discovered tracks
fn apply_edits(tracks: &mut [Track], args: &ProcessArgs, file: &Path) {
    for &id in &args.remove {
        if !selection::set_removed(tracks, id, true) {
            warn!("{}: no track {} to remove", file.display(), id);
        }
    }
    for (ids, forced) in [(&args.forced, true), (&args.unforced, false)] {
        for &id in ids {
            if !selection::set_forced(tracks, id, forced) {
                warn!("{}: track {} is not a subtitle track", file.display(), id);
            }
        }
    }
    if let Some(id) = args.default_audio
        && !selection::set_default_audio(tracks, id)
    {
        warn!("{}: track {} is not an audio track", file.display(), id);
    }
    if let Some(id) = args.default_subtitle
        && !selection::set_default_subtitle(tracks, id)
    {
        warn!("{}: track {} is not a subtitle track", file.display(), id);
    }
}
