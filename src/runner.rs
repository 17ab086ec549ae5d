use crate::error::AppError;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

/// Number of stderr lines kept when a command fails
const STDERR_TAIL_LINES: usize = 5;

/// Run an argument vector (program first) and return its stdout.
///
/// With `capture` false, stdout is discarded and an empty string returned.
/// A missing program maps to [`AppError::CommandNotFound`], a non-zero exit
/// to [`AppError::CommandFailed`] carrying the tail of stderr.
pub async fn run_command(argv: &[String], capture: bool) -> Result<String, AppError> {
    let Some((program, args)) = argv.split_first() else {
        return Err(AppError::CommandFailed {
            program: String::new(),
            status: "not started".to_string(),
            stderr: "empty command line".to_string(),
        });
    };

    debug!("Running: {}", crate::builder::display_command(argv));

    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(if capture { Stdio::piped() } else { Stdio::null() })
        .stderr(Stdio::piped())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                error!("{} not found on PATH", program);
                AppError::CommandNotFound {
                    program: program.clone(),
                }
            } else {
                AppError::Io(e)
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let tail = stderr_tail(&stderr);
        error!("Command failed: {} ({})\n{}", program, output.status, tail);
        return Err(AppError::CommandFailed {
            program: program.clone(),
            status: output.status.to_string(),
            stderr: tail,
        });
    }

    if !capture {
        return Ok(String::new());
    }

    String::from_utf8(output.stdout)
        .map_err(|e| AppError::Probe(format!("{} produced invalid UTF-8: {}", program, e)))
}

fn stderr_tail(stderr: &str) -> String {
    let last_lines: Vec<&str> = stderr
        .lines()
        .filter(|l| !l.trim().is_empty())
        .rev()
        .take(STDERR_TAIL_LINES)
        .collect();
    last_lines.into_iter().rev().collect::<Vec<_>>().join("\n")
}
