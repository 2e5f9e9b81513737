//! File and subprocess I/O utilities.

use crate::{Result, ScriptscanError};
use std::path::Path;
use std::process::{Output, Stdio};
use tokio::fs;
use tokio::process::Command;
use tokio::time::{Duration, timeout};

/// Read a file asynchronously.
///
/// # Errors
///
/// Returns `ScriptscanError::Io` for I/O errors (these always bubble up).
pub async fn read_file_async(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    fs::read(path.as_ref()).await.map_err(ScriptscanError::Io)
}

/// Validate that a file exists.
///
/// # Errors
///
/// Returns `ScriptscanError::Validation` if file doesn't exist.
pub fn validate_file_exists(path: impl AsRef<Path>) -> Result<()> {
    if !path.as_ref().exists() {
        return Err(ScriptscanError::validation(format!(
            "File does not exist: {}",
            path.as_ref().display()
        )));
    }
    Ok(())
}

/// Run an external tool to completion, capturing stdout and stderr.
///
/// The child is killed if it outlives `limit`. A non-zero exit status is not an
/// error here; callers decide how to interpret it.
///
/// # Errors
///
/// - `MissingDependency` when the program is not installed
/// - `Timeout` when the process runs longer than `limit`
/// - `Io` for any other spawn or wait failure
pub(crate) async fn run_command(mut command: Command, program: &str, limit: Duration) -> Result<Output> {
    let child = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ScriptscanError::MissingDependency(format!("{} is not installed or not on PATH", program))
            } else {
                ScriptscanError::Io(std::io::Error::other(format!("Failed to execute {}: {}", program, e)))
            }
        })?;

    match timeout(limit, child.wait_with_output()).await {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => Err(std::io::Error::other(format!("Failed to wait for {}: {}", program, e)).into()),
        // child was moved into wait_with_output; kill_on_drop reaps it
        Err(_) => Err(ScriptscanError::Timeout(format!(
            "{} did not finish within {} seconds",
            program,
            limit.as_secs()
        ))),
    }
}
