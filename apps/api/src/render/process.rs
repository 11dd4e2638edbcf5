//! Run an external tool with a wall-clock timeout.
//!
//! The child is spawned with `kill_on_drop`, and on timeout it is killed and
//! reaped before returning, so no process outlives the call holding the
//! working directory open. Output pipes are drained concurrently with the
//! wait so a chatty tool can never block on a full pipe.

use std::path::Path;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::warn;

/// How long to keep reading output after the child is gone. A grandchild
/// that inherited the pipes can otherwise keep them open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Failed to start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for external tool: {0}")]
    Wait(#[source] std::io::Error),
}

/// What an external tool left behind.
#[derive(Debug)]
pub struct ToolOutput {
    /// `None` when the tool was killed on timeout.
    pub status: Option<ExitStatus>,
    pub stdout: String,
    pub stderr: String,
    pub timed_out: bool,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.status.is_some_and(|s| s.success())
    }

    /// The error stream if it has anything to say, otherwise the standard stream.
    pub fn diagnostic(&self) -> &str {
        if self.stderr.trim().is_empty() {
            self.stdout.trim()
        } else {
            self.stderr.trim()
        }
    }
}

/// Runs `program args..` in `cwd`, killing it if it outlives `timeout`.
///
/// A non-zero exit status is not an error here; callers decide what success
/// means from the output and whatever the tool wrote to `cwd`.
pub async fn run_external_tool(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Duration,
) -> Result<ToolOutput, ToolError> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ToolError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let (status, timed_out) = match tokio::time::timeout(timeout, child.wait()).await {
        Ok(status) => (Some(status.map_err(ToolError::Wait)?), false),
        Err(_) => {
            warn!(
                "`{program}` still running after {}s, killing it",
                timeout.as_secs()
            );
            // kill() also reaps the child.
            if let Err(e) = child.kill().await {
                warn!("Failed to kill `{program}`: {e}");
            }
            (None, true)
        }
    };

    Ok(ToolOutput {
        status,
        stdout: collect(stdout).await,
        stderr: collect(stderr).await,
        timed_out,
    })
}

fn drain<R>(mut reader: R) -> JoinHandle<Vec<u8>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        // Keep whatever was read before the error.
        if let Err(e) = reader.read_to_end(&mut buf).await {
            warn!("Failed reading external tool output after {} bytes: {e}", buf.len());
        }
        buf
    })
}

async fn collect(handle: Option<JoinHandle<Vec<u8>>>) -> String {
    let Some(mut handle) = handle else {
        return String::new();
    };
    match tokio::time::timeout(DRAIN_GRACE, &mut handle).await {
        Ok(Ok(bytes)) => String::from_utf8_lossy(&bytes).into_owned(),
        Ok(Err(e)) => {
            warn!("Output reader task failed: {e}");
            String::new()
        }
        Err(_) => {
            handle.abort();
            String::new()
        }
    }
}
