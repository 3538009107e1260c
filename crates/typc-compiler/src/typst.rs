//! `typst` CLI invocation
//!
//! Runs `typst compile <entry> - --format <fmt>` and captures the rendered
//! artifact from stdout. Diagnostics stay on stderr and are carried into
//! [`Error::CompileFailed`] verbatim. A wall-clock timeout bounds every
//! invocation; on expiry the child is killed and a distinct
//! [`Error::Timeout`] is reported.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::{CompileRequest, Compiler, Error, OutputFormat, Result};

/// Default wall-clock budget for one compiler run.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// The `typst` binary as a [`Compiler`].
#[derive(Debug, Clone)]
pub struct TypstCli {
    binary: PathBuf,
    timeout: Duration,
}

impl TypstCli {
    /// Use the `typst` binary found on `PATH` with the default budget.
    pub fn new() -> Self {
        Self {
            binary: PathBuf::from("typst"),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Use a specific compiler binary.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replace the wall-clock budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for TypstCli {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Compiler for TypstCli {
    async fn compile(&self, request: &CompileRequest) -> Result<Vec<u8>> {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("compile")
            .arg(&request.entry)
            .arg("-")
            .arg("--format")
            .arg(request.format.as_str());
        if request.format == OutputFormat::Png {
            cmd.arg("--ppi").arg(request.ppi.to_string());
        }
        if let Some(workspace) = request.entry.parent() {
            cmd.current_dir(workspace);
        }
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(
            entry = %request.entry.display(),
            format = %request.format,
            "invoking compiler"
        );

        let child = cmd.spawn().map_err(|e| Error::Spawn {
            binary: self.binary.clone(),
            source: e,
        })?;

        // Dropping the future on timeout kills the child via kill_on_drop.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Err(_) => {
                tracing::warn!(budget = ?self.timeout, "compiler timed out");
                return Err(Error::Timeout {
                    budget: self.timeout,
                });
            }
            Ok(waited) => waited.map_err(|e| Error::Spawn {
                binary: self.binary.clone(),
                source: e,
            })?,
        };

        if !output.status.success() {
            return Err(Error::CompileFailed {
                status: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }

        Ok(output.stdout)
    }
}
