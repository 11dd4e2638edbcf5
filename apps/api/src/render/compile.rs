//! LaTeX → PDF compilation in a request-scoped scratch directory.
//!
//! Success is the presence of `resume.pdf` after the engine exits, not the
//! engine's exit status: LaTeX engines routinely exit non-zero on recoverable
//! warnings while still writing a usable PDF.
//!
//! # Scratch directory lifetime
//! The directory is a [`tempfile::TempDir`] owned by the compile call. It is
//! removed when dropped, which covers every exit path: success, compile
//! failure, timeout, `?` propagation and task cancellation.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tempfile::TempDir;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::process::run_external_tool;
use super::CompileError;
use crate::latex::Engine;

pub const SOURCE_FILE: &str = "resume.tex";
pub const ARTIFACT_FILE: &str = "resume.pdf";

/// Default wall-clock limit for one compile.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

// ────────────────────────────────────────────────────────────────────────────
// Engine selection
// ────────────────────────────────────────────────────────────────────────────

/// A command line with `{input}` and `{outdir}` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl EngineCommand {
    pub fn new(program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    /// Tectonic handles both pdfTeX- and XeTeX-style layouts and fetches
    /// missing packages itself.
    pub fn tectonic() -> Self {
        Self::new(
            "tectonic",
            &["{input}", "--outdir", "{outdir}", "--chatter", "minimal"],
        )
    }

    /// The layout's own engine (`pdflatex` / `xelatex`) from a TeX distribution.
    pub fn native(engine: Engine) -> Self {
        Self::new(
            engine.program(),
            &[
                "-interaction=nonstopmode",
                "-halt-on-error",
                "-output-directory",
                "{outdir}",
                "{input}",
            ],
        )
    }

    /// Arguments with placeholders substituted.
    pub fn resolve(&self, input: &str, outdir: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.replace("{input}", input).replace("{outdir}", outdir))
            .collect()
    }
}

/// Which command compiles a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineMode {
    /// `tectonic` for every template.
    Tectonic,
    /// The engine each template declares.
    Native,
    /// A fixed command regardless of template.
    #[cfg(test)]
    Custom(EngineCommand),
}

impl EngineMode {
    pub fn command_for(&self, engine: Engine) -> EngineCommand {
        match self {
            EngineMode::Tectonic => EngineCommand::tectonic(),
            EngineMode::Native => EngineCommand::native(engine),
            #[cfg(test)]
            EngineMode::Custom(command) => command.clone(),
        }
    }
}

impl FromStr for EngineMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tectonic" => Ok(EngineMode::Tectonic),
            "native" => Ok(EngineMode::Native),
            other => Err(format!(
                "unknown LaTeX engine mode '{other}' (expected 'tectonic' or 'native')"
            )),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Compiler
// ────────────────────────────────────────────────────────────────────────────

/// Turns LaTeX source into PDF bytes.
#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    async fn compile(&self, source: &str, engine: Engine) -> Result<Vec<u8>, CompileError>;
}

/// Compiles with an external engine process.
#[derive(Debug, Clone)]
pub struct LatexCompiler {
    mode: EngineMode,
    timeout: Duration,
    scratch_root: Option<PathBuf>,
}

impl LatexCompiler {
    pub fn new(mode: EngineMode, timeout: Duration) -> Self {
        Self {
            mode,
            timeout,
            scratch_root: None,
        }
    }

    /// Parent directory for scratch directories. Defaults to the system temp dir.
    pub fn with_scratch_root(mut self, root: Option<PathBuf>) -> Self {
        self.scratch_root = root;
        self
    }

    fn scratch_dir(&self) -> Result<TempDir, CompileError> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("resume-");
        match &self.scratch_root {
            Some(root) => builder.tempdir_in(root),
            None => builder.tempdir(),
        }
        .map_err(CompileError::ScratchDir)
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, source: &str, engine: Engine) -> Result<Vec<u8>, CompileError> {
        let compile_id = Uuid::new_v4();
        let started = Instant::now();

        let scratch = self.scratch_dir()?;
        let dir = scratch.path();
        tokio::fs::write(dir.join(SOURCE_FILE), source).await?;

        let command = self.mode.command_for(engine);
        let args = command.resolve(SOURCE_FILE, ".");
        info!(%compile_id, program = %command.program, "Starting LaTeX compilation");
        debug!(
            %compile_id,
            "Scratch dir {}: {} {}",
            dir.display(),
            command.program,
            args.join(" ")
        );

        let output = run_external_tool(&command.program, &args, dir, self.timeout).await?;

        if output.timed_out {
            warn!(%compile_id, "LaTeX compilation timed out after {}s", self.timeout.as_secs());
            let mut diagnostic = format!("Compilation timed out after {}s", self.timeout.as_secs());
            if !output.diagnostic().is_empty() {
                diagnostic.push('\n');
                diagnostic.push_str(output.diagnostic());
            }
            return Err(CompileError::CompilationFailure { diagnostic });
        }

        let pdf = match tokio::fs::read(dir.join(ARTIFACT_FILE)).await {
            Ok(pdf) => pdf,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(%compile_id, status = ?output.status, "LaTeX engine produced no PDF");
                return Err(CompileError::CompilationFailure {
                    diagnostic: output.diagnostic().to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        if !output.success() {
            warn!(
                %compile_id,
                status = ?output.status,
                "LaTeX engine exited unsuccessfully but produced a PDF"
            );
        }
        info!(
            %compile_id,
            bytes = pdf.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "LaTeX compilation finished"
        );
        Ok(pdf)
    }
}
