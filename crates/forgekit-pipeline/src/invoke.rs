//! Tool invocation assembly and execution
//!
//! A [`ToolInvocation`] is a resolved program path plus an argument
//! vector. Commands are spawned directly, never through a shell; the
//! rendered command line exists for logging, dry runs, and JSON output.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;
use tracing::{debug, error, info};

use forgekit_core::{Error, Result};

/// A single planned external-tool command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolInvocation {
    /// Resolved path to the tool binary
    pub program: PathBuf,
    /// Arguments, one element per argv entry
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument, rendered lossily for display purposes
    pub fn path_arg(self, path: impl AsRef<Path>) -> Self {
        self.arg(path.as_ref().display().to_string())
    }

    /// Short tool name for log messages (file stem of the program)
    pub fn tool_name(&self) -> String {
        self.program
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.display().to_string())
    }

    /// Render the full command line, quoting arguments with whitespace
    pub fn command_line(&self) -> String {
        let mut line = quote(&self.program.display().to_string());
        for arg in &self.args {
            line.push(' ');
            line.push_str(&quote(arg));
        }
        line
    }

    /// Run the command and wait for it to finish
    pub fn run(&self) -> Result<()> {
        debug!(command = %self.command_line(), "Running tool");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|source| Error::SpawnFailed {
                tool: self.tool_name(),
                source,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::ToolFailed {
                tool: self.tool_name(),
                code: status.code(),
            })
        }
    }
}

impl std::fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.command_line())
    }
}

fn quote(s: &str) -> String {
    if s.is_empty() || s.contains(char::is_whitespace) {
        format!("\"{s}\"")
    } else {
        s.to_string()
    }
}

/// The output of a planning pass: invocations to run plus inputs that
/// were discovered but deliberately skipped (unmapped files, missing
/// output directories)
#[derive(Debug, Clone, Default, Serialize)]
pub struct Plan {
    pub invocations: Vec<ToolInvocation>,
    pub skipped: usize,
}

impl Plan {
    pub fn push(&mut self, invocation: ToolInvocation) {
        self.invocations.push(invocation);
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }
}

/// Counters for one executed plan
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub ran: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ran {}, skipped {}, failed {}",
            self.ran, self.skipped, self.failed
        )
    }
}

/// Execute every invocation in a plan, sequentially and in order.
///
/// A failing tool does not stop the batch; failures are counted and the
/// whole run errors at the end if any invocation failed.
pub fn execute(plan: &Plan) -> Result<RunSummary> {
    let mut summary = RunSummary {
        skipped: plan.skipped,
        ..Default::default()
    };

    for invocation in &plan.invocations {
        info!(command = %invocation, "Invoking");
        match invocation.run() {
            Ok(()) => summary.ran += 1,
            Err(Error::SpawnFailed { tool, source }) => {
                // A tool that cannot launch at all will fail every
                // remaining invocation too; stop here.
                return Err(Error::SpawnFailed { tool, source });
            }
            Err(e) => {
                error!(error = %e, "Tool invocation failed");
                summary.failed += 1;
            }
        }
    }

    if summary.failed > 0 {
        return Err(Error::BatchFailed {
            failed: summary.failed,
            total: plan.invocations.len(),
        });
    }

    Ok(summary)
}
