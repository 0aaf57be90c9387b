//! External command invocation behind a capability trait.
//!
//! Production code spawns real processes through [`ProcessRunner`]; tests
//! substitute in-memory fakes. Callers own any timeout around a run.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use infragraph_error::{Error, Result};

/// A command to run: program, arguments, extra environment, working dir.
#[derive(Debug, Clone, Default)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

impl CommandRequest {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }

    /// Shell-quoted command line for logs and error context.
    pub fn display_line(&self) -> String {
        let mut parts = Vec::with_capacity(self.args.len() + 1);
        parts.push(self.program.clone());
        parts.extend(self.args.iter().cloned());
        shell_words::join(&parts)
    }
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: Vec<u8>,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Capability to run external commands.
pub trait CommandRunner: Send + Sync {
    /// Run to completion, capturing both streams. A non-zero exit is not an
    /// error at this layer; callers inspect [`CommandOutput::status`].
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput>;
}

/// [`CommandRunner`] backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput> {
        debug!(command = %request.display_line(), "spawning");

        let mut cmd = Command::new(&request.program);
        cmd.args(&request.args);
        for (key, value) in &request.env {
            cmd.env(key, value);
        }
        if let Some(dir) = &request.cwd {
            cmd.current_dir(dir);
        }

        let output = cmd.output().map_err(|e| {
            Error::command_failed(format!("failed to spawn '{}'", request.program))
                .with_operation("runner::run")
                .with_context("command", request.display_line())
                .set_source(e)
        })?;

        Ok(CommandOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
