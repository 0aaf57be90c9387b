//! The generator executable's invocation contract.
//!
//! Scaffolding integrations do not shell-quote by hand: they build the
//! argument vector here and hand it to a [`CommandRunner`]. The same
//! contract is what `infragraph generate` parses on the other side.

use std::path::PathBuf;

use tracing::debug;

use infragraph_core::{CommandRequest, CommandRunner};
use infragraph_error::{Error, Result};

/// Environment flag enabling verbose diagnostic logging in the generator.
pub const DEBUG_ENV: &str = "INFRAGRAPH_DEBUG";

/// Truthy values accepted for [`DEBUG_ENV`].
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "on" | "yes"
    )
}

/// Whether the current process environment enables generator debugging.
pub fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV)
        .map(|v| is_truthy(&v))
        .unwrap_or(false)
}

/// Typed argument set for one `generate` invocation.
#[derive(Debug, Clone)]
pub struct GenerateCommand {
    pub spec_path: PathBuf,
    pub outdir: PathBuf,
    pub types_manifest: PathBuf,
}

impl GenerateCommand {
    pub fn new(
        spec_path: impl Into<PathBuf>,
        outdir: impl Into<PathBuf>,
        types_manifest: impl Into<PathBuf>,
    ) -> Self {
        Self {
            spec_path: spec_path.into(),
            outdir: outdir.into(),
            types_manifest: types_manifest.into(),
        }
    }

    /// Argument vector for the generator executable.
    pub fn build_args(&self) -> Vec<String> {
        vec![
            "generate".to_string(),
            "--spec".to_string(),
            self.spec_path.display().to_string(),
            "--out".to_string(),
            self.outdir.display().to_string(),
            "--types-manifest".to_string(),
            self.types_manifest.display().to_string(),
        ]
    }
}

/// Spawn the generator executable through the runner capability.
///
/// The debug flag of the current environment is propagated to the child.
/// A non-zero exit becomes a fatal error carrying the captured stderr.
pub fn run_generator(
    runner: &dyn CommandRunner,
    program: &str,
    command: &GenerateCommand,
) -> Result<()> {
    let mut request = CommandRequest::new(program).args(command.build_args());
    if debug_enabled() {
        request = request.env(DEBUG_ENV, "1");
    }

    let output = runner.run(&request)?;
    if !output.success() {
        return Err(Error::command_failed(format!(
            "generator exited with status {}",
            output.status
        ))
        .with_operation("command::run_generator")
        .with_context("command", request.display_line())
        .with_context("stderr", output.stderr.trim()));
    }

    debug!(
        command = %request.display_line(),
        stdout_bytes = output.stdout.len(),
        "generator finished"
    );
    Ok(())
}
