//! Rasterization of DOT artifacts to PNG.
//!
//! Layout and rasterization are delegated to the external Graphviz engine
//! invoked through the [`CommandRunner`] capability; this crate owns the
//! invocation contract, output validation and artifact bookkeeping.
//!
//! # Module Structure
//!
//! - [`png`]: PNG signature/IHDR probing
//! - [`reporter`]: the combined dot + png diagram reporter

mod png;
mod reporter;

use std::fs;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use infragraph_core::{Artifact, ArtifactKind, CommandRequest, CommandRunner, ProcessRunner};
use infragraph_error::{Error, Result};

pub use png::PngInfo;
pub use reporter::DiagramReporter;

/// Default layout engine binary. The engine's default layout algorithm is
/// part of the determinism contract for perceptual-diff testing.
pub const DEFAULT_ENGINE: &str = "dot";

/// Default raster resolution.
pub const DEFAULT_DPI: u32 = 96;

/// Converts a DOT artifact into a PNG artifact.
pub struct RasterRenderer {
    runner: Arc<dyn CommandRunner>,
    engine: String,
    dpi: u32,
}

impl RasterRenderer {
    /// Renderer spawning the real layout engine.
    pub fn new() -> Self {
        Self::with_runner(Arc::new(ProcessRunner))
    }

    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            engine: DEFAULT_ENGINE.to_string(),
            dpi: DEFAULT_DPI,
        }
    }

    pub fn with_engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Rasterize `dot_path` into `<stem>.png` under `outdir`.
    ///
    /// On any failure the target file is removed, so no partial raster is
    /// left in place.
    pub fn rasterize(&self, dot_path: &Path, outdir: &Path) -> Result<Artifact> {
        let stem = dot_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                Error::invalid_argument(format!(
                    "dot artifact path '{}' has no file stem",
                    dot_path.display()
                ))
                .with_operation("raster::rasterize")
            })?;
        let out_path = outdir.join(format!("{stem}.png"));

        let request = CommandRequest::new(&self.engine)
            .arg("-Tpng")
            .arg(format!("-Gdpi={}", self.dpi))
            .arg("-o")
            .arg(out_path.display().to_string())
            .arg(dot_path.display().to_string());

        let output = self.runner.run(&request).map_err(|e| {
            Error::raster_failed(format!("layout engine '{}' unavailable", self.engine))
                .with_operation("raster::rasterize")
                .with_context("command", request.display_line())
                .set_source(e)
        })?;

        if !output.success() {
            let _ = fs::remove_file(&out_path);
            return Err(Error::raster_failed(format!(
                "layout engine exited with status {}",
                output.status
            ))
            .with_operation("raster::rasterize")
            .with_context("command", request.display_line())
            .with_context("stderr", output.stderr.trim()));
        }

        let bytes = fs::read(&out_path).map_err(|e| {
            Error::raster_failed("layout engine reported success but wrote no output")
                .with_operation("raster::rasterize")
                .with_context("path", out_path.display().to_string())
                .set_source(e)
        })?;

        match PngInfo::probe(&bytes) {
            Ok(dims) => {
                info!(
                    path = %out_path.display(),
                    width = dims.width,
                    height = dims.height,
                    "png artifact written"
                );
                Ok(Artifact::new(ArtifactKind::Png, out_path))
            }
            Err(e) => {
                let _ = fs::remove_file(&out_path);
                Err(e.with_context("path", out_path.display().to_string()))
            }
        }
    }
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new()
    }
}
