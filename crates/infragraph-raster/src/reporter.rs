//! The diagram reporter: DOT artifact plus optional PNG artifact.

use std::path::Path;

use infragraph_core::{DiagramArtifacts, Reporter, ResourceGraph};
use infragraph_dot::DotRenderer;
use infragraph_error::Result;

use crate::RasterRenderer;

/// Renders the DOT artifact and, when a raster renderer is configured, the
/// PNG artifact. The returned set carries the default pointer per kind.
pub struct DiagramReporter {
    dot: DotRenderer,
    raster: Option<RasterRenderer>,
}

impl DiagramReporter {
    /// DOT-only reporter.
    pub fn new(dot: DotRenderer) -> Self {
        Self { dot, raster: None }
    }

    /// Also rasterize the DOT artifact to PNG.
    pub fn with_raster(mut self, raster: RasterRenderer) -> Self {
        self.raster = Some(raster);
        self
    }
}

impl Reporter for DiagramReporter {
    fn name(&self) -> &'static str {
        "diagram"
    }

    fn report(&self, graph: &ResourceGraph, outdir: &Path) -> Result<DiagramArtifacts> {
        let dot_artifact = self.dot.render_to_file(graph, outdir)?;

        let mut artifacts = DiagramArtifacts::new();
        if let Some(raster) = &self.raster {
            let png_artifact = raster.rasterize(dot_artifact.filepath(), outdir)?;
            artifacts.push(dot_artifact)?;
            artifacts.push(png_artifact)?;
        } else {
            artifacts.push(dot_artifact)?;
        }
        Ok(artifacts)
    }
}
