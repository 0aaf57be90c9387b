//! Artifacts: generated output files plus metadata.

use std::path::{Path, PathBuf};

use strum_macros::{Display, IntoStaticStr};

use infragraph_error::{Error, Result};

/// Kind of a generated artifact file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr)]
pub enum ArtifactKind {
    /// UTF-8 Graphviz source
    Dot,
    /// Raster rendering
    Png,
}

impl ArtifactKind {
    pub fn file_extension(&self) -> &'static str {
        match self {
            ArtifactKind::Dot => "dot",
            ArtifactKind::Png => "png",
        }
    }
}

/// A generated output file. Created once per render invocation and
/// referenced read-only thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    kind: ArtifactKind,
    filepath: PathBuf,
}

impl Artifact {
    pub fn new(kind: ArtifactKind, filepath: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            filepath: filepath.into(),
        }
    }

    pub fn kind(&self) -> ArtifactKind {
        self.kind
    }

    pub fn filepath(&self) -> &Path {
        &self.filepath
    }
}

/// Result object of one completed report run.
///
/// Holds at most one artifact per kind; the artifact of a kind is that
/// kind's default. A completed diagram report always carries the DOT
/// artifact, and the PNG artifact only when rasterization ran.
#[derive(Debug, Default)]
pub struct DiagramArtifacts {
    artifacts: Vec<Artifact>,
}

impl DiagramArtifacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an artifact. A second artifact of the same kind is rejected.
    pub fn push(&mut self, artifact: Artifact) -> Result<()> {
        if self.of_kind(artifact.kind()).is_some() {
            return Err(Error::invalid_argument(format!(
                "artifact of kind {} already registered",
                artifact.kind()
            ))
            .with_operation("artifact::push")
            .with_context("filepath", artifact.filepath().display().to_string()));
        }
        self.artifacts.push(artifact);
        Ok(())
    }

    pub fn of_kind(&self, kind: ArtifactKind) -> Option<&Artifact> {
        self.artifacts.iter().find(|a| a.kind() == kind)
    }

    /// The default DOT artifact of this report.
    pub fn default_dot(&self) -> Option<&Artifact> {
        self.of_kind(ArtifactKind::Dot)
    }

    /// The default PNG artifact of this report.
    pub fn default_png(&self) -> Option<&Artifact> {
        self.of_kind(ArtifactKind::Png)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Artifact> {
        self.artifacts.iter()
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
