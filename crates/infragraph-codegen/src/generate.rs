//! The infrastructure code generator.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use infragraph_error::{Error, Result};

use crate::emit::{GENERATED_FILES, emit_api, emit_barrel, emit_mocks};
use crate::manifest::TypeManifest;
use crate::model::ApiModel;
use crate::spec::SpecDocument;

/// The emitted file set of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProject {
    /// Output directory of the run.
    pub root: PathBuf,
    /// Generated files, relative to `root`.
    pub files: Vec<PathBuf>,
}

/// Generates typed infrastructure bindings from a specification document.
///
/// Re-running with an unchanged specification regenerates byte-identical
/// files. Generation is atomic: the file set is rendered into a staging
/// directory inside the output directory and swapped into place only after
/// every file rendered, so a failed run never leaves a partial set behind.
pub struct InfraGenerator {
    spec_path: PathBuf,
    outdir: PathBuf,
    types: TypeManifest,
}

impl InfraGenerator {
    pub fn new(
        spec_path: impl Into<PathBuf>,
        outdir: impl Into<PathBuf>,
        types: TypeManifest,
    ) -> Self {
        Self {
            spec_path: spec_path.into(),
            outdir: outdir.into(),
            types,
        }
    }

    pub fn generate(&self) -> Result<GeneratedProject> {
        let spec = SpecDocument::load(&self.spec_path)?;
        spec.validate()?;
        let model = ApiModel::from_spec(&spec, &self.types)?;

        debug!(
            spec = %self.spec_path.display(),
            operations = model.operations.len(),
            types_project = %self.types.project_name,
            "specification loaded"
        );

        // Render everything before any file is written.
        let rendered: [(&str, String); 3] = [
            (GENERATED_FILES[0], emit_api(&model)),
            (GENERATED_FILES[1], emit_mocks(&model)),
            (GENERATED_FILES[2], emit_barrel(&model)),
        ];

        fs::create_dir_all(&self.outdir)?;
        let staging = tempfile::Builder::new()
            .prefix(".infragraph-stage-")
            .tempdir_in(&self.outdir)
            .map_err(|e| {
                Error::generation_failed("cannot create staging directory")
                    .with_operation("codegen::generate")
                    .with_context("outdir", self.outdir.display().to_string())
                    .set_source(e)
            })?;

        for (rel, content) in &rendered {
            let target = staging.path().join(rel);
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, content)?;
        }

        self.swap_into_place(staging.path())?;

        let files: Vec<PathBuf> = rendered.iter().map(|(rel, _)| PathBuf::from(rel)).collect();
        info!(
            outdir = %self.outdir.display(),
            files = files.len(),
            "generation complete"
        );

        Ok(GeneratedProject {
            root: self.outdir.clone(),
            files,
        })
    }

    /// Replace `<outdir>/src` with the staged `src` directory.
    fn swap_into_place(&self, staging: &Path) -> Result<()> {
        let target = self.outdir.join("src");
        if target.exists() {
            fs::remove_dir_all(&target)?;
        }
        fs::rename(staging.join("src"), &target).map_err(|e| {
            Error::from(e)
                .with_operation("codegen::swap_into_place")
                .with_context("target", target.display().to_string())
        })
    }
}
