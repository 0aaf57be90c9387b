//! Reporter capability and orchestration.
//!
//! Reporters are injected explicitly - there is no ambient plugin registry.
//! The orchestrator drives each reporter against a shared output directory
//! and collects the artifact sets. A single report run is single-caller;
//! concurrent runs must use distinct output directories.

use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use infragraph_error::Result;

use crate::artifact::DiagramArtifacts;
use crate::graph::ResourceGraph;

/// A component that turns a graph into artifact files.
pub trait Reporter {
    /// Stable reporter name, used in logs and report entries.
    fn name(&self) -> &'static str;

    /// Render artifacts for `graph` under `outdir`.
    fn report(&self, graph: &ResourceGraph, outdir: &Path) -> Result<DiagramArtifacts>;
}

/// Artifacts produced by one reporter during a report run.
#[derive(Debug)]
pub struct ReportEntry {
    pub reporter: &'static str,
    pub artifacts: DiagramArtifacts,
}

/// Drives a list of reporters over one graph.
pub struct GraphReport {
    reporters: Vec<Box<dyn Reporter>>,
}

impl GraphReport {
    pub fn new(reporters: Vec<Box<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    /// Run every reporter in order. Fails on the first reporter error;
    /// earlier reporters' artifacts stay on disk for the caller to clean.
    pub fn run(&self, graph: &ResourceGraph, outdir: &Path) -> Result<Vec<ReportEntry>> {
        fs::create_dir_all(outdir)?;

        let mut entries = Vec::with_capacity(self.reporters.len());
        for reporter in &self.reporters {
            let start = Instant::now();
            let artifacts = reporter.report(graph, outdir)?;
            info!(
                reporter = reporter.name(),
                artifacts = artifacts.len(),
                "report: {:.2}s",
                start.elapsed().as_secs_f64()
            );
            entries.push(ReportEntry {
                reporter: reporter.name(),
                artifacts,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{Artifact, ArtifactKind};
    use crate::graph::{GraphBuilder, ResourceKind, ResourceNode};

    struct TouchReporter;

    impl Reporter for TouchReporter {
        fn name(&self) -> &'static str {
            "touch"
        }

        fn report(&self, graph: &ResourceGraph, outdir: &Path) -> Result<DiagramArtifacts> {
            let path = outdir.join(format!("{}.dot", graph.name()));
            fs::write(&path, "digraph G {\n}\n")?;
            let mut artifacts = DiagramArtifacts::new();
            artifacts.push(Artifact::new(ArtifactKind::Dot, path))?;
            Ok(artifacts)
        }
    }

    #[test]
    fn test_run_collects_entries() {
        let tmp = tempfile::tempdir().unwrap();
        let mut b = GraphBuilder::new("app");
        b.add_node(ResourceNode::new("api", "api", ResourceKind::Api))
            .unwrap();
        let graph = b.build();

        let report = GraphReport::new(vec![Box::new(TouchReporter)]);
        let entries = report.run(&graph, tmp.path()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].reporter, "touch");
        let dot = entries[0].artifacts.default_dot().unwrap();
        assert!(dot.filepath().exists());
    }

    #[test]
    fn test_run_creates_outdir() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("report/out");
        let graph = GraphBuilder::new("app").build();

        let report = GraphReport::new(vec![Box::new(TouchReporter)]);
        report.run(&graph, &nested).unwrap();
        assert!(nested.join("app.dot").exists());
    }
}
