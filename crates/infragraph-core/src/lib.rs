//! Core data model for infragraph.
//!
//! This crate owns the pieces shared by both pipelines:
//!
//! - [`graph`]: the infrastructure resource graph (nodes, edges, builder)
//! - [`artifact`]: generated output files plus metadata
//! - [`report`]: the reporter capability and its orchestrator
//! - [`runner`]: external command invocation behind a capability trait

pub mod artifact;
pub mod graph;
pub mod report;
pub mod runner;

pub use artifact::{Artifact, ArtifactKind, DiagramArtifacts};
pub use graph::{
    GraphBuilder, RelationKind, ResourceEdge, ResourceGraph, ResourceId, ResourceKind,
    ResourceNode,
};
pub use report::{GraphReport, ReportEntry, Reporter};
pub use runner::{CommandOutput, CommandRequest, CommandRunner, ProcessRunner};

pub use infragraph_error::{Error, ErrorKind, Result};
