//! Typed infrastructure binding generation from OpenAPI specifications.
//!
//! The pipeline is: load and validate the specification document, resolve
//! shared type names through the sibling types project's manifest, then emit
//! a fixed set of source files under the output directory. Emission is
//! deterministic and atomic - either the full file set lands or none of it.
//!
//! # Module Structure
//!
//! - [`spec`]: OpenAPI document loading and structural validation
//! - [`manifest`]: the shared type-name contract with the types project
//! - [`model`]: the operation model derived from a validated document
//! - [`emit`]: source emission for the generated files
//! - [`generate`]: the generator orchestrating the above
//! - [`command`]: the generator executable's argument and environment contract

pub mod command;
pub mod emit;
pub mod generate;
pub mod manifest;
pub mod model;
pub mod spec;

pub use command::{DEBUG_ENV, GenerateCommand, debug_enabled, is_truthy, run_generator};
pub use generate::{GeneratedProject, InfraGenerator};
pub use manifest::TypeManifest;
pub use model::{ApiModel, HttpMethod, Operation};
pub use spec::SpecDocument;

pub use infragraph_error::{Error, ErrorKind, Result};
