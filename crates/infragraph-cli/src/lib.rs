//! infragraph command-line interface.
//!
pub mod options;
pub mod pipeline;

pub use options::{DiagramOptions, GenerateOptions};
pub use pipeline::{init_logging, run_diagram, run_generate};

pub use infragraph_error::Result;
