//! Shared CLI options for infragraph tools.

use std::path::PathBuf;

use clap::Args;

use infragraph_raster::{DEFAULT_DPI, DEFAULT_ENGINE};

/// Options for the diagram pipeline.
#[derive(Args, Debug, Clone)]
pub struct DiagramOptions {
    /// Graph document to render (JSON, as synthesized by a graph builder)
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: PathBuf,

    /// Report output directory
    #[arg(short = 'o', long = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Also rasterize the DOT artifact to PNG
    #[arg(long, default_value_t = false)]
    pub png: bool,

    /// Render a flat graph without stack clusters
    #[arg(long, default_value_t = false)]
    pub flat: bool,

    /// Hide nodes without any incident edge
    #[arg(long = "hide-isolated", default_value_t = false)]
    pub hide_isolated: bool,

    /// Layout engine binary used for rasterization
    #[arg(long, value_name = "BIN", default_value = DEFAULT_ENGINE)]
    pub engine: String,

    /// Raster resolution
    #[arg(long, value_name = "DPI", default_value_t = DEFAULT_DPI)]
    pub dpi: u32,
}

/// Options for the codegen pipeline.
#[derive(Args, Debug, Clone)]
pub struct GenerateOptions {
    /// OpenAPI specification document
    #[arg(long = "spec", value_name = "FILE")]
    pub spec: PathBuf,

    /// Output directory of the generated project
    #[arg(long = "out", value_name = "DIR")]
    pub out: PathBuf,

    /// Type manifest of the sibling generated types project
    #[arg(long = "types-manifest", value_name = "FILE")]
    pub types_manifest: PathBuf,
}
