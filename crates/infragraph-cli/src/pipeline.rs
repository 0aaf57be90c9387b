//! Pipeline drivers: load inputs, run reporters or the generator.

use std::fs;
use std::time::Instant;

use tracing::info;

use infragraph_codegen::{GeneratedProject, InfraGenerator, TypeManifest, debug_enabled};
use infragraph_core::{GraphReport, ReportEntry, ResourceGraph};
use infragraph_dot::{DotRenderer, RenderOptions};
use infragraph_error::Result;
use infragraph_raster::{DiagramReporter, RasterRenderer};

use crate::options::{DiagramOptions, GenerateOptions};

/// Initialize the tracing subscriber on stderr.
///
/// `INFRAGRAPH_DEBUG` (truthy) forces debug-level logging; otherwise the
/// subscriber is only installed when `RUST_LOG` is set.
pub fn init_logging() {
    if debug_enabled() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("debug"))
            .with_writer(std::io::stderr)
            .init();
    } else if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Run the diagram pipeline: graph document in, artifacts out.
pub fn run_diagram(opts: &DiagramOptions) -> Result<Vec<ReportEntry>> {
    let load_start = Instant::now();
    let raw = fs::read_to_string(&opts.input)?;
    let graph = ResourceGraph::from_json(&raw)?;
    info!(
        graph = graph.name(),
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph loaded: {:.2}s",
        load_start.elapsed().as_secs_f64()
    );

    let render_options = RenderOptions {
        cluster_by_stack: !opts.flat,
        show_isolated_nodes: !opts.hide_isolated,
        ..RenderOptions::default()
    };

    let mut reporter = DiagramReporter::new(DotRenderer::with_options(render_options));
    if opts.png {
        reporter = reporter.with_raster(
            RasterRenderer::new()
                .with_engine(&opts.engine)
                .with_dpi(opts.dpi),
        );
    }

    let report = GraphReport::new(vec![Box::new(reporter)]);
    report.run(&graph, &opts.out)
}

/// Run the codegen pipeline: specification in, generated project out.
pub fn run_generate(opts: &GenerateOptions) -> Result<GeneratedProject> {
    let types = TypeManifest::load(&opts.types_manifest)?;
    InfraGenerator::new(&opts.spec, &opts.out, types).generate()
}
